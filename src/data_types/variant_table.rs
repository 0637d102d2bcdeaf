
use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::data_types::maf_columns::{CHROMOSOME, END_POSITION, START_POSITION};
use crate::data_types::mutation_key::MutationKey;
use crate::data_types::read_category::TableRole;
use crate::reconcile::errors::ReconcileError;

/// Text values that are read as "no value" whenever a cell is parsed as a number
const MISSING_TOKENS: [&str; 4] = ["", "NA", "NaN", "nan"];

/// A MAF-like table held in memory: unique column names and rows of nullable text cells.
/// Cells stay as text so untouched columns are written back verbatim; numeric columns are parsed on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantTable {
    /// what this table represents, used in errors and logging
    role: TableRole,
    /// the ordered column names
    columns: Vec<String>,
    /// column name to position in `columns`
    column_lookup: HashMap<String, usize>,
    /// the data rows, each has exactly `columns.len()` cells
    rows: Vec<Vec<Option<String>>>
}

impl VariantTable {
    /// Creates an empty table with the given header
    /// # Errors
    /// * if a column name is repeated
    pub fn new(role: TableRole, columns: Vec<String>) -> Result<VariantTable, ReconcileError> {
        let column_lookup = build_lookup(role, &columns)?;
        Ok(VariantTable {
            role,
            columns,
            column_lookup,
            rows: vec![]
        })
    }

    pub fn role(&self) -> TableRole {
        self.role
    }

    pub fn set_role(&mut self, role: TableRole) {
        self.role = role;
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_lookup.contains_key(name)
    }

    /// Position of a column in the header
    /// # Errors
    /// * if the column does not exist
    pub fn column_position(&self, name: &str) -> Result<usize, ReconcileError> {
        self.column_lookup.get(name)
            .copied()
            .ok_or_else(|| ReconcileError::missing_column(self.role, name))
    }

    /// Appends a data row
    /// # Errors
    /// * if the row does not have one cell per column
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<(), ReconcileError> {
        if row.len() != self.columns.len() {
            return Err(ReconcileError::RowLength {
                table: self.role,
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len()
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns a single cell by row and column position
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows[row][column].as_deref()
    }

    /// Returns one cell by row and column name
    /// # Errors
    /// * if the column does not exist
    pub fn value(&self, row: usize, name: &str) -> Result<Option<&str>, ReconcileError> {
        let column = self.column_position(name)?;
        Ok(self.cell(row, column))
    }

    /// Parses an entire column as nullable integers.
    /// Integral floats (e.g. "409.0") are accepted, missing tokens become None.
    /// # Errors
    /// * if the column does not exist
    /// * if any cell is not an integer
    pub fn integer_column(&self, name: &str) -> Result<Vec<Option<i64>>, ReconcileError> {
        let column = self.column_position(name)?;
        self.rows.iter()
            .enumerate()
            .map(|(row_index, row)| {
                let text = row[column].as_deref().unwrap_or("");
                parse_integer(text).ok_or_else(|| ReconcileError::InvalidValue {
                    table: self.role,
                    column: name.to_string(),
                    row: row_index,
                    value: text.to_string()
                })
            })
            .collect()
    }

    /// Parses an entire column as nullable non-negative counts
    /// # Errors
    /// * if the column does not exist
    /// * if any cell is not an integer, or is negative
    pub fn count_column(&self, name: &str) -> Result<Vec<Option<u64>>, ReconcileError> {
        let values = self.integer_column(name)?;
        values.into_iter()
            .enumerate()
            .map(|(row, opt_value)| match opt_value {
                Some(v) if v < 0 => Err(ReconcileError::InvalidValue {
                    table: self.role,
                    column: name.to_string(),
                    row,
                    value: v.to_string()
                }),
                Some(v) => Ok(Some(v as u64)),
                None => Ok(None)
            })
            .collect()
    }

    /// Replaces a column if it exists, otherwise appends it to the end of the header
    /// # Panics
    /// * if `values` does not contain one entry per row
    pub fn set_column(&mut self, name: &str, values: Vec<Option<String>>) {
        assert_eq!(values.len(), self.rows.len(), "column {name} length does not match row count");
        match self.column_lookup.get(name) {
            Some(&column) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[column] = value;
                }
            },
            None => {
                self.column_lookup.insert(name.to_string(), self.columns.len());
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Applies a text transformation to every non-missing cell of a column
    /// # Errors
    /// * if the column does not exist
    pub fn update_column<F>(&mut self, name: &str, f: F) -> Result<(), ReconcileError>
        where F: Fn(&str) -> String {
        let column = self.column_position(name)?;
        for row in self.rows.iter_mut() {
            if let Some(value) = row[column].as_mut() {
                *value = f(value);
            }
        }
        Ok(())
    }

    /// Renames columns in place, checking every rename before applying any
    /// # Arguments
    /// * `renames` - pairs of (current name, new name)
    /// # Errors
    /// * if any current name is absent
    /// * if any new name is already taken
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) -> Result<(), ReconcileError> {
        for &(from, to) in renames.iter() {
            self.column_position(from)?;
            if from != to && self.has_column(to) {
                return Err(ReconcileError::DuplicateColumn {
                    table: self.role,
                    column: to.to_string()
                });
            }
        }

        for &(from, to) in renames.iter() {
            let column = self.column_position(from)?;
            self.columns[column] = to.to_string();
        }
        self.column_lookup = build_lookup(self.role, &self.columns)?;
        Ok(())
    }

    /// Removes a column if present, returns true if something was removed
    pub fn drop_column(&mut self, name: &str) -> bool {
        let column = match self.column_lookup.get(name) {
            Some(&c) => c,
            None => return false
        };

        self.columns.remove(column);
        for row in self.rows.iter_mut() {
            row.remove(column);
        }
        self.column_lookup = self.columns.iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        true
    }

    /// Stable sort of the rows by chromosome (as text), then start and end (as integers)
    /// # Errors
    /// * if any position column is missing or non-integer
    pub fn sort_by_position(&mut self) -> Result<(), ReconcileError> {
        let chrom_column = self.column_position(CHROMOSOME)?;
        let starts = self.integer_column(START_POSITION)?;
        let ends = self.integer_column(END_POSITION)?;

        let rows = std::mem::take(&mut self.rows);
        self.rows = rows.into_iter()
            .zip(starts.into_iter().zip(ends))
            .sorted_by(|(row_a, pos_a), (row_b, pos_b)| {
                match row_a[chrom_column].cmp(&row_b[chrom_column]) {
                    Ordering::Equal => pos_a.cmp(pos_b),
                    other => other
                }
            })
            .map(|(row, _)| row)
            .collect();
        Ok(())
    }

    /// Builds a table directly from text rows, empty strings become missing cells
    #[cfg(test)]
    pub fn from_text_rows(role: TableRole, columns: &[&str], rows: &[&[&str]]) -> VariantTable {
        let mut table = VariantTable::new(role, columns.iter().map(|c| c.to_string()).collect()).unwrap();
        for row in rows.iter() {
            table.push_row(row.iter().map(|c| if c.is_empty() { None } else { Some(c.to_string()) }).collect()).unwrap();
        }
        table
    }
}

/// Builds the name to position lookup, rejecting repeated names
fn build_lookup(role: TableRole, columns: &[String]) -> Result<HashMap<String, usize>, ReconcileError> {
    let mut lookup: HashMap<String, usize> = Default::default();
    for (i, column) in columns.iter().enumerate() {
        if lookup.insert(column.clone(), i).is_some() {
            return Err(ReconcileError::DuplicateColumn {
                table: role,
                column: column.clone()
            });
        }
    }
    Ok(lookup)
}

/// Returns true if the text represents a missing value in numeric context
pub fn is_missing(text: &str) -> bool {
    MISSING_TOKENS.contains(&text.trim())
}

/// Parses an integer cell.
/// Returns Some(None) for a missing token, Some(Some(v)) for a value, and None if the text is not an integer.
pub fn parse_integer(text: &str) -> Option<Option<i64>> {
    let text = text.trim();
    if is_missing(text) {
        return Some(None);
    }
    if let Ok(v) = text.parse::<i64>() {
        return Some(Some(v));
    }

    // integral floats show up in tables that passed through a NaN-aware writer
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(Some(f as i64)),
        _ => None
    }
}

/// How unmatched rows are treated when two tables are joined on the mutation key
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// only keys present in both tables
    Inner,
    /// every left row; right cells are missing when unmatched
    Left,
    /// every left row, then unmatched right rows
    #[default]
    Outer
}

/// Joins selected columns of `right` onto `left` by mutation key.
/// Output rows follow left order; with [`JoinPolicy::Outer`] the unmatched right rows follow in right order,
/// and any left column that also exists in `right` is filled from `right` for those rows.
/// # Arguments
/// * `left` - the anchor table, all of its columns are kept
/// * `right` - the table providing extra columns
/// * `key` - the mutation key for both tables
/// * `right_columns` - the columns to carry over from `right`
/// * `policy` - the join policy
/// * `role` - the role of the resulting table
/// # Errors
/// * if either table has duplicate or invalid keys
/// * if a requested column is absent from `right`, or already present in `left`
pub fn join_tables(
    left: &VariantTable, right: &VariantTable, key: &MutationKey,
    right_columns: &[String], policy: JoinPolicy, role: TableRole
) -> Result<VariantTable, ReconcileError> {
    let left_index = key.index(left)?;
    let right_index = key.index(right)?;

    // figure out where each carried column lives
    let mut right_positions: Vec<usize> = Vec::with_capacity(right_columns.len());
    for column in right_columns.iter() {
        right_positions.push(right.column_position(column)?);
        if left.has_column(column) {
            return Err(ReconcileError::DuplicateColumn {
                table: left.role(),
                column: column.clone()
            });
        }
    }

    let mut columns: Vec<String> = left.columns().to_vec();
    columns.extend(right_columns.iter().cloned());
    let mut joined = VariantTable::new(role, columns)?;

    for (left_row, left_key) in left.rows().iter().zip(left_index.keys()) {
        let mut row: Vec<Option<String>> = left_row.clone();
        match right_index.get(left_key) {
            Some(right_row) => {
                row.extend(right_positions.iter().map(|&p| right.rows()[right_row][p].clone()));
            },
            None => {
                if policy == JoinPolicy::Inner {
                    continue;
                }
                row.extend(std::iter::repeat(None).take(right_positions.len()));
            }
        };
        joined.push_row(row)?;
    }

    if policy == JoinPolicy::Outer {
        // left columns that we can still fill in from the right side
        let shared: Vec<Option<usize>> = left.columns().iter()
            .map(|c| right.column_lookup.get(c).copied())
            .collect();

        for (right_row, right_key) in right.rows().iter().zip(right_index.keys()) {
            if left_index.contains(right_key) {
                continue;
            }
            let mut row: Vec<Option<String>> = shared.iter()
                .map(|opt_p| opt_p.and_then(|p| right_row[p].clone()))
                .collect();
            row.extend(right_positions.iter().map(|&p| right_row[p].clone()));
            joined.push_row(row)?;
        }
    }

    Ok(joined)
}
