
use rustc_hash::FxHashMap as HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};

use crate::data_types::maf_columns::{CHROMOSOME, END_POSITION, REFERENCE_ALLELE, START_POSITION, TUMOR_SEQ_ALLELE2};
use crate::data_types::variant_table::{parse_integer, VariantTable};
use crate::reconcile::errors::ReconcileError;

/// The set of columns that identify a variant row across every table we reconcile.
/// The tumor allele column differs between callers, so it is provided by the caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MutationKey {
    /// the column holding the tumor (observed) allele
    allele_column: String
}

impl Default for MutationKey {
    fn default() -> Self {
        MutationKey::new(TUMOR_SEQ_ALLELE2)
    }
}

impl MutationKey {
    pub fn new(allele_column: &str) -> MutationKey {
        MutationKey {
            allele_column: allele_column.to_string()
        }
    }

    pub fn allele_column(&self) -> &str {
        &self.allele_column
    }

    /// The key columns in order: chromosome, start, end, reference, tumor allele
    pub fn columns(&self) -> [&str; 5] {
        [CHROMOSOME, START_POSITION, END_POSITION, REFERENCE_ALLELE, &self.allele_column]
    }

    /// Builds a key index over every row of a table.
    /// # Arguments
    /// * `table` - the table to index
    /// # Errors
    /// * if any key column is missing from the table
    /// * if a key cell is empty, or a position is not an integer
    /// * if two rows share the same key
    pub fn index(&self, table: &VariantTable) -> Result<KeyIndex, ReconcileError> {
        let key_columns = self.columns();
        let mut positions: [usize; 5] = [0; 5];
        for (p, column) in positions.iter_mut().zip(key_columns.iter()) {
            *p = table.column_position(column)?;
        }

        let mut keys: Vec<VariantKey> = Vec::with_capacity(table.num_rows());
        let mut lookup: HashMap<VariantKey, usize> = Default::default();
        for row in 0..table.num_rows() {
            // pull each cell, none of them are allowed to be missing
            let mut cells: [&str; 5] = [""; 5];
            for (i, (&p, column)) in positions.iter().zip(key_columns.iter()).enumerate() {
                cells[i] = match table.cell(row, p) {
                    Some(value) if !value.is_empty() => value,
                    _ => return Err(ReconcileError::InvalidValue {
                        table: table.role(),
                        column: column.to_string(),
                        row,
                        value: String::new()
                    })
                };
            }

            let parse_position = |i: usize| -> Result<i64, ReconcileError> {
                match parse_integer(cells[i]) {
                    Some(Some(v)) => Ok(v),
                    _ => Err(ReconcileError::InvalidValue {
                        table: table.role(),
                        column: key_columns[i].to_string(),
                        row,
                        value: cells[i].to_string()
                    })
                }
            };

            let key = VariantKey {
                chrom: cells[0].to_string(),
                start: parse_position(1)?,
                end: parse_position(2)?,
                reference: cells[3].to_string(),
                allele: cells[4].to_string()
            };

            match lookup.entry(key.clone()) {
                Occupied(_) => {
                    return Err(ReconcileError::DuplicateKey {
                        table: table.role(),
                        key: key.to_string()
                    });
                },
                Vacant(entry) => {
                    entry.insert(row);
                }
            };
            keys.push(key);
        }

        Ok(KeyIndex {
            keys,
            lookup
        })
    }
}

/// The key values of a single variant row
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariantKey {
    chrom: String,
    start: i64,
    end: i64,
    reference: String,
    allele: String
}

impl VariantKey {
    pub fn new(chrom: &str, start: i64, end: i64, reference: &str, allele: &str) -> VariantKey {
        VariantKey {
            chrom: chrom.to_string(),
            start,
            end,
            reference: reference.to_string(),
            allele: allele.to_string()
        }
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{} {}>{}", self.chrom, self.start, self.end, self.reference, self.allele)
    }
}

/// Row lookup by mutation key for one table; guaranteed unique
#[derive(Clone, Debug)]
pub struct KeyIndex {
    /// key of each row, in row order
    keys: Vec<VariantKey>,
    /// key to row
    lookup: HashMap<VariantKey, usize>
}

impl KeyIndex {
    pub fn keys(&self) -> &[VariantKey] {
        &self.keys
    }

    /// Returns the row holding the key, if any
    pub fn get(&self, key: &VariantKey) -> Option<usize> {
        self.lookup.get(key).copied()
    }

    pub fn contains(&self, key: &VariantKey) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data_types::maf_columns::TUMOR_SEQ_ALLELE1;
    use crate::data_types::read_category::TableRole;

    const HEADER: [&str; 6] = ["Chromosome", "Start_Position", "End_Position", "Reference_Allele", "Tumor_Seq_Allele1", "Tumor_Seq_Allele2"];

    #[test]
    fn test_index() {
        let table = VariantTable::from_text_rows(TableRole::Simplex, &HEADER, &[
            &["1", "100", "100", "G", "G", "A"],
            &["1", "200", "209", "GGGTCGGGAC", "GGGTCGGGAC", "-"],
            &["X", "5", "5", "C", "C", "T"]
        ]);
        let index = MutationKey::default().index(&table).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&VariantKey::new("1", 200, 209, "GGGTCGGGAC", "-")), Some(1));
        assert_eq!(index.get(&VariantKey::new("X", 5, 5, "C", "T")), Some(2));
        assert!(!index.contains(&VariantKey::new("X", 5, 5, "C", "G")));
        assert_eq!(index.keys()[0].to_string(), "1:100-100 G>A");
    }

    #[test]
    fn test_integral_float_positions() {
        let table = VariantTable::from_text_rows(TableRole::Original, &HEADER, &[
            &["1", "100.0", "100", "G", "G", "A"]
        ]);
        let index = MutationKey::default().index(&table).unwrap();
        assert_eq!(index.get(&VariantKey::new("1", 100, 100, "G", "A")), Some(0));
    }

    #[test]
    fn test_allele_column_choice() {
        // two rows that only differ in allele 2 collide when keyed on allele 1
        let table = VariantTable::from_text_rows(TableRole::Duplex, &HEADER, &[
            &["1", "100", "100", "G", "G", "A"],
            &["1", "100", "100", "G", "G", "T"]
        ]);
        assert_eq!(MutationKey::default().index(&table).unwrap().len(), 2);

        let result = MutationKey::new(TUMOR_SEQ_ALLELE1).index(&table);
        match result {
            Err(ReconcileError::DuplicateKey { table, key }) => {
                assert_eq!(table, TableRole::Duplex);
                assert_eq!(key, "1:100-100 G>G");
            },
            other => panic!("expected duplicate key, got {other:?}")
        }
    }

    #[test]
    fn test_index_errors() {
        // missing key column
        let table = VariantTable::from_text_rows(TableRole::Standard, &HEADER[..5], &[
            &["1", "100", "100", "G", "G"]
        ]);
        assert!(matches!(
            MutationKey::default().index(&table),
            Err(ReconcileError::MissingColumn { table: TableRole::Standard, .. })
        ));

        // bad position
        let table = VariantTable::from_text_rows(TableRole::Standard, &HEADER, &[
            &["1", "abc", "100", "G", "G", "A"]
        ]);
        assert!(matches!(
            MutationKey::default().index(&table),
            Err(ReconcileError::InvalidValue { row: 0, .. })
        ));

        // empty allele
        let table = VariantTable::from_text_rows(TableRole::Standard, &HEADER, &[
            &["1", "100", "100", "G", "G", ""]
        ]);
        assert!(matches!(
            MutationKey::default().index(&table),
            Err(ReconcileError::InvalidValue { .. })
        ));
    }
}
