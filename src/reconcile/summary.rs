
use serde::{Deserialize, Serialize};

use crate::data_types::fragment_counts::format_vaf;
use crate::data_types::maf_columns::{category_column, SUMMARY_FRAGMENT, T_ALT_COUNT_FRAGMENT, T_REF_COUNT_FRAGMENT, T_VAF_FRAGMENT};
use crate::data_types::read_category::ReadCategory;
use crate::data_types::variant_table::{is_missing, VariantTable};
use crate::reconcile::errors::ReconcileError;

/// Which columns feed the summary, and where it is written
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SummaryColumns {
    /// reference fragment count column
    pub ref_column: String,
    /// alternate fragment count column
    pub alt_column: String,
    /// allele fraction column
    pub vaf_column: String,
    /// the summary column to write
    pub output_column: String
}

impl Default for SummaryColumns {
    fn default() -> Self {
        Self {
            ref_column: category_column(T_REF_COUNT_FRAGMENT, ReadCategory::SimplexDuplex),
            alt_column: category_column(T_ALT_COUNT_FRAGMENT, ReadCategory::SimplexDuplex),
            vaf_column: category_column(T_VAF_FRAGMENT, ReadCategory::SimplexDuplex),
            output_column: SUMMARY_FRAGMENT.to_string()
        }
    }
}

/// Adds a compact genotype string to every row: `DP=<ref+alt>;RD=<ref>;AD=<alt>;VF=<vaf>`.
/// The input table is not modified, and an existing summary column is overwritten.
/// # Arguments
/// * `table` - a table containing the count and VAF columns
/// * `columns` - the input and output column names
/// # Errors
/// * if any of the input columns are missing
/// * if a count or VAF cell cannot be parsed
pub fn generate_summary_field(table: &VariantTable, columns: &SummaryColumns) -> Result<VariantTable, ReconcileError> {
    let ref_counts = table.count_column(&columns.ref_column)?;
    let alt_counts = table.count_column(&columns.alt_column)?;
    let vaf_position = table.column_position(&columns.vaf_column)?;

    let mut summaries: Vec<Option<String>> = Vec::with_capacity(table.num_rows());
    for (row, (ref_count, alt_count)) in ref_counts.into_iter().zip(alt_counts).enumerate() {
        let (ref_count, alt_count) = match (ref_count, alt_count) {
            (Some(r), Some(a)) => (r, a),
            _ => {
                summaries.push(None);
                continue;
            }
        };

        let vaf_text = table.cell(row, vaf_position).unwrap_or("");
        let vaf: f64 = if is_missing(vaf_text) {
            0.0
        } else {
            vaf_text.trim().parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ReconcileError::InvalidValue {
                    table: table.role(),
                    column: columns.vaf_column.clone(),
                    row,
                    value: vaf_text.to_string()
                })?
        };

        summaries.push(Some(format!(
            "DP={};RD={ref_count};AD={alt_count};VF={}",
            ref_count + alt_count, format_vaf(vaf)
        )));
    }

    let mut summarized = table.clone();
    summarized.set_column(&columns.output_column, summaries);
    Ok(summarized)
}
