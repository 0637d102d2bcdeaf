
use lazy_static::lazy_static;

use crate::data_types::read_category::ReadCategory;

// MAF identity columns
pub const CHROMOSOME: &str = "Chromosome";
pub const START_POSITION: &str = "Start_Position";
pub const END_POSITION: &str = "End_Position";
pub const REFERENCE_ALLELE: &str = "Reference_Allele";
pub const TUMOR_SEQ_ALLELE1: &str = "Tumor_Seq_Allele1";
pub const TUMOR_SEQ_ALLELE2: &str = "Tumor_Seq_Allele2";
pub const TUMOR_SAMPLE_BARCODE: &str = "Tumor_Sample_Barcode";

// raw fragment counts, as written by GBCMS in fragment mode
pub const T_REF_COUNT_FRAGMENT: &str = "t_ref_count_fragment";
pub const T_ALT_COUNT_FRAGMENT: &str = "t_alt_count_fragment";
pub const T_TOTAL_COUNT_FRAGMENT: &str = "t_total_count_fragment";
pub const T_VAF_FRAGMENT: &str = "t_vaf_fragment";

// raw read counts from the standard BAM
pub const T_REF_COUNT: &str = "t_ref_count";
pub const T_ALT_COUNT: &str = "t_alt_count";
pub const T_TOTAL_COUNT: &str = "t_total_count";
pub const T_VARIANT_FREQUENCY: &str = "t_variant_frequency";
pub const T_REF_COUNT_FORWARD: &str = "t_ref_count_forward";
pub const T_ALT_COUNT_FORWARD: &str = "t_alt_count_forward";
pub const T_TOTAL_COUNT_FORWARD: &str = "t_total_count_forward";
pub const T_REF_COUNT_REVERSE: &str = "t_ref_count_reverse";
pub const T_ALT_COUNT_REVERSE: &str = "t_alt_count_reverse";
pub const T_TOTAL_COUNT_REVERSE: &str = "t_total_count_reverse";

/// The compact genotype string column
pub const SUMMARY_FRAGMENT: &str = "summary_fragment";

/// Appends the category column suffix to a base column name
/// # Arguments
/// * `column` - the base column, e.g. `t_ref_count_fragment`
/// * `category` - the category providing the suffix
/// # Examples
/// * `t_ref_count_fragment` + Simplex => `t_ref_count_fragment_simplex`
pub fn category_column(column: &str, category: ReadCategory) -> String {
    format!("{column}_{}", category.column_suffix())
}

lazy_static! {
    /// Raw standard columns that get the `_standard` suffix, in output order
    pub static ref STANDARD_RENAMED: Vec<&'static str> = vec![
        T_REF_COUNT, T_ALT_COUNT, T_TOTAL_COUNT, T_VARIANT_FREQUENCY,
        T_REF_COUNT_FORWARD, T_ALT_COUNT_FORWARD, T_TOTAL_COUNT_FORWARD
    ];

    /// (total, forward, reverse) base columns for the strand derivation
    pub static ref STRAND_TRIPLES: Vec<(&'static str, &'static str, &'static str)> = vec![
        (T_REF_COUNT, T_REF_COUNT_FORWARD, T_REF_COUNT_REVERSE),
        (T_ALT_COUNT, T_ALT_COUNT_FORWARD, T_ALT_COUNT_REVERSE),
        (T_TOTAL_COUNT, T_TOTAL_COUNT_FORWARD, T_TOTAL_COUNT_REVERSE)
    ];

    /// Every standard column carried into a reconciled table
    pub static ref STANDARD_COLUMNS: Vec<String> = {
        let mut columns: Vec<String> = STANDARD_RENAMED.iter()
            .map(|c| category_column(c, ReadCategory::Standard))
            .collect();
        columns.extend(STRAND_TRIPLES.iter().map(|(_, _, r)| category_column(r, ReadCategory::Standard)));
        columns
    };

    /// Every fragment column carried into a reconciled table: simplex, duplex, then combined
    pub static ref FRAGMENT_COLUMNS: Vec<String> = {
        [ReadCategory::Simplex, ReadCategory::Duplex, ReadCategory::SimplexDuplex].into_iter()
            .flat_map(fragment_columns)
            .collect()
    };
}

/// The four fragment columns (ref, alt, total, vaf) for a single category
pub fn fragment_columns(category: ReadCategory) -> [String; 4] {
    [
        category_column(T_REF_COUNT_FRAGMENT, category),
        category_column(T_ALT_COUNT_FRAGMENT, category),
        category_column(T_TOTAL_COUNT_FRAGMENT, category),
        category_column(T_VAF_FRAGMENT, category)
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_column() {
        assert_eq!(category_column(T_REF_COUNT_FRAGMENT, ReadCategory::Simplex), "t_ref_count_fragment_simplex");
        assert_eq!(category_column(T_VAF_FRAGMENT, ReadCategory::SimplexDuplex), "t_vaf_fragment_simplex_duplex");
        assert_eq!(category_column(T_ALT_COUNT_FORWARD, ReadCategory::Standard), "t_alt_count_forward_standard");
    }

    #[test]
    fn test_column_lists() {
        assert_eq!(STANDARD_COLUMNS.len(), 10);
        assert_eq!(STANDARD_COLUMNS[0], "t_ref_count_standard");
        assert_eq!(STANDARD_COLUMNS[9], "t_total_count_reverse_standard");

        assert_eq!(FRAGMENT_COLUMNS.len(), 12);
        assert_eq!(FRAGMENT_COLUMNS[0], "t_ref_count_fragment_simplex");
        assert_eq!(FRAGMENT_COLUMNS[7], "t_vaf_fragment_duplex");
        assert_eq!(FRAGMENT_COLUMNS[11], "t_vaf_fragment_simplex_duplex");
    }
}
