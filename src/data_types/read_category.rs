
use serde::{Deserialize, Serialize};

/// The sequencing read categories we genotype and reconcile.
/// The display form is the tag used in sample barcodes and output file names.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ReadCategory {
    /// Unfiltered reads from the standard BAM
    #[strum(to_string = "STANDARD")]
    Standard,
    /// Duplex consensus reads
    #[strum(to_string = "DUPLEX")]
    Duplex,
    /// Simplex consensus reads
    #[strum(to_string = "SIMPLEX")]
    Simplex,
    /// Combined simplex and duplex fragments, only produced by reconciliation
    #[strum(to_string = "SIMPLEX-DUPLEX")]
    SimplexDuplex
}

impl ReadCategory {
    /// Suffix appended to the sample barcode, e.g. "-SIMPLEX"
    pub fn barcode_suffix(&self) -> String {
        format!("-{self}")
    }

    /// Suffix appended to count column names, e.g. "simplex_duplex"
    pub fn column_suffix(&self) -> &'static str {
        match self {
            ReadCategory::Standard => "standard",
            ReadCategory::Duplex => "duplex",
            ReadCategory::Simplex => "simplex",
            ReadCategory::SimplexDuplex => "simplex_duplex"
        }
    }

    /// Strips this category's barcode suffix, if present
    /// # Arguments
    /// * `barcode` - the sample barcode to strip
    pub fn strip_barcode<'a>(&self, barcode: &'a str) -> &'a str {
        barcode.strip_suffix(&self.barcode_suffix()).unwrap_or(barcode)
    }

    /// Appends this category's barcode suffix
    pub fn tag_barcode(&self, barcode: &str) -> String {
        format!("{barcode}{}", self.barcode_suffix())
    }
}

/// The role a table plays within a reconciliation, used for error reporting and logging
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TableRole {
    /// The pre-genotyping input MAF
    Original,
    /// GBCMS output for the standard BAM
    Standard,
    /// GBCMS output for the simplex BAM
    Simplex,
    /// GBCMS output for the duplex BAM
    Duplex,
    /// The reconciled simplex and duplex table
    SimplexDuplex,
    /// The reconciled multi-source table
    Combined
}

impl From<ReadCategory> for TableRole {
    fn from(category: ReadCategory) -> Self {
        match category {
            ReadCategory::Standard => TableRole::Standard,
            ReadCategory::Duplex => TableRole::Duplex,
            ReadCategory::Simplex => TableRole::Simplex,
            ReadCategory::SimplexDuplex => TableRole::SimplexDuplex
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_tags() {
        assert_eq!(ReadCategory::Simplex.tag_barcode("C-ABC123-L001-d"), "C-ABC123-L001-d-SIMPLEX");
        assert_eq!(ReadCategory::SimplexDuplex.tag_barcode("P1"), "P1-SIMPLEX-DUPLEX");

        // only a trailing tag is stripped
        assert_eq!(ReadCategory::Duplex.strip_barcode("P1-DUPLEX"), "P1");
        assert_eq!(ReadCategory::Duplex.strip_barcode("P1-DUPLEX-X"), "P1-DUPLEX-X");
        assert_eq!(ReadCategory::Standard.strip_barcode("P1"), "P1");

        // the combined tag contains the duplex tag as a suffix
        assert_eq!(ReadCategory::SimplexDuplex.strip_barcode("P1-SIMPLEX-DUPLEX"), "P1");
        assert_eq!(ReadCategory::Duplex.strip_barcode("P1-SIMPLEX-DUPLEX"), "P1-SIMPLEX");
    }

    #[test]
    fn test_table_role_display() {
        assert_eq!(TableRole::SimplexDuplex.to_string(), "simplex_duplex");
        assert_eq!(TableRole::from(ReadCategory::Standard), TableRole::Standard);
    }
}
