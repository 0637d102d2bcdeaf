
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data_types::read_category::ReadCategory;

/// One row of the batch metadata file: a sample, its input MAF, and whichever BAMs were sequenced
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SampleMetadata {
    /// the sample or patient identifier, used as the output prefix
    pub sample_id: String,
    /// the MAF listing the variants to genotype
    pub maf: PathBuf,
    /// optional standard BAM
    #[serde(default)]
    pub standard_bam: Option<PathBuf>,
    /// optional duplex BAM
    #[serde(default)]
    pub duplex_bam: Option<PathBuf>,
    /// optional simplex BAM
    #[serde(default)]
    pub simplex_bam: Option<PathBuf>
}

impl SampleMetadata {
    /// The supplied BAMs in genotyping order: standard, duplex, simplex
    pub fn bams(&self) -> Vec<(ReadCategory, &Path)> {
        [
            (ReadCategory::Standard, self.standard_bam.as_deref()),
            (ReadCategory::Duplex, self.duplex_bam.as_deref()),
            (ReadCategory::Simplex, self.simplex_bam.as_deref())
        ].into_iter()
            .filter_map(|(category, opt_bam)| opt_bam.map(|bam| (category, bam)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bams() {
        let sample = SampleMetadata {
            sample_id: "P1".to_string(),
            maf: PathBuf::from("P1.maf"),
            standard_bam: Some(PathBuf::from("P1-STD.bam")),
            duplex_bam: None,
            simplex_bam: Some(PathBuf::from("P1-SIMPLEX.bam"))
        };
        assert_eq!(sample.bams(), vec![
            (ReadCategory::Standard, Path::new("P1-STD.bam")),
            (ReadCategory::Simplex, Path::new("P1-SIMPLEX.bam"))
        ]);
    }
}
