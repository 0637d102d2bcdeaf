
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::data_types::maf_columns::TUMOR_SAMPLE_BARCODE;
use crate::data_types::read_category::{ReadCategory, TableRole};
use crate::data_types::sample_metadata::SampleMetadata;
use crate::data_types::variant_table::VariantTable;
use crate::gbcms::{run_gbcms, GbcmsJob, GbcmsOptions};
use crate::reconcile::all_sources::{create_all_maf_table, ReconcileInputs};
use crate::reconcile::errors::{ReconcileError, ReconcileStep, StepContext};
use crate::reconcile::simplex_duplex::create_duplex_simplex_table;
use crate::reconcile::summary::{generate_summary_field, SummaryColumns};
use crate::reconcile::ReconcileOptions;
use crate::util::file_io::{load_maf, save_maf};
use crate::util::pipeline_logger::PipelineLogger;

/// Controls where and how reconciled tables are written
#[derive(Clone, Debug, Default)]
pub struct MergeOptions {
    /// folder that receives every output MAF
    pub output_folder: PathBuf,
    /// mutation key and join policy
    pub reconcile: ReconcileOptions,
    /// if true, Tumor_Sample_Barcode of every output is replaced by the sample id
    pub override_sample_name: bool
}

/// Everything needed to genotype a sample and reconcile the results
#[derive(Clone, Debug)]
pub struct GenotypeOptions {
    /// the GBCMS executable
    pub gbcms_executable: PathBuf,
    /// the reference FASTA for every BAM
    pub reference: PathBuf,
    /// options passed to each GBCMS invocation
    pub gbcms: GbcmsOptions,
    /// options for the merge that follows genotyping
    pub merge: MergeOptions
}

/// The tables to reconcile for one sample; any may be absent
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MergeRequest {
    /// the sample or patient identifier, used as the output prefix
    pub sample_id: String,
    /// the pre-genotyping input MAF
    pub original_maf: Option<PathBuf>,
    /// the genotyped MAF for each read category
    pub genotyped: BTreeMap<ReadCategory, PathBuf>
}

/// One file written by a run
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ReportOutput {
    /// provenance label, e.g. "SIMPLEX-DUPLEX" or "ORG-STD-SIMPLEX-DUPLEX"
    pub label: String,
    /// where the table was written
    pub path: PathBuf,
    /// number of data rows written
    pub rows: usize
}

/// Intended to be serialized to JSON as the record of one sample run
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GenotypeReport {
    /// Version of the tool that generated the outputs
    genotype_variants_version: String,
    /// The sample identifier
    sample_id: String,
    /// GBCMS outputs by read category
    genotyped_files: BTreeMap<ReadCategory, PathBuf>,
    /// The reconciled tables that were written
    outputs: Vec<ReportOutput>,
    /// Wall time for the run
    elapsed_seconds: f64,
    /// When the run finished
    timestamp: DateTime<Utc>
}

impl GenotypeReport {
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn genotyped_files(&self) -> &BTreeMap<ReadCategory, PathBuf> {
        &self.genotyped_files
    }

    pub fn outputs(&self) -> &[ReportOutput] {
        &self.outputs
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Output file name for a sample and label, e.g. "P1-SIMPLEX_genotyped.maf"
pub fn genotyped_filename(sample_id: &str, label: &str) -> String {
    format!("{sample_id}-{label}_genotyped.maf")
}

/// Genotypes every supplied BAM for one sample with GBCMS, then reconciles the results with the input MAF.
/// BAMs are processed one at a time in the order standard, duplex, simplex.
/// # Arguments
/// * `sample` - the sample id, input MAF, and BAMs
/// * `options` - GBCMS and merge options
/// # Errors
/// * if no BAMs are provided, or only one of simplex and duplex
/// * if any GBCMS invocation fails
/// * if reconciliation or writing fails
pub fn genotype_sample(sample: &SampleMetadata, options: &GenotypeOptions) -> Result<GenotypeReport, ReconcileError> {
    let logger = PipelineLogger::new(&sample.sample_id);
    let bams = sample.bams();
    if bams.is_empty() {
        return Err(ReconcileError::InsufficientInput {
            reason: format!("no BAM files were provided for sample {}", sample.sample_id)
        });
    }

    let mut request = MergeRequest {
        sample_id: sample.sample_id.clone(),
        original_maf: Some(sample.maf.clone()),
        genotyped: Default::default()
    };
    check_simplex_duplex_pair(&request.sample_id, bams.iter().map(|(c, _)| *c))?;

    for (category, bam) in bams.into_iter() {
        let job = GbcmsJob {
            executable: options.gbcms_executable.clone(),
            maf: sample.maf.clone(),
            reference: options.reference.clone(),
            bam: bam.to_path_buf(),
            sample_name: category.tag_barcode(&sample.sample_id),
            output: options.merge.output_folder.join(genotyped_filename(&sample.sample_id, &category.to_string()))
        };
        let output = run_gbcms(&job, &options.gbcms).in_step(ReconcileStep::Genotyping)?;
        logger.event("genotype", &format!("category={category} output={output:?}"));
        request.genotyped.insert(category, output);
    }

    merge_with_logger(&request, &options.merge, &logger)
}

/// Reconciles already-genotyped MAFs for one sample and writes the results.
/// Writes `<id>-SIMPLEX-DUPLEX_genotyped.maf` when both simplex and duplex are present,
/// and `<id>-<label>_genotyped.maf` when at least two of original, standard, and simplex-duplex are available.
/// Nothing is written unless every output was computed.
/// # Arguments
/// * `request` - the sample id and input MAFs
/// * `options` - output folder and reconcile options
/// # Errors
/// * if only one of simplex and duplex is provided, or there is nothing to merge
/// * if a genotyped MAF does not exist
/// * if any reconciliation step fails, or an output cannot be written
pub fn merge_genotyped_mafs(request: &MergeRequest, options: &MergeOptions) -> Result<GenotypeReport, ReconcileError> {
    let logger = PipelineLogger::new(&request.sample_id);
    merge_with_logger(request, options, &logger)
}

/// Runs [`genotype_sample`] for every sample in order, stopping at the first failure
/// # Errors
/// * the first error from any sample
pub fn genotype_batch(samples: &[SampleMetadata], options: &GenotypeOptions) -> Result<Vec<GenotypeReport>, ReconcileError> {
    let mut reports = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        info!("Processing sample {} ({} / {})...", sample.sample_id, i + 1, samples.len());
        match genotype_sample(sample, options) {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!("Sample {} failed, remaining samples are skipped", sample.sample_id);
                return Err(e);
            }
        }
    }
    Ok(reports)
}

/// Simplex and duplex only make sense together
fn check_simplex_duplex_pair(sample_id: &str, categories: impl Iterator<Item = ReadCategory>) -> Result<(), ReconcileError> {
    let (mut simplex, mut duplex) = (false, false);
    for category in categories {
        match category {
            ReadCategory::Simplex => simplex = true,
            ReadCategory::Duplex => duplex = true,
            _ => {}
        }
    }
    if simplex != duplex {
        let (have, missing) = if simplex { ("simplex", "duplex") } else { ("duplex", "simplex") };
        return Err(ReconcileError::InsufficientInput {
            reason: format!("sample {sample_id} has a {have} input but no {missing} input, both are required for simplex-duplex merging")
        });
    }
    Ok(())
}

fn merge_with_logger(request: &MergeRequest, options: &MergeOptions, logger: &PipelineLogger) -> Result<GenotypeReport, ReconcileError> {
    let sample_id = request.sample_id.as_str();
    check_simplex_duplex_pair(sample_id, request.genotyped.keys().copied())?;

    let original = match request.original_maf.as_ref() {
        Some(path) => Some(load_maf(path, TableRole::Original).in_step(ReconcileStep::LoadOriginal)?),
        None => None
    };
    let standard = load_genotyped(request, ReadCategory::Standard)?;
    let duplex = load_genotyped(request, ReadCategory::Duplex)?;
    let simplex = load_genotyped(request, ReadCategory::Simplex)?;
    for table in [&original, &standard, &duplex, &simplex].into_iter().flatten() {
        logger.table("load", table);
    }

    let summary_columns = SummaryColumns::default();
    let simplex_duplex: Option<VariantTable> = match (simplex.as_ref(), duplex.as_ref()) {
        (Some(s), Some(d)) => {
            let merged = create_duplex_simplex_table(s, d, &options.reconcile, logger)?;
            Some(generate_summary_field(&merged, &summary_columns).in_step(ReconcileStep::Summary)?)
        },
        _ => None
    };

    let available = [original.is_some(), standard.is_some(), simplex_duplex.is_some()].into_iter()
        .filter(|&b| b)
        .count();
    let combined: Option<(&'static str, VariantTable)> = if available >= 2 {
        let inputs = ReconcileInputs::from_tables(original.as_ref(), standard.as_ref(), simplex_duplex.as_ref())?;
        let mut table = create_all_maf_table(&inputs, &options.reconcile, logger)?;
        if inputs.has_simplex_duplex() {
            table = generate_summary_field(&table, &summary_columns).in_step(ReconcileStep::Summary)?;
        }
        Some((inputs.label(), table))
    } else {
        None
    };

    let mut outputs: Vec<(String, VariantTable)> = vec![];
    if let Some(mut table) = simplex_duplex {
        if options.override_sample_name {
            override_barcode(&mut table, &ReadCategory::SimplexDuplex.tag_barcode(sample_id));
        }
        outputs.push((ReadCategory::SimplexDuplex.to_string(), table));
    }
    if let Some((label, mut table)) = combined {
        if options.override_sample_name {
            override_barcode(&mut table, sample_id);
        }
        outputs.push((label.to_string(), table));
    }

    if outputs.is_empty() {
        return Err(ReconcileError::InsufficientInput {
            reason: format!("sample {sample_id} needs simplex and duplex inputs, or at least two of original, standard, and simplex-duplex")
        });
    }

    // everything is computed, now write it all out
    let mut written: Vec<ReportOutput> = Vec::with_capacity(outputs.len());
    for (label, table) in outputs.iter() {
        let path = options.output_folder.join(genotyped_filename(sample_id, label));
        save_maf(table, &path).in_step(ReconcileStep::WriteTable)?;
        logger.event("write", &format!("label={label} rows={} path={path:?}", table.num_rows()));
        written.push(ReportOutput {
            label: label.clone(),
            path,
            rows: table.num_rows()
        });
    }

    Ok(GenotypeReport {
        genotype_variants_version: crate::cli::core::FULL_VERSION.to_string(),
        sample_id: sample_id.to_string(),
        genotyped_files: request.genotyped.clone(),
        outputs: written,
        elapsed_seconds: logger.elapsed().as_secs_f64(),
        timestamp: Utc::now()
    })
}

/// Loads one genotyped MAF if the request has it; a listed file that does not exist means GBCMS never produced it
fn load_genotyped(request: &MergeRequest, category: ReadCategory) -> Result<Option<VariantTable>, ReconcileError> {
    let path: &Path = match request.genotyped.get(&category) {
        Some(p) => p,
        None => return Ok(None)
    };
    if !path.exists() {
        return Err(ReconcileError::StepFailed {
            step: ReconcileStep::LoadTable,
            source: Box::new(ReconcileError::ExternalToolFailure {
                reason: format!("{category} genotyped MAF {path:?} was not produced")
            })
        });
    }
    let table = load_maf(path, category.into()).in_step(ReconcileStep::LoadTable)?;
    Ok(Some(table))
}

/// Replaces every sample barcode with a fixed value
fn override_barcode(table: &mut VariantTable, barcode: &str) {
    let values = vec![Some(barcode.to_string()); table.num_rows()];
    table.set_column(TUMOR_SAMPLE_BARCODE, values);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from("./test_data").join(name)
    }

    fn full_request() -> MergeRequest {
        MergeRequest {
            sample_id: "P1".to_string(),
            original_maf: Some(fixture("original.maf")),
            genotyped: [
                (ReadCategory::Standard, fixture("standard_genotyped.maf")),
                (ReadCategory::Duplex, fixture("duplex_genotyped.maf")),
                (ReadCategory::Simplex, fixture("simplex_genotyped.maf"))
            ].into_iter().collect()
        }
    }

    fn merge_options(folder: &Path) -> MergeOptions {
        MergeOptions {
            output_folder: folder.to_path_buf(),
            ..Default::default()
        }
    }

    fn row_of(table: &VariantTable, start: &str) -> usize {
        (0..table.num_rows())
            .find(|&r| table.value(r, "Start_Position").unwrap() == Some(start))
            .unwrap()
    }

    #[test]
    fn test_merge_all_sources() {
        let dir = tempfile::tempdir().unwrap();
        let report = merge_genotyped_mafs(&full_request(), &merge_options(dir.path())).unwrap();
        assert_eq!(report.sample_id(), "P1");
        assert_eq!(report.genotyped_files().len(), 3);
        let labels: Vec<&str> = report.outputs().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["SIMPLEX-DUPLEX", "ORG-STD-SIMPLEX-DUPLEX"]);

        let sd_path = dir.path().join("P1-SIMPLEX-DUPLEX_genotyped.maf");
        let sd = load_maf(&sd_path, TableRole::SimplexDuplex).unwrap();
        assert_eq!(sd.num_rows(), 3);
        // sorted by chromosome then position
        assert_eq!(sd.value(0, "Hugo_Symbol").unwrap(), Some("KRAS"));
        let row = row_of(&sd, "7577120");
        assert_eq!(sd.value(row, "Tumor_Sample_Barcode").unwrap(), Some("P1-SIMPLEX-DUPLEX"));
        assert_eq!(sd.value(row, "summary_fragment").unwrap(), Some("DP=1550;RD=1549;AD=1;VF=0.0006"));
        let row = row_of(&sd, "25398284");
        assert_eq!(sd.value(row, "t_total_count_fragment_simplex_duplex").unwrap(), Some("1317"));
        assert_eq!(sd.value(row, "t_vaf_fragment_simplex_duplex").unwrap(), Some("0.0038"));

        let all_path = dir.path().join("P1-ORG-STD-SIMPLEX-DUPLEX_genotyped.maf");
        assert_eq!(report.outputs()[1].path, all_path);
        assert_eq!(report.outputs()[1].rows, 3);
        let all = load_maf(&all_path, TableRole::Combined).unwrap();
        // original row order and columns lead
        assert_eq!(all.value(0, "Hugo_Symbol").unwrap(), Some("TP53"));
        assert_eq!(all.value(0, "Tumor_Sample_Barcode").unwrap(), Some("P1"));
        assert_eq!(all.value(0, "t_ref_count").unwrap(), Some("50"));
        assert_eq!(all.value(0, "t_ref_count_reverse_standard").unwrap(), Some("250"));
        assert_eq!(all.value(0, "summary_fragment").unwrap(), Some("DP=1550;RD=1549;AD=1;VF=0.0006"));
        let row = row_of(&all, "37880220");
        assert_eq!(all.value(row, "t_total_count_fragment_simplex_duplex").unwrap(), Some("537"));
        assert_eq!(all.value(row, "summary_fragment").unwrap(), Some("DP=537;RD=537;AD=0;VF=0"));
    }

    #[test]
    fn test_merge_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.genotyped.remove(&ReadCategory::Duplex);
        request.genotyped.remove(&ReadCategory::Simplex);
        let report = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap();
        assert_eq!(report.outputs().len(), 1);
        assert_eq!(report.outputs()[0].label, "ORG-STD");
        let table = load_maf(&report.outputs()[0].path, TableRole::Combined).unwrap();
        assert!(!table.has_column("summary_fragment"));

        // simplex and duplex alone give only the simplex-duplex table
        let mut request = full_request();
        request.original_maf = None;
        request.genotyped.remove(&ReadCategory::Standard);
        let report = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap();
        let labels: Vec<&str> = report.outputs().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["SIMPLEX-DUPLEX"]);

        let mut request = full_request();
        request.original_maf = None;
        let report = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap();
        assert_eq!(report.outputs()[1].label, "STD-SIMPLEX-DUPLEX");
    }

    #[test]
    fn test_merge_insufficient() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.genotyped.remove(&ReadCategory::Duplex);
        let err = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap_err();
        assert!(matches!(err, ReconcileError::InsufficientInput { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let request = MergeRequest {
            sample_id: "P1".to_string(),
            original_maf: Some(fixture("original.maf")),
            genotyped: Default::default()
        };
        let err = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap_err();
        assert!(matches!(err, ReconcileError::InsufficientInput { .. }));
    }

    #[test]
    fn test_merge_missing_genotyped() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.genotyped.insert(ReadCategory::Duplex, dir.path().join("P1-DUPLEX_genotyped.maf"));
        let err = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap_err();
        assert!(err.is_external());
        assert!(matches!(err, ReconcileError::StepFailed { step: ReconcileStep::LoadTable, .. }));
    }

    #[test]
    fn test_merge_missing_original() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.original_maf = Some(dir.path().join("P1.maf"));
        let err = merge_genotyped_mafs(&request, &merge_options(dir.path())).unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, ReconcileError::StepFailed { step: ReconcileStep::LoadOriginal, .. }));
        assert!(err.to_string().starts_with("loading the original MAF failed"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_merge_writes_nothing_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken_standard.maf");
        let text = std::fs::read_to_string(fixture("standard_genotyped.maf")).unwrap()
            .replacen("t_total_count_forward", "t_total_count_fwd", 1);
        std::fs::write(&broken, text).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let mut request = full_request();
        request.genotyped.insert(ReadCategory::Standard, broken);
        let err = merge_genotyped_mafs(&request, &merge_options(out_dir.path())).unwrap_err();
        assert!(matches!(err.root_cause(), ReconcileError::MissingColumn { table: TableRole::Standard, .. }));
        // the simplex-duplex table was fine, but is not written either
        assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_override_sample_name() {
        let dir = tempfile::tempdir().unwrap();
        let options = MergeOptions {
            output_folder: dir.path().to_path_buf(),
            reconcile: ReconcileOptions::default(),
            override_sample_name: true
        };
        let mut request = full_request();
        request.sample_id = "PATIENT-7".to_string();
        let report = merge_genotyped_mafs(&request, &options).unwrap();

        let sd = load_maf(&report.outputs()[0].path, TableRole::SimplexDuplex).unwrap();
        assert!((0..sd.num_rows()).all(|r| sd.value(r, "Tumor_Sample_Barcode").unwrap() == Some("PATIENT-7-SIMPLEX-DUPLEX")));
        let all = load_maf(&report.outputs()[1].path, TableRole::Combined).unwrap();
        assert!((0..all.num_rows()).all(|r| all.value(r, "Tumor_Sample_Barcode").unwrap() == Some("PATIENT-7")));
        assert!(report.outputs()[1].path.ends_with("PATIENT-7-ORG-STD-SIMPLEX-DUPLEX_genotyped.maf"));
    }

    #[test]
    fn test_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = merge_genotyped_mafs(&full_request(), &merge_options(dir.path())).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"SIMPLEX\""));
        assert!(json.contains("\"sample_id\":\"P1\""));
        let parsed: GenotypeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.outputs(), report.outputs());
        assert_eq!(parsed.timestamp(), report.timestamp());
        assert!(parsed.elapsed_seconds() >= 0.0);
    }

    #[test]
    fn test_genotype_no_bams() {
        let dir = tempfile::tempdir().unwrap();
        let sample = SampleMetadata {
            sample_id: "P1".to_string(),
            maf: fixture("original.maf"),
            standard_bam: None,
            duplex_bam: None,
            simplex_bam: None
        };
        let options = GenotypeOptions {
            gbcms_executable: PathBuf::from("GetBaseCountsMultiSample"),
            reference: PathBuf::from("ref.fa"),
            gbcms: GbcmsOptions::default(),
            merge: merge_options(dir.path())
        };
        let err = genotype_sample(&sample, &options).unwrap_err();
        assert!(matches!(err, ReconcileError::InsufficientInput { .. }));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        use std::os::unix::fs::PermissionsExt;

        /// Stand-in GBCMS that copies the "BAM" (a genotyped fixture) to the output
        const FAKE_GBCMS: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --bam) bam="${2#*:}"; shift 2;;
    --output) out="$2"; shift 2;;
    *) shift;;
  esac
done
cp "$bam" "$out"
"#;

        fn genotype_options(folder: &Path) -> GenotypeOptions {
            let script = folder.join("fake_gbcms.sh");
            std::fs::write(&script, FAKE_GBCMS).unwrap();
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
            GenotypeOptions {
                gbcms_executable: script,
                reference: PathBuf::from("ref.fa"),
                gbcms: GbcmsOptions::default(),
                merge: merge_options(folder)
            }
        }

        fn sample(id: &str) -> SampleMetadata {
            SampleMetadata {
                sample_id: id.to_string(),
                maf: fixture("original.maf"),
                standard_bam: Some(fixture("standard_genotyped.maf")),
                duplex_bam: Some(fixture("duplex_genotyped.maf")),
                simplex_bam: Some(fixture("simplex_genotyped.maf"))
            }
        }

        #[test]
        fn test_genotype_sample() {
            let dir = tempfile::tempdir().unwrap();
            let options = genotype_options(dir.path());
            let report = genotype_sample(&sample("P1"), &options).unwrap();

            for category in [ReadCategory::Standard, ReadCategory::Duplex, ReadCategory::Simplex] {
                let expected = dir.path().join(genotyped_filename("P1", &category.to_string()));
                assert_eq!(report.genotyped_files().get(&category), Some(&expected));
                assert!(expected.is_file());
            }
            assert_eq!(report.outputs().len(), 2);
            assert!(dir.path().join("P1-SIMPLEX-DUPLEX_genotyped.maf").is_file());
            assert!(dir.path().join("P1-ORG-STD-SIMPLEX-DUPLEX_genotyped.maf").is_file());
        }

        #[test]
        fn test_genotype_batch_stops() {
            let dir = tempfile::tempdir().unwrap();
            let options = genotype_options(dir.path());
            let mut bad = sample("P2");
            bad.duplex_bam = None;
            let samples = vec![sample("P1"), bad, sample("P3")];

            let err = genotype_batch(&samples, &options).unwrap_err();
            assert!(matches!(err, ReconcileError::InsufficientInput { .. }));
            assert!(dir.path().join("P1-ORG-STD-SIMPLEX-DUPLEX_genotyped.maf").is_file());
            assert!(!dir.path().join("P3-STANDARD_genotyped.maf").exists());

            let reports = genotype_batch(&samples[..1], &options).unwrap();
            assert_eq!(reports.len(), 1);
        }
    }
}
