
use clap::Args;
use log::info;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_required_filename};
use crate::cli::shared::{check_gbcms_args, check_reconcile_args, GbcmsArgs, ReconcileArgs};
use crate::genotyper::{GenotypeOptions, MergeOptions};

#[derive(Args, Clone)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct MultipleSamplesSettings {
    /// Sample metadata with columns sample_id, maf, standard_bam, duplex_bam, simplex_bam (TSV, or CSV if it ends in .csv)
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub metadata_filename: PathBuf,

    /// Output folder for the genotyped and reconciled MAFs
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(default_value = ".")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Optional report for every sample (JSON)
    #[clap(long = "report")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub report_filename: Option<PathBuf>,

    #[clap(flatten)]
    pub gbcms: GbcmsArgs,

    #[clap(flatten)]
    pub reconcile: ReconcileArgs,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl MultipleSamplesSettings {
    pub fn genotype_options(&self) -> GenotypeOptions {
        GenotypeOptions {
            gbcms_executable: self.gbcms.gbcms_path.clone(),
            reference: self.gbcms.reference_filename.clone(),
            gbcms: self.gbcms.gbcms_options(),
            merge: MergeOptions {
                output_folder: self.output_folder.clone(),
                reconcile: self.reconcile.reconcile_options(),
                override_sample_name: self.reconcile.override_sample_name
            }
        }
    }
}

pub fn check_multiple_samples_settings(mut settings: MultipleSamplesSettings) -> Result<MultipleSamplesSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");
    check_required_filename(&settings.metadata_filename, "Sample metadata");
    check_required_filename(&settings.gbcms.reference_filename, "Reference FASTA");
    info!("\tMetadata: {:?}", settings.metadata_filename);

    info!("Outputs:");
    info!("\tOutput folder: {:?}", settings.output_folder);
    if let Some(filename) = settings.report_filename.as_ref() {
        info!("\tReport: {filename:?}");
    }

    settings.gbcms = check_gbcms_args(settings.gbcms)?;
    settings.reconcile = check_reconcile_args(settings.reconcile)?;
    Ok(settings)
}
