
use clap::Args;
use log::info;
use simple_error::bail;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_optional_filename, check_required_filename};
use crate::cli::shared::{check_gbcms_args, check_reconcile_args, GbcmsArgs, ReconcileArgs};
use crate::data_types::sample_metadata::SampleMetadata;
use crate::genotyper::{GenotypeOptions, MergeOptions};

#[derive(Args, Clone)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct GenerateSettings {
    /// Sample or patient identifier, used as the output prefix
    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "patient-id")]
    #[clap(value_name = "ID")]
    #[clap(help_heading = Some("Input/Output"))]
    pub sample_id: String,

    /// Input MAF listing the variants to genotype
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "maf")]
    #[clap(value_name = "MAF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub maf_filename: PathBuf,

    /// Standard (unfiltered) BAM
    #[clap(short = 'b')]
    #[clap(long = "standard-bam")]
    #[clap(value_name = "BAM")]
    #[clap(help_heading = Some("Input/Output"))]
    pub standard_bam: Option<PathBuf>,

    /// Duplex consensus BAM, requires --simplex-bam
    #[clap(short = 'd')]
    #[clap(long = "duplex-bam")]
    #[clap(value_name = "BAM")]
    #[clap(help_heading = Some("Input/Output"))]
    pub duplex_bam: Option<PathBuf>,

    /// Simplex consensus BAM, requires --duplex-bam
    #[clap(short = 's')]
    #[clap(long = "simplex-bam")]
    #[clap(value_name = "BAM")]
    #[clap(help_heading = Some("Input/Output"))]
    pub simplex_bam: Option<PathBuf>,

    /// Output folder for the genotyped and reconciled MAFs
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(default_value = ".")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Optional run report (JSON)
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

impl GenerateSettings {
    /// The sample to genotype
    pub fn sample(&self) -> SampleMetadata {
        SampleMetadata {
            sample_id: self.sample_id.clone(),
            maf: self.maf_filename.clone(),
            standard_bam: self.standard_bam.clone(),
            duplex_bam: self.duplex_bam.clone(),
            simplex_bam: self.simplex_bam.clone()
        }
    }

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

pub fn check_generate_settings(mut settings: GenerateSettings) -> Result<GenerateSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.maf_filename, "Input MAF");
    check_required_filename(&settings.gbcms.reference_filename, "Reference FASTA");
    check_optional_filename(settings.standard_bam.as_deref(), "Standard BAM");
    check_optional_filename(settings.duplex_bam.as_deref(), "Duplex BAM");
    check_optional_filename(settings.simplex_bam.as_deref(), "Simplex BAM");

    if settings.sample_id.trim().is_empty() {
        bail!("--patient-id cannot be empty");
    }
    info!("\tSample: {}", settings.sample_id);
    info!("\tMAF: {:?}", settings.maf_filename);

    if settings.standard_bam.is_none() && settings.duplex_bam.is_none() && settings.simplex_bam.is_none() {
        bail!("Must provide at least one of --standard-bam, --duplex-bam, or --simplex-bam.");
    }
    if settings.duplex_bam.is_some() != settings.simplex_bam.is_some() {
        bail!("--duplex-bam and --simplex-bam must be provided together.");
    }
    for (label, opt_bam) in [("Standard", &settings.standard_bam), ("Duplex", &settings.duplex_bam), ("Simplex", &settings.simplex_bam)] {
        if let Some(bam) = opt_bam.as_ref() {
            info!("\t{label} BAM: {bam:?}");
        }
    }

    info!("Outputs:");
    info!("\tOutput folder: {:?}", settings.output_folder);
    if let Some(filename) = settings.report_filename.as_ref() {
        info!("\tReport: {filename:?}");
    }

    settings.gbcms = check_gbcms_args(settings.gbcms)?;
    settings.reconcile = check_reconcile_args(settings.reconcile)?;
    Ok(settings)
}
