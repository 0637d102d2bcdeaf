
use clap::Args;
use log::{info, warn};
use simple_error::bail;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_optional_filename};
use crate::cli::shared::{check_reconcile_args, ReconcileArgs};
use crate::data_types::read_category::ReadCategory;
use crate::genotyper::{MergeOptions, MergeRequest};

#[derive(Args, Clone)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct MergeSettings {
    /// Sample or patient identifier, used as the output prefix
    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "patient-id")]
    #[clap(value_name = "ID")]
    #[clap(help_heading = Some("Input/Output"))]
    pub sample_id: String,

    /// The original, pre-genotyping MAF
    #[clap(short = 'i')]
    #[clap(long = "input-maf")]
    #[clap(value_name = "MAF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub original_maf: Option<PathBuf>,

    /// Genotyped MAF from the standard BAM
    #[clap(short = 'b')]
    #[clap(long = "standard-maf")]
    #[clap(value_name = "MAF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub standard_maf: Option<PathBuf>,

    /// Genotyped MAF from the duplex BAM, requires --simplex-maf
    #[clap(short = 'd')]
    #[clap(long = "duplex-maf")]
    #[clap(value_name = "MAF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub duplex_maf: Option<PathBuf>,

    /// Genotyped MAF from the simplex BAM, requires --duplex-maf
    #[clap(short = 's')]
    #[clap(long = "simplex-maf")]
    #[clap(value_name = "MAF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub simplex_maf: Option<PathBuf>,

    /// Output folder for the reconciled MAFs
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
    pub reconcile: ReconcileArgs,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl MergeSettings {
    pub fn merge_request(&self) -> MergeRequest {
        let genotyped = [
            (ReadCategory::Standard, &self.standard_maf),
            (ReadCategory::Duplex, &self.duplex_maf),
            (ReadCategory::Simplex, &self.simplex_maf)
        ].into_iter()
            .filter_map(|(category, opt_maf)| opt_maf.clone().map(|maf| (category, maf)))
            .collect();

        MergeRequest {
            sample_id: self.sample_id.clone(),
            original_maf: self.original_maf.clone(),
            genotyped
        }
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            output_folder: self.output_folder.clone(),
            reconcile: self.reconcile.reconcile_options(),
            override_sample_name: self.reconcile.override_sample_name
        }
    }
}

pub fn check_merge_settings(mut settings: MergeSettings) -> Result<MergeSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");
    check_optional_filename(settings.original_maf.as_deref(), "Input MAF");
    check_optional_filename(settings.standard_maf.as_deref(), "Standard MAF");
    check_optional_filename(settings.duplex_maf.as_deref(), "Duplex MAF");
    check_optional_filename(settings.simplex_maf.as_deref(), "Simplex MAF");

    if settings.sample_id.trim().is_empty() {
        bail!("--patient-id cannot be empty");
    }
    info!("\tSample: {}", settings.sample_id);

    if settings.duplex_maf.is_some() != settings.simplex_maf.is_some() {
        bail!("--duplex-maf and --simplex-maf must be provided together.");
    }
    let has_simplex_duplex = settings.duplex_maf.is_some();
    let available = [settings.original_maf.is_some(), settings.standard_maf.is_some(), has_simplex_duplex].into_iter()
        .filter(|&b| b)
        .count();
    if !has_simplex_duplex && available < 2 {
        bail!("Must provide --duplex-maf and --simplex-maf, or at least two of --input-maf, --standard-maf, and the simplex/duplex pair.");
    }

    for (label, opt_maf) in [
        ("Original", &settings.original_maf), ("Standard", &settings.standard_maf),
        ("Duplex", &settings.duplex_maf), ("Simplex", &settings.simplex_maf)
    ] {
        match opt_maf.as_ref() {
            Some(maf) => info!("\t{label} MAF: {maf:?}"),
            None => warn!("\t{label} MAF: None")
        };
    }

    info!("Outputs:");
    info!("\tOutput folder: {:?}", settings.output_folder);
    if let Some(filename) = settings.report_filename.as_ref() {
        info!("\tReport: {filename:?}");
    }

    settings.reconcile = check_reconcile_args(settings.reconcile)?;
    Ok(settings)
}
