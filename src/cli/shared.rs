
use clap::Args;
use log::info;
use simple_error::bail;
use std::path::PathBuf;

use crate::data_types::maf_columns::TUMOR_SEQ_ALLELE2;
use crate::data_types::mutation_key::MutationKey;
use crate::data_types::variant_table::JoinPolicy;
use crate::gbcms::GbcmsOptions;
use crate::reconcile::ReconcileOptions;

/// Options for running GBCMS, shared by every subcommand that genotypes
#[derive(Args, Clone, Debug)]
pub struct GbcmsArgs {
    /// Reference FASTA file the BAMs were aligned to
    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "reference")]
    #[clap(value_name = "FASTA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub reference_filename: PathBuf,

    /// Path to the GetBaseCountsMultiSample executable
    #[clap(long = "gbcms-path")]
    #[clap(value_name = "EXE")]
    #[clap(default_value = "GetBaseCountsMultiSample")]
    #[clap(help_heading = Some("GBCMS"))]
    pub gbcms_path: PathBuf,

    /// Minimum mapping quality of a counted read
    #[clap(long = "mapq")]
    #[clap(value_name = "INT")]
    #[clap(default_value = "20")]
    #[clap(help_heading = Some("GBCMS"))]
    pub mapping_quality: u32,

    /// Number of threads for each GBCMS run
    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[clap(help_heading = Some("GBCMS"))]
    pub threads: usize,

    /// Exclude duplicate-flagged reads from the counts
    #[clap(long = "filter-duplicate")]
    #[clap(help_heading = Some("GBCMS"))]
    pub filter_duplicate: bool,

    /// Kill a GBCMS run that takes longer than this many seconds
    #[clap(long = "timeout")]
    #[clap(value_name = "SECONDS")]
    #[clap(help_heading = Some("GBCMS"))]
    pub timeout_seconds: Option<u64>,
}

impl GbcmsArgs {
    pub fn gbcms_options(&self) -> GbcmsOptions {
        GbcmsOptions {
            filter_duplicate: self.filter_duplicate,
            mapping_quality: self.mapping_quality,
            threads: self.threads,
            timeout_seconds: self.timeout_seconds,
            ..Default::default()
        }
    }
}

/// Validates and logs the GBCMS options
pub fn check_gbcms_args(mut args: GbcmsArgs) -> Result<GbcmsArgs, Box<dyn std::error::Error>> {
    info!("GBCMS settings:");
    info!("\tExecutable: {:?}", args.gbcms_path);
    info!("\tReference: {:?}", args.reference_filename);
    if args.threads == 0 {
        args.threads = 1;
    }
    info!("\tThreads: {}", args.threads);
    info!("\tMinimum mapping quality: {}", args.mapping_quality);
    info!("\tFilter duplicates: {}", if args.filter_duplicate { "ENABLED" } else { "DISABLED" });
    match args.timeout_seconds {
        Some(0) => bail!("--timeout must be greater than 0"),
        Some(t) => info!("\tTimeout: {t} seconds"),
        None => info!("\tTimeout: None")
    };
    Ok(args)
}

/// Options for reconciling tables, shared by every subcommand
#[derive(Args, Clone, Debug)]
pub struct ReconcileArgs {
    /// Tumor allele column used in the mutation key
    #[clap(long = "allele-column")]
    #[clap(value_name = "COLUMN")]
    #[clap(default_value = TUMOR_SEQ_ALLELE2)]
    #[clap(help_heading = Some("Reconciliation"))]
    pub allele_column: String,

    /// How variants missing from one of the tables are handled
    #[clap(long = "join-policy")]
    #[clap(value_name = "POLICY")]
    #[clap(value_enum)]
    #[clap(default_value_t = JoinPolicy::Outer)]
    #[clap(help_heading = Some("Reconciliation"))]
    pub join_policy: JoinPolicy,

    /// Replace Tumor_Sample_Barcode in every output with the sample id
    #[clap(long = "override-sample-name")]
    #[clap(help_heading = Some("Reconciliation"))]
    pub override_sample_name: bool,
}

impl ReconcileArgs {
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions::new(MutationKey::new(&self.allele_column), self.join_policy)
    }
}

/// Validates and logs the reconcile options
pub fn check_reconcile_args(args: ReconcileArgs) -> Result<ReconcileArgs, Box<dyn std::error::Error>> {
    info!("Reconciliation settings:");
    if args.allele_column.trim().is_empty() {
        bail!("--allele-column cannot be empty");
    }
    info!("\tAllele column: {}", args.allele_column);
    info!("\tJoin policy: {}", args.join_policy);
    info!("\tOverride sample name: {}", if args.override_sample_name { "ENABLED" } else { "DISABLED" });
    Ok(args)
}
