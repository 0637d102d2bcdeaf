
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use log::error;
use std::path::Path;

use crate::cli::generate::GenerateSettings;
use crate::cli::merge::MergeSettings;
use crate::cli::multiple_samples::MultipleSamplesSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string with the license notice.
    pub static ref AFTER_HELP: String = format!("genotype_variants is licensed under {}.
This program comes with ABSOLUTELY NO WARRANTY.", env!("CARGO_PKG_LICENSE"));
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// genotype_variants, genotype known small variants in standard, duplex, and simplex BAMs and reconcile the counts.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Genotype one sample with GBCMS and reconcile the results
    Generate(Box<GenerateSettings>),
    /// Reconcile genotyped MAFs that already exist
    Merge(Box<MergeSettings>),
    /// Genotype and reconcile every sample in a metadata file
    MultipleSamples(Box<MultipleSamplesSettings>),
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) {
    if !filename.exists() {
        error!("{} does not exist: \"{}\"", label, filename.display());
        std::process::exit(exitcode::NOINPUT);
    } else {
        // file exists, we're good
    }
}

/// Checks if an optional file exists and will otherwise exit
/// # Arguments
/// * `opt_filename` - the file path to check for, if provided
/// * `label` - the label to use for error messages
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) {
    if let Some(filename) = opt_filename {
        check_required_filename(filename, label);
    }
}
