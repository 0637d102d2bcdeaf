
use log::{LevelFilter, error, info};
use std::path::Path;

use genotype_variants::cli::core::{Commands, get_cli};
use genotype_variants::cli::generate::{GenerateSettings, check_generate_settings};
use genotype_variants::cli::merge::{MergeSettings, check_merge_settings};
use genotype_variants::cli::multiple_samples::{MultipleSamplesSettings, check_multiple_samples_settings};
use genotype_variants::genotyper::{genotype_batch, genotype_sample, merge_genotyped_mafs, GenotypeReport};
use genotype_variants::reconcile::errors::ReconcileError;
use genotype_variants::util::file_io::{load_metadata, save_json};

/// Sets up the global logger, must be called exactly once
/// # Arguments
/// * `verbosity` - the number of times -v was given
fn setup_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Maps a pipeline failure to a process exit code
fn error_exit_code(e: &ReconcileError) -> i32 {
    if e.is_io() {
        exitcode::IOERR
    } else if e.is_external() {
        exitcode::SOFTWARE
    } else {
        exitcode::DATAERR
    }
}

/// Creates the output folder if it does not exist yet, exits on failure
fn create_output_folder(output_folder: &Path) {
    if !output_folder.exists() {
        info!("Creating output folder at {output_folder:?}...");
    }
    match std::fs::create_dir_all(output_folder) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while creating output folder: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }
}

/// Saves a report if one was requested, exits on failure
fn save_report<T: serde::Serialize>(report: &T, opt_filename: Option<&Path>) {
    if let Some(filename) = opt_filename {
        info!("Saving report to {filename:?}");
        match save_json(report, filename) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while writing report to file: {e}");
                std::process::exit(exitcode::IOERR);
            }
        };
    }
}

fn log_outputs(report: &GenotypeReport) {
    for output in report.outputs().iter() {
        info!("\t{}: {:?} ({} rows)", output.label, output.path, output.rows);
    }
}

/// This will run the "generate" mode of the tool
/// # Arguments
/// * `settings` - the GenerateSettings object
fn run_generate(settings: GenerateSettings) {
    setup_logging(settings.verbosity);

    // okay, now we can check all the other settings
    let cli_settings: GenerateSettings = match check_generate_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };
    create_output_folder(&cli_settings.output_folder);

    let report: GenotypeReport = match genotype_sample(&cli_settings.sample(), &cli_settings.genotype_options()) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while genotyping sample {}: {e}", cli_settings.sample_id);
            std::process::exit(error_exit_code(&e));
        }
    };

    info!("Outputs written:");
    log_outputs(&report);
    save_report(&report, cli_settings.report_filename.as_deref());
}

/// This will run the "merge" mode of the tool
/// # Arguments
/// * `settings` - the MergeSettings object
fn run_merge(settings: MergeSettings) {
    setup_logging(settings.verbosity);

    let cli_settings: MergeSettings = match check_merge_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };
    create_output_folder(&cli_settings.output_folder);

    let report: GenotypeReport = match merge_genotyped_mafs(&cli_settings.merge_request(), &cli_settings.merge_options()) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while merging MAFs for sample {}: {e}", cli_settings.sample_id);
            std::process::exit(error_exit_code(&e));
        }
    };

    info!("Outputs written:");
    log_outputs(&report);
    save_report(&report, cli_settings.report_filename.as_deref());
}

/// This will run the "multiple-samples" mode of the tool
/// # Arguments
/// * `settings` - the MultipleSamplesSettings object
fn run_multiple_samples(settings: MultipleSamplesSettings) {
    setup_logging(settings.verbosity);

    let cli_settings: MultipleSamplesSettings = match check_multiple_samples_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    info!("Loading sample metadata from {:?}...", cli_settings.metadata_filename);
    let samples = match load_metadata(&cli_settings.metadata_filename) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while loading sample metadata: {e}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    if samples.is_empty() {
        error!("No samples found in {:?}", cli_settings.metadata_filename);
        std::process::exit(exitcode::DATAERR);
    }
    info!("Found {} samples.", samples.len());
    create_output_folder(&cli_settings.output_folder);

    let reports: Vec<GenotypeReport> = match genotype_batch(&samples, &cli_settings.genotype_options()) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while genotyping samples: {e}");
            std::process::exit(error_exit_code(&e));
        }
    };

    for report in reports.iter() {
        info!("Outputs written for {}:", report.sample_id());
        log_outputs(report);
    }
    save_report(&reports, cli_settings.report_filename.as_deref());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Generate(settings) => {
            run_generate(*settings);
        },
        Commands::Merge(settings) => {
            run_merge(*settings);
        },
        Commands::MultipleSamples(settings) => {
            run_multiple_samples(*settings);
        }
    }

    info!("Process finished successfully.");
}
