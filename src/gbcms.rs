
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::reconcile::errors::ReconcileError;

/// How often we check on a running GBCMS process when a timeout is set
const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Number of trailing stderr lines included in a failure message
const STDERR_TAIL_LINES: usize = 10;

/// Counting options passed through to GBCMS
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GbcmsOptions {
    /// if true, duplicate-flagged reads are excluded from counts
    pub filter_duplicate: bool,
    /// if true, counts are reported per fragment in addition to per read
    pub fragment_count: bool,
    /// minimum mapping quality of a counted read
    pub mapping_quality: u32,
    /// number of GBCMS worker threads
    pub threads: usize,
    /// optional wall-clock limit for a single invocation
    pub timeout_seconds: Option<u64>
}

impl Default for GbcmsOptions {
    fn default() -> Self {
        Self {
            filter_duplicate: false,
            fragment_count: true,
            mapping_quality: 20,
            threads: 1,
            timeout_seconds: None
        }
    }
}

/// A single GBCMS invocation: one BAM genotyped at the variants of one MAF
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GbcmsJob {
    /// the GBCMS executable, either a path or a name on PATH
    pub executable: PathBuf,
    /// the MAF listing variants to genotype
    pub maf: PathBuf,
    /// the reference FASTA the BAM was aligned to
    pub reference: PathBuf,
    /// the BAM to count from
    pub bam: PathBuf,
    /// the sample name GBCMS writes into Tumor_Sample_Barcode
    pub sample_name: String,
    /// where GBCMS writes the genotyped MAF
    pub output: PathBuf
}

/// Builds the GBCMS argument vector for a job, no shell is involved
/// # Arguments
/// * `job` - the invocation inputs and output
/// * `options` - the counting options
pub fn gbcms_arguments(job: &GbcmsJob, options: &GbcmsOptions) -> Vec<OsString> {
    let mut bam_arg = OsString::from(&job.sample_name);
    bam_arg.push(":");
    bam_arg.push(&job.bam);

    let flag = |b: bool| OsString::from(if b { "1" } else { "0" });
    vec![
        "--bam".into(), bam_arg,
        "--filter_duplicate".into(), flag(options.filter_duplicate),
        "--fragment_count".into(), flag(options.fragment_count),
        "--maf".into(), job.maf.clone().into_os_string(),
        "--mapq".into(), options.mapping_quality.to_string().into(),
        "--omaf".into(),
        "--output".into(), job.output.clone().into_os_string(),
        "--fasta".into(), job.reference.clone().into_os_string(),
        "--threads".into(), options.threads.to_string().into()
    ]
}

/// Runs GBCMS for one job and waits for it to finish.
/// Both output pipes are drained on helper threads while we wait.
/// # Arguments
/// * `job` - the invocation inputs and output
/// * `options` - the counting options, including the optional timeout
/// # Errors
/// * if the executable cannot be started
/// * if the process exits with a non-zero status or exceeds the timeout
/// * if the process succeeds but the output MAF does not exist
pub fn run_gbcms(job: &GbcmsJob, options: &GbcmsOptions) -> Result<PathBuf, ReconcileError> {
    let args = gbcms_arguments(job, options);
    info!("Running GBCMS for {}...", job.sample_name);
    debug!("Command: {:?} {:?}", job.executable, args);

    let mut child: Child = Command::new(&job.executable)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReconcileError::ExternalToolFailure {
            reason: format!("could not execute {:?}: {e}", job.executable)
        })?;

    let stdout_handle = drain_pipe(child.stdout.take());
    let stderr_handle = drain_pipe(child.stderr.take());

    let timeout = options.timeout_seconds.map(Duration::from_secs);
    let opt_status = wait_with_timeout(&mut child, timeout)
        .map_err(|e| ReconcileError::ExternalToolFailure {
            reason: format!("error while waiting on {:?}: {e}", job.executable)
        })?;

    let status = match opt_status {
        Some(s) => s,
        None => {
            // a grandchild may still hold the pipes open, so the reader threads are left detached
            if let Err(e) = child.kill() {
                warn!("Failed to kill timed out GBCMS process: {e}");
            }
            let _ = child.wait();
            return Err(ReconcileError::ExternalToolFailure {
                reason: format!(
                    "GBCMS for {} did not finish within {} seconds",
                    job.sample_name, options.timeout_seconds.unwrap_or_default()
                )
            });
        }
    };

    let stdout = join_pipe(stdout_handle);
    let stderr = join_pipe(stderr_handle);
    if !stdout.trim().is_empty() {
        debug!("GBCMS stdout for {}:\n{}", job.sample_name, stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        debug!("GBCMS stderr for {}:\n{}", job.sample_name, stderr.trim_end());
    }

    if !status.success() {
        let detail = stderr_tail(&stderr);
        return Err(ReconcileError::ExternalToolFailure {
            reason: if detail.is_empty() {
                format!("GBCMS for {} exited with {status}", job.sample_name)
            } else {
                format!("GBCMS for {} exited with {status}: {detail}", job.sample_name)
            }
        });
    }

    check_output(&job.output)?;
    info!("GBCMS finished for {}, output at {:?}", job.sample_name, job.output);
    Ok(job.output.clone())
}

/// Makes sure GBCMS actually wrote its output
fn check_output(output: &Path) -> Result<(), ReconcileError> {
    if output.is_file() {
        Ok(())
    } else {
        Err(ReconcileError::ExternalToolFailure {
            reason: format!("GBCMS reported success but did not create {output:?}")
        })
    }
}

/// Waits for the child to exit, returns None if the timeout elapses first
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> std::io::Result<Option<ExitStatus>> {
    let timeout = match timeout {
        Some(t) => t,
        None => return child.wait().map(Some)
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Reads a pipe to the end on a helper thread
fn drain_pipe<R: Read + Send + 'static>(opt_pipe: Option<R>) -> Option<JoinHandle<String>> {
    opt_pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buffer: Vec<u8> = vec![];
            if let Err(e) = pipe.read_to_end(&mut buffer) {
                warn!("Error while reading GBCMS output: {e}");
            }
            String::from_utf8_lossy(&buffer).into_owned()
        })
    })
}

fn join_pipe(opt_handle: Option<JoinHandle<String>>) -> String {
    opt_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Last few non-empty lines of stderr, joined with " | "
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    let skip = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[skip..].join(" | ")
}
