
use log::{debug, info};
use std::time::{Duration, Instant};

use crate::data_types::read_category::TableRole;
use crate::data_types::variant_table::VariantTable;

/// Logging handle for a single sample run.
/// Every record carries the sample label and elapsed time as `key=value` fields so that runs can be grepped apart.
#[derive(Clone, Debug)]
pub struct PipelineLogger {
    /// the sample or patient identifier for this run
    sample: String,
    /// when this run started
    start: Instant
}

impl PipelineLogger {
    pub fn new(sample: &str) -> PipelineLogger {
        PipelineLogger {
            sample: sample.to_string(),
            start: Instant::now()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Debug record for an intermediate table
    /// # Arguments
    /// * `step` - short name of the step that produced the table
    /// * `table` - the table, provides role and row count
    pub fn table(&self, step: &str, table: &VariantTable) {
        self.table_rows(step, table.role(), table.num_rows());
    }

    /// Debug record for a table known only by role and size
    pub fn table_rows(&self, step: &str, role: TableRole, rows: usize) {
        debug!(
            "sample={} step={step} role={role} rows={rows} elapsed_ms={}",
            self.sample, self.elapsed().as_millis()
        );
    }

    /// Info record for a finished step
    pub fn finished(&self, step: &str, table: &VariantTable) {
        info!(
            "sample={} step={step} role={} rows={} columns={} elapsed_ms={}",
            self.sample, table.role(), table.num_rows(), table.columns().len(), self.elapsed().as_millis()
        );
    }

    /// Info record without a table attached
    pub fn event(&self, step: &str, message: &str) {
        info!(
            "sample={} step={step} elapsed_ms={} {message}",
            self.sample, self.elapsed().as_millis()
        );
    }
}
