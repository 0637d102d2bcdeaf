
/// Generic functionality for reading/writing MAF, metadata, and JSON files
pub mod file_io;
/// Per-run structured logging
pub mod pipeline_logger;
