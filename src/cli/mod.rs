
/// the main CLI module
pub mod core;
/// The generate CLI subcommand for genotyping and reconciling one sample
pub mod generate;
/// The merge CLI subcommand for reconciling existing genotyped MAFs
pub mod merge;
/// The multiple-samples CLI subcommand for batch runs from a metadata file
pub mod multiple_samples;
/// Argument groups flattened into several subcommands
pub mod shared;
