
/// Contains all the CLI related functionality
pub mod cli;
/// Contains any specialized data types that are shared across the tooling
pub mod data_types;
/// Contains the wrapper that runs GetBaseCountsMultiSample
pub mod gbcms;
/// Contains the per-sample and batch drivers that tie genotyping and reconciliation together
pub mod genotyper;
/// Contains the table reconciliation engine
pub mod reconcile;
/// Contains generic utilities that are handy wrappers
pub mod util;
