
/// Merges the original, standard, and simplex-duplex tables into one view
pub mod all_sources;
/// Typed errors for the reconciliation engine
pub mod errors;
/// Merges simplex and duplex fragment counts
pub mod simplex_duplex;
/// Generates the compact genotype summary column
pub mod summary;

use crate::data_types::mutation_key::MutationKey;
use crate::data_types::variant_table::JoinPolicy;

/// Settings shared by every reconciler within one run
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReconcileOptions {
    /// the key used to align rows across tables
    pub mutation_key: MutationKey,
    /// how rows missing from one side of a join are handled
    pub join_policy: JoinPolicy
}

impl ReconcileOptions {
    pub fn new(mutation_key: MutationKey, join_policy: JoinPolicy) -> ReconcileOptions {
        ReconcileOptions {
            mutation_key,
            join_policy
        }
    }
}
