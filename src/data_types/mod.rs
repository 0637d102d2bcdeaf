
/// Contains the per-category fragment counts and allele fraction math
pub mod fragment_counts;
/// Column names shared with GBCMS output and the reconciled MAFs
pub mod maf_columns;
/// Contains the mutation key that aligns rows across tables
pub mod mutation_key;
/// Contains the read categories and table roles
pub mod read_category;
/// Contains one row of the batch metadata file
pub mod sample_metadata;
/// Contains the in-memory MAF table and the keyed join
pub mod variant_table;
