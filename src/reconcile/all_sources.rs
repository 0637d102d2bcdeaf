
use crate::data_types::maf_columns::{category_column, FRAGMENT_COLUMNS, STANDARD_COLUMNS, STANDARD_RENAMED, STRAND_TRIPLES, TUMOR_SAMPLE_BARCODE};
use crate::data_types::mutation_key::MutationKey;
use crate::data_types::read_category::{ReadCategory, TableRole};
use crate::data_types::variant_table::{join_tables, VariantTable};
use crate::reconcile::errors::{ReconcileError, ReconcileStep, StepContext};
use crate::reconcile::ReconcileOptions;
use crate::util::pipeline_logger::PipelineLogger;

/// The supported combinations of input tables for a multi-source merge.
/// Each variant is handled explicitly; any other combination is rejected when the inputs are assembled.
#[derive(Clone, Copy, Debug)]
pub enum ReconcileInputs<'a> {
    /// original MAF, standard BAM, and simplex-duplex counts
    OriginalStandardSimplexDuplex {
        original: &'a VariantTable,
        standard: &'a VariantTable,
        simplex_duplex: &'a VariantTable
    },
    /// original MAF and simplex-duplex counts
    OriginalSimplexDuplex {
        original: &'a VariantTable,
        simplex_duplex: &'a VariantTable
    },
    /// original MAF and standard BAM counts
    OriginalStandard {
        original: &'a VariantTable,
        standard: &'a VariantTable
    },
    /// standard BAM and simplex-duplex counts, no original MAF
    StandardSimplexDuplex {
        standard: &'a VariantTable,
        simplex_duplex: &'a VariantTable
    }
}

impl<'a> ReconcileInputs<'a> {
    /// Picks the widest supported combination from the available tables.
    /// Priority: original+standard+simplex-duplex, original+simplex-duplex, original+standard, standard+simplex-duplex.
    /// # Errors
    /// * if fewer than two tables are provided
    pub fn from_tables(
        original: Option<&'a VariantTable>, standard: Option<&'a VariantTable>, simplex_duplex: Option<&'a VariantTable>
    ) -> Result<ReconcileInputs<'a>, ReconcileError> {
        match (original, standard, simplex_duplex) {
            (Some(original), Some(standard), Some(simplex_duplex)) => Ok(ReconcileInputs::OriginalStandardSimplexDuplex { original, standard, simplex_duplex }),
            (Some(original), None, Some(simplex_duplex)) => Ok(ReconcileInputs::OriginalSimplexDuplex { original, simplex_duplex }),
            (Some(original), Some(standard), None) => Ok(ReconcileInputs::OriginalStandard { original, standard }),
            (None, Some(standard), Some(simplex_duplex)) => Ok(ReconcileInputs::StandardSimplexDuplex { standard, simplex_duplex }),
            (o, s, sd) => {
                let provided: Vec<&str> = [(o.is_some(), "original"), (s.is_some(), "standard"), (sd.is_some(), "simplex-duplex")].into_iter()
                    .filter_map(|(present, name)| present.then_some(name))
                    .collect();
                Err(ReconcileError::InsufficientInput {
                    reason: format!(
                        "merging requires at least two of the original, standard, and simplex-duplex tables, received {}",
                        if provided.is_empty() { "none".to_string() } else { provided.join(", ") }
                    )
                })
            }
        }
    }

    /// Provenance label used in output file names, e.g. "ORG-STD-SIMPLEX-DUPLEX"
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileInputs::OriginalStandardSimplexDuplex { .. } => "ORG-STD-SIMPLEX-DUPLEX",
            ReconcileInputs::OriginalSimplexDuplex { .. } => "ORG-SIMPLEX-DUPLEX",
            ReconcileInputs::OriginalStandard { .. } => "ORG-STD",
            ReconcileInputs::StandardSimplexDuplex { .. } => "STD-SIMPLEX-DUPLEX"
        }
    }

    /// True if the simplex-duplex table participates
    pub fn has_simplex_duplex(&self) -> bool {
        !matches!(self, ReconcileInputs::OriginalStandard { .. })
    }
}

/// Merges every provided table into a single view keyed by mutation key.
/// The leftmost table of each combination anchors the output rows; see [`ReconcileInputs`].
/// # Arguments
/// * `inputs` - the table combination to merge
/// * `options` - mutation key and join policy
/// * `logger` - the run logger
/// # Errors
/// * if a required column is missing from any table
/// * if any table has duplicate or invalid mutation keys
pub fn create_all_maf_table(inputs: &ReconcileInputs, options: &ReconcileOptions, logger: &PipelineLogger) -> Result<VariantTable, ReconcileError> {
    let key = &options.mutation_key;
    let policy = options.join_policy;

    let standard_and_fragment: Vec<String> = STANDARD_COLUMNS.iter()
        .chain(FRAGMENT_COLUMNS.iter())
        .cloned()
        .collect();

    let combined = match *inputs {
        ReconcileInputs::OriginalStandardSimplexDuplex { original, standard, simplex_duplex } => {
            let original = prepare_original(original, key).in_step(ReconcileStep::PrepareOriginal)?;
            let standard = prepare_standard(standard, key).in_step(ReconcileStep::PrepareStandard)?;
            let simplex_duplex = prepare_simplex_duplex(simplex_duplex, key).in_step(ReconcileStep::PrepareSimplexDuplex)?;
            logger.table("prepare", &standard);
            logger.table("prepare", &simplex_duplex);

            let standard_simplex_duplex = join_tables(&standard, &simplex_duplex, key, FRAGMENT_COLUMNS.as_slice(), policy, TableRole::Combined)
                .in_step(ReconcileStep::MergeAll)?;
            logger.table("merge_standard_simplex_duplex", &standard_simplex_duplex);
            join_tables(&original, &standard_simplex_duplex, key, &standard_and_fragment, policy, TableRole::Combined)
                .in_step(ReconcileStep::MergeAll)?
        },
        ReconcileInputs::OriginalSimplexDuplex { original, simplex_duplex } => {
            let original = prepare_original(original, key).in_step(ReconcileStep::PrepareOriginal)?;
            let simplex_duplex = prepare_simplex_duplex(simplex_duplex, key).in_step(ReconcileStep::PrepareSimplexDuplex)?;
            logger.table("prepare", &simplex_duplex);
            join_tables(&original, &simplex_duplex, key, FRAGMENT_COLUMNS.as_slice(), policy, TableRole::Combined)
                .in_step(ReconcileStep::MergeAll)?
        },
        ReconcileInputs::OriginalStandard { original, standard } => {
            let original = prepare_original(original, key).in_step(ReconcileStep::PrepareOriginal)?;
            let standard = prepare_standard(standard, key).in_step(ReconcileStep::PrepareStandard)?;
            logger.table("prepare", &standard);
            join_tables(&original, &standard, key, STANDARD_COLUMNS.as_slice(), policy, TableRole::Combined)
                .in_step(ReconcileStep::MergeAll)?
        },
        ReconcileInputs::StandardSimplexDuplex { standard, simplex_duplex } => {
            let standard = prepare_standard(standard, key).in_step(ReconcileStep::PrepareStandard)?;
            let simplex_duplex = prepare_simplex_duplex(simplex_duplex, key).in_step(ReconcileStep::PrepareSimplexDuplex)?;
            logger.table("prepare", &standard);
            logger.table("prepare", &simplex_duplex);
            join_tables(&standard, &simplex_duplex, key, FRAGMENT_COLUMNS.as_slice(), policy, TableRole::Combined)
                .in_step(ReconcileStep::MergeAll)?
        }
    };

    logger.finished(inputs.label(), &combined);
    Ok(combined)
}

/// Renames the standard count columns, derives the reverse strand counts, and strips the barcode tag
/// # Errors
/// * if any of the raw standard count columns are absent
/// * if a count is not an integer
/// * if the mutation key is not unique
fn prepare_standard(table: &VariantTable, key: &MutationKey) -> Result<VariantTable, ReconcileError> {
    let mut table = table.clone();
    table.set_role(TableRole::Standard);

    let renamed: Vec<(&str, String)> = STANDARD_RENAMED.iter()
        .map(|&c| (c, category_column(c, ReadCategory::Standard)))
        .collect();
    let renames: Vec<(&str, &str)> = renamed.iter()
        .map(|(from, to)| (*from, to.as_str()))
        .collect();
    table.rename_columns(&renames)?;

    // reverse = total - forward, for ref, alt, and total independently
    for &(total, forward, reverse) in STRAND_TRIPLES.iter() {
        let totals = table.integer_column(&category_column(total, ReadCategory::Standard))?;
        let forwards = table.integer_column(&category_column(forward, ReadCategory::Standard))?;
        let reverses: Vec<Option<String>> = totals.into_iter()
            .zip(forwards)
            .map(|(t, f)| Some((t? - f?).to_string()))
            .collect();
        table.set_column(&category_column(reverse, ReadCategory::Standard), reverses);
    }

    table.update_column(TUMOR_SAMPLE_BARCODE, |b| ReadCategory::Standard.strip_barcode(b).to_string())?;
    key.index(&table)?;
    Ok(table)
}

/// Strips the combined barcode tag from a simplex-duplex table
fn prepare_simplex_duplex(table: &VariantTable, key: &MutationKey) -> Result<VariantTable, ReconcileError> {
    let mut table = table.clone();
    table.set_role(TableRole::SimplexDuplex);
    table.update_column(TUMOR_SAMPLE_BARCODE, |b| ReadCategory::SimplexDuplex.strip_barcode(b).to_string())?;
    key.index(&table)?;
    Ok(table)
}

/// The original table is only checked for a unique key
fn prepare_original(table: &VariantTable, key: &MutationKey) -> Result<VariantTable, ReconcileError> {
    let mut table = table.clone();
    table.set_role(TableRole::Original);
    key.index(&table)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data_types::variant_table::JoinPolicy;
    use crate::reconcile::simplex_duplex::create_duplex_simplex_table;

    const KEY: [&str; 5] = ["Chromosome", "Start_Position", "End_Position", "Reference_Allele", "Tumor_Seq_Allele2"];

    fn header(extra: &[&'static str]) -> Vec<&'static str> {
        let mut h: Vec<&'static str> = KEY.to_vec();
        h.extend_from_slice(extra);
        h
    }

    fn original_table() -> VariantTable {
        VariantTable::from_text_rows(TableRole::Original, &header(&["Hugo_Symbol", "Tumor_Sample_Barcode", "t_ref_count", "t_alt_count"]), &[
            &["17", "7577120", "7577120", "C", "T", "TP53", "P1", "50", "10"],
            &["12", "25398284", "25398284", "C", "A", "KRAS", "P1", "80", "20"],
            &["17", "37880220", "37880229", "GGGTCGGGAC", "-", "ERBB2", "P1", "30", "3"]
        ])
    }

    fn standard_table() -> VariantTable {
        VariantTable::from_text_rows(TableRole::Standard, &header(&[
            "Hugo_Symbol", "Tumor_Sample_Barcode",
            "t_ref_count", "t_alt_count", "t_total_count", "t_variant_frequency",
            "t_ref_count_forward", "t_alt_count_forward", "t_total_count_forward"
        ]), &[
            &["17", "7577120", "7577120", "C", "T", "TP53", "P1-STANDARD", "600", "4", "604", "0.0066", "350", "1", "351"],
            &["12", "25398284", "25398284", "C", "A", "KRAS", "P1-STANDARD", "900", "0", "900", "0", "500", "0", "500"],
            &["17", "37880220", "37880229", "GGGTCGGGAC", "-", "ERBB2", "P1-STANDARD", "700", "2", "702", "0.0028", "300", "2", "302"]
        ])
    }

    fn simplex_duplex_table() -> VariantTable {
        let fragment_header = header(&["Hugo_Symbol", "Tumor_Sample_Barcode", "t_ref_count_fragment", "t_alt_count_fragment"]);
        let simplex = VariantTable::from_text_rows(TableRole::Simplex, &fragment_header, &[
            &["17", "7577120", "7577120", "C", "T", "TP53", "P1-SIMPLEX", "409", "0"],
            &["17", "37880220", "37880229", "GGGTCGGGAC", "-", "ERBB2", "P1-SIMPLEX", "200", "0"]
        ]);
        let duplex = VariantTable::from_text_rows(TableRole::Duplex, &fragment_header, &[
            &["17", "7577120", "7577120", "C", "T", "TP53", "P1-DUPLEX", "1140", "1"],
            &["17", "37880220", "37880229", "GGGTCGGGAC", "-", "ERBB2", "P1-DUPLEX", "337", "0"]
        ]);
        let options = ReconcileOptions::default();
        create_duplex_simplex_table(&simplex, &duplex, &options, &PipelineLogger::new("P1")).unwrap()
    }

    fn row_of(table: &VariantTable, start: &str) -> usize {
        (0..table.num_rows())
            .find(|&r| table.value(r, "Start_Position").unwrap() == Some(start))
            .unwrap()
    }

    #[test]
    fn test_from_tables() {
        let (o, s, sd) = (original_table(), standard_table(), simplex_duplex_table());

        let inputs = ReconcileInputs::from_tables(Some(&o), Some(&s), Some(&sd)).unwrap();
        assert_eq!(inputs.label(), "ORG-STD-SIMPLEX-DUPLEX");
        assert!(inputs.has_simplex_duplex());
        assert_eq!(ReconcileInputs::from_tables(Some(&o), None, Some(&sd)).unwrap().label(), "ORG-SIMPLEX-DUPLEX");
        let inputs = ReconcileInputs::from_tables(Some(&o), Some(&s), None).unwrap();
        assert_eq!(inputs.label(), "ORG-STD");
        assert!(!inputs.has_simplex_duplex());
        assert_eq!(ReconcileInputs::from_tables(None, Some(&s), Some(&sd)).unwrap().label(), "STD-SIMPLEX-DUPLEX");

        for (a, b, c) in [(Some(&o), None, None), (None, Some(&s), None), (None, None, Some(&sd)), (None, None, None)] {
            let result = ReconcileInputs::from_tables(a, b, c);
            assert!(matches!(result, Err(ReconcileError::InsufficientInput { .. })));
        }
    }

    #[test]
    fn test_reverse_counts() {
        let standard = prepare_standard(&standard_table(), &MutationKey::default()).unwrap();
        for row in 0..standard.num_rows() {
            for (total, forward, reverse) in [
                ("t_ref_count_standard", "t_ref_count_forward_standard", "t_ref_count_reverse_standard"),
                ("t_alt_count_standard", "t_alt_count_forward_standard", "t_alt_count_reverse_standard"),
                ("t_total_count_standard", "t_total_count_forward_standard", "t_total_count_reverse_standard")
            ] {
                let t = standard.integer_column(total).unwrap()[row].unwrap();
                let f = standard.integer_column(forward).unwrap()[row].unwrap();
                let r = standard.integer_column(reverse).unwrap()[row].unwrap();
                assert_eq!(r, t - f);
            }
        }

        // explicit row check: TP53 has ref 600/350 forward, alt 4/1, total 604/351
        assert_eq!(standard.value(0, "t_ref_count_reverse_standard").unwrap(), Some("250"));
        assert_eq!(standard.value(0, "t_alt_count_reverse_standard").unwrap(), Some("3"));
        assert_eq!(standard.value(0, "t_total_count_reverse_standard").unwrap(), Some("253"));
        assert_eq!(standard.value(0, "Tumor_Sample_Barcode").unwrap(), Some("P1"));
        assert!(!standard.has_column("t_ref_count"));
    }

    #[test]
    fn test_reverse_counts_missing_cells() {
        let standard = VariantTable::from_text_rows(TableRole::Standard, &header(&[
            "Hugo_Symbol", "Tumor_Sample_Barcode",
            "t_ref_count", "t_alt_count", "t_total_count", "t_variant_frequency",
            "t_ref_count_forward", "t_alt_count_forward", "t_total_count_forward"
        ]), &[
            &["17", "7577120", "7577120", "C", "T", "TP53", "P1-STANDARD", "600", "4", "604", "0.0066", "350", "", "351"],
            &["12", "25398284", "25398284", "C", "A", "KRAS", "P1-STANDARD", "900", "0", "NA", "0", "500", "0", "500"]
        ]);
        let standard = prepare_standard(&standard, &MutationKey::default()).unwrap();

        // empty alt forward only blanks the alt reverse
        assert_eq!(standard.value(0, "t_alt_count_reverse_standard").unwrap(), None);
        assert_eq!(standard.value(0, "t_ref_count_reverse_standard").unwrap(), Some("250"));
        assert_eq!(standard.value(0, "t_total_count_reverse_standard").unwrap(), Some("253"));

        // NA total only blanks the total reverse
        assert_eq!(standard.value(1, "t_total_count_reverse_standard").unwrap(), None);
        assert_eq!(standard.value(1, "t_ref_count_reverse_standard").unwrap(), Some("400"));
        assert_eq!(standard.value(1, "t_alt_count_reverse_standard").unwrap(), Some("0"));
    }

    #[test]
    fn test_empty_standard() {
        let standard = VariantTable::new(TableRole::Standard, standard_table().columns().to_vec()).unwrap();
        let prepared = prepare_standard(&standard, &MutationKey::default()).unwrap();
        assert!(prepared.is_empty());
        assert!(prepared.has_column("t_total_count_reverse_standard"));
    }

    #[test]
    fn test_original_standard_simplex_duplex() {
        let (o, s, sd) = (original_table(), standard_table(), simplex_duplex_table());
        let inputs = ReconcileInputs::from_tables(Some(&o), Some(&s), Some(&sd)).unwrap();
        let logger = PipelineLogger::new("P1");
        let combined = create_all_maf_table(&inputs, &ReconcileOptions::default(), &logger).unwrap();

        assert_eq!(combined.num_rows(), 3);
        assert_eq!(combined.columns().len(), o.columns().len() + 10 + 12);
        // original columns are untouched
        assert_eq!(combined.value(0, "t_ref_count").unwrap(), Some("50"));
        assert_eq!(combined.value(0, "Tumor_Sample_Barcode").unwrap(), Some("P1"));

        let row = row_of(&combined, "7577120");
        assert_eq!(combined.value(row, "t_ref_count_standard").unwrap(), Some("600"));
        assert_eq!(combined.value(row, "t_ref_count_reverse_standard").unwrap(), Some("250"));
        assert_eq!(combined.value(row, "t_total_count_fragment_simplex_duplex").unwrap(), Some("1550"));

        // KRAS was never genotyped in simplex or duplex
        let row = row_of(&combined, "25398284");
        assert_eq!(combined.value(row, "t_total_count_standard").unwrap(), Some("900"));
        assert_eq!(combined.value(row, "t_ref_count_fragment_simplex_duplex").unwrap(), None);
    }

    #[test]
    fn test_pairwise_combinations() {
        let (o, s, sd) = (original_table(), standard_table(), simplex_duplex_table());
        let logger = PipelineLogger::new("P1");
        let options = ReconcileOptions::default();

        let o_sd = create_all_maf_table(&ReconcileInputs::from_tables(Some(&o), None, Some(&sd)).unwrap(), &options, &logger).unwrap();
        assert_eq!(o_sd.columns().len(), o.columns().len() + 12);
        assert!(!o_sd.has_column("t_ref_count_standard"));

        let o_s = create_all_maf_table(&ReconcileInputs::from_tables(Some(&o), Some(&s), None).unwrap(), &options, &logger).unwrap();
        assert_eq!(o_s.columns().len(), o.columns().len() + 10);
        assert!(!o_s.has_column("t_vaf_fragment_simplex_duplex"));

        let s_sd = create_all_maf_table(&ReconcileInputs::from_tables(None, Some(&s), Some(&sd)).unwrap(), &options, &logger).unwrap();
        assert_eq!(s_sd.num_rows(), 3);
        let row = row_of(&s_sd, "37880220");
        assert_eq!(s_sd.value(row, "Tumor_Sample_Barcode").unwrap(), Some("P1"));
        assert_eq!(s_sd.value(row, "t_total_count_fragment_simplex_duplex").unwrap(), Some("537"));
        assert_eq!(s_sd.value(row, "t_alt_count_reverse_standard").unwrap(), Some("0"));
    }

    #[test]
    fn test_join_policy_key_sets() {
        // standard has a variant the original does not
        let o = original_table();
        let mut s = standard_table();
        s.push_row(
            ["3", "178936091", "178936091", "G", "A", "PIK3CA", "P1-STANDARD", "10", "5", "15", "0.3333", "5", "2", "7"]
                .iter().map(|v| Some(v.to_string())).collect()
        ).unwrap();
        let o_short = VariantTable::from_text_rows(TableRole::Original, &header(&["Hugo_Symbol", "Tumor_Sample_Barcode", "t_ref_count", "t_alt_count"]), &[
            &["17", "7577120", "7577120", "C", "T", "TP53", "P1", "50", "10"]
        ]);
        let logger = PipelineLogger::new("P1");

        let left_options = ReconcileOptions::new(MutationKey::default(), JoinPolicy::Left);
        let left = create_all_maf_table(&ReconcileInputs::from_tables(Some(&o), Some(&s), None).unwrap(), &left_options, &logger).unwrap();
        assert_eq!(left.num_rows(), o.num_rows());

        let outer_options = ReconcileOptions::new(MutationKey::default(), JoinPolicy::Outer);
        let outer = create_all_maf_table(&ReconcileInputs::from_tables(Some(&o), Some(&s), None).unwrap(), &outer_options, &logger).unwrap();
        assert_eq!(outer.num_rows(), 4);
        let row = row_of(&outer, "178936091");
        assert_eq!(outer.value(row, "Hugo_Symbol").unwrap(), Some("PIK3CA"));
        assert_eq!(outer.value(row, "Tumor_Sample_Barcode").unwrap(), Some("P1"));
        assert_eq!(outer.value(row, "t_total_count_reverse_standard").unwrap(), Some("8"));
        // the original's own counts do not exist for this variant
        assert_eq!(outer.value(row, "t_ref_count").unwrap(), None);

        let inner_options = ReconcileOptions::new(MutationKey::default(), JoinPolicy::Inner);
        let inner = create_all_maf_table(&ReconcileInputs::from_tables(Some(&o_short), Some(&s), None).unwrap(), &inner_options, &logger).unwrap();
        assert_eq!(inner.num_rows(), 1);
    }

    #[test]
    fn test_missing_standard_column() {
        let o = original_table();
        let mut s = standard_table();
        s.drop_column("t_alt_count_forward");
        let inputs = ReconcileInputs::from_tables(Some(&o), Some(&s), None).unwrap();
        let err = create_all_maf_table(&inputs, &ReconcileOptions::default(), &PipelineLogger::new("P1")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "preparing the standard table failed: standard table is missing required column \"t_alt_count_forward\""
        );
    }

    #[test]
    fn test_missing_fragment_column() {
        let o = original_table();
        let mut sd = simplex_duplex_table();
        sd.drop_column("t_vaf_fragment_duplex");
        let inputs = ReconcileInputs::from_tables(Some(&o), None, Some(&sd)).unwrap();
        let err = create_all_maf_table(&inputs, &ReconcileOptions::default(), &PipelineLogger::new("P1")).unwrap_err();
        assert!(matches!(err, ReconcileError::StepFailed { step: ReconcileStep::MergeAll, .. }));
        assert!(matches!(err.root_cause(), ReconcileError::MissingColumn { table: TableRole::SimplexDuplex, .. }));
    }
}
