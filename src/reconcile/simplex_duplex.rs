
use crate::data_types::fragment_counts::{format_vaf, FragmentCounts};
use crate::data_types::maf_columns::{fragment_columns, T_ALT_COUNT_FRAGMENT, T_REF_COUNT_FRAGMENT, T_TOTAL_COUNT_FRAGMENT, T_VAF_FRAGMENT, TUMOR_SAMPLE_BARCODE};
use crate::data_types::read_category::{ReadCategory, TableRole};
use crate::data_types::variant_table::{join_tables, VariantTable};
use crate::reconcile::errors::{ReconcileError, ReconcileStep, StepContext};
use crate::reconcile::ReconcileOptions;
use crate::util::pipeline_logger::PipelineLogger;

/// Merges the simplex and duplex genotyped tables into a single table of per-category and combined fragment counts.
/// The duplex counts are joined onto the simplex table by mutation key under the configured join policy.
/// When a variant is absent from one category, that category contributes zero fragments to the combined counts.
/// # Arguments
/// * `simplex` - GBCMS output for the simplex BAM
/// * `duplex` - GBCMS output for the duplex BAM
/// * `options` - mutation key and join policy
/// * `logger` - the run logger
/// # Errors
/// * if either table is missing the fragment count or barcode columns
/// * if any count is not a non-negative integer
/// * if either table has duplicate mutation keys
pub fn create_duplex_simplex_table(
    simplex: &VariantTable, duplex: &VariantTable, options: &ReconcileOptions, logger: &PipelineLogger
) -> Result<VariantTable, ReconcileError> {
    let simplex = prepare_category_table(simplex, ReadCategory::Simplex, logger)
        .in_step(ReconcileStep::PrepareSimplex)?;
    let duplex = prepare_category_table(duplex, ReadCategory::Duplex, logger)
        .in_step(ReconcileStep::PrepareDuplex)?;

    let merged = merge_category_tables(&simplex, &duplex, options)
        .in_step(ReconcileStep::MergeSimplexDuplex)?;
    logger.finished("simplex_duplex", &merged);
    Ok(merged)
}

/// Renames the raw fragment counts to category columns, derives the category total and VAF, and strips the barcode tag
/// # Arguments
/// * `table` - the raw GBCMS table
/// * `category` - either simplex or duplex
/// * `logger` - the run logger
fn prepare_category_table(table: &VariantTable, category: ReadCategory, logger: &PipelineLogger) -> Result<VariantTable, ReconcileError> {
    let mut table = table.clone();
    table.set_role(category.into());
    table.sort_by_position()?;

    let [ref_column, alt_column, total_column, vaf_column] = fragment_columns(category);
    table.rename_columns(&[
        (T_REF_COUNT_FRAGMENT, ref_column.as_str()),
        (T_ALT_COUNT_FRAGMENT, alt_column.as_str())
    ])?;

    // these get recomputed from ref and alt, we never trust the raw versions
    table.drop_column(T_TOTAL_COUNT_FRAGMENT);
    table.drop_column(T_VAF_FRAGMENT);

    let ref_counts = table.count_column(&ref_column)?;
    let alt_counts = table.count_column(&alt_column)?;
    let counts: Vec<Option<FragmentCounts>> = ref_counts.into_iter()
        .zip(alt_counts)
        .map(|(r, a)| Some(FragmentCounts::new(r?, a?)))
        .collect();

    table.set_column(&total_column, counts.iter().map(|c| c.map(|c| c.total().to_string())).collect());
    table.set_column(&vaf_column, counts.iter().map(|c| c.map(|c| format_vaf(c.vaf()))).collect());
    table.update_column(TUMOR_SAMPLE_BARCODE, |b| category.strip_barcode(b).to_string())?;

    logger.table("prepare", &table);
    Ok(table)
}

/// Joins the prepared duplex columns onto the prepared simplex table and fills in the combined columns
fn merge_category_tables(simplex: &VariantTable, duplex: &VariantTable, options: &ReconcileOptions) -> Result<VariantTable, ReconcileError> {
    let duplex_columns = fragment_columns(ReadCategory::Duplex);
    let mut merged = join_tables(
        simplex, duplex, &options.mutation_key,
        &duplex_columns, options.join_policy, TableRole::SimplexDuplex
    )?;

    let simplex_counts = category_counts(&merged, ReadCategory::Simplex)?;
    let duplex_counts = category_counts(&merged, ReadCategory::Duplex)?;
    let combined: Vec<FragmentCounts> = simplex_counts.into_iter()
        .zip(duplex_counts)
        .map(|(s, d)| s + d)
        .collect();

    let [ref_column, alt_column, total_column, vaf_column] = fragment_columns(ReadCategory::SimplexDuplex);
    merged.set_column(&ref_column, combined.iter().map(|c| Some(c.ref_count().to_string())).collect());
    merged.set_column(&alt_column, combined.iter().map(|c| Some(c.alt_count().to_string())).collect());
    merged.set_column(&total_column, combined.iter().map(|c| Some(c.total().to_string())).collect());
    merged.set_column(&vaf_column, combined.iter().map(|c| Some(format_vaf(c.vaf()))).collect());

    merged.update_column(TUMOR_SAMPLE_BARCODE, |b| ReadCategory::SimplexDuplex.tag_barcode(b))?;

    // the output must still be uniquely keyed
    options.mutation_key.index(&merged)?;
    Ok(merged)
}

/// Reads the per-category counts from a merged table, a missing count contributes zero
fn category_counts(table: &VariantTable, category: ReadCategory) -> Result<Vec<FragmentCounts>, ReconcileError> {
    let [ref_column, alt_column, _, _] = fragment_columns(category);
    let ref_counts = table.count_column(&ref_column)?;
    let alt_counts = table.count_column(&alt_column)?;
    Ok(ref_counts.into_iter()
        .zip(alt_counts)
        .map(|(r, a)| FragmentCounts::new(r.unwrap_or(0), a.unwrap_or(0)))
        .collect())
}
