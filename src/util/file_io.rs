
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::data_types::read_category::TableRole;
use crate::data_types::sample_metadata::SampleMetadata;
use crate::data_types::variant_table::VariantTable;
use crate::reconcile::errors::ReconcileError;

/// Opens a file for reading, transparently decompressing if it ends in ".gz"
fn open_reader(filename: &Path) -> Result<Box<dyn Read>, ReconcileError> {
    let file = File::open(filename)
        .map_err(|source| ReconcileError::Io { path: filename.to_path_buf(), source })?;
    let fp: Box<dyn Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(fp)
}

/// Loads a tab-delimited MAF into memory.
/// Lines starting with '#' (MAF version headers) are skipped and empty cells become missing values.
/// # Arguments
/// * `filename` - the MAF to load, optionally gzipped
/// * `role` - the role of the loaded table, used in errors
/// # Errors
/// * if the file cannot be opened or parsed
/// * if the header repeats a column, or a row has the wrong number of fields
pub fn load_maf(filename: &Path, role: TableRole) -> Result<VariantTable, ReconcileError> {
    let csv_error = |source: csv::Error| ReconcileError::Csv { path: filename.to_path_buf(), source };
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .quoting(false)
        .flexible(true)
        .from_reader(open_reader(filename)?);

    let columns: Vec<String> = csv_reader.headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut table = VariantTable::new(role, columns)?;

    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let row: Vec<Option<String>> = record.iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect();
        table.push_row(row)?;
    }
    Ok(table)
}

/// Writes a table as a tab-delimited MAF with a single header row; missing cells are written empty
/// # Arguments
/// * `table` - the table to write
/// * `filename` - the output path, always written uncompressed
/// # Errors
/// * if the file cannot be created or written
pub fn save_maf(table: &VariantTable, filename: &Path) -> Result<(), ReconcileError> {
    let csv_error = |source: csv::Error| ReconcileError::Csv { path: filename.to_path_buf(), source };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(filename)
        .map_err(csv_error)?;

    csv_writer.write_record(table.columns()).map_err(csv_error)?;
    for row in table.rows().iter() {
        csv_writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .map_err(csv_error)?;
    }
    csv_writer.flush()
        .map_err(|source| ReconcileError::Io { path: filename.to_path_buf(), source })?;
    Ok(())
}

/// Loads the batch metadata file, comma-delimited if it ends in ".csv" and tab-delimited otherwise
/// # Arguments
/// * `filename` - the metadata file
/// # Errors
/// * if the file cannot be opened, or a row fails to deserialize
pub fn load_metadata(filename: &Path) -> Result<Vec<SampleMetadata>, ReconcileError> {
    let delimiter: u8 = if filename.extension().unwrap_or_default() == "csv" {
        b','
    } else {
        b'\t'
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(open_reader(filename)?);

    let mut samples = vec![];
    for result in csv_reader.deserialize() {
        let sample: SampleMetadata = result
            .map_err(|source| ReconcileError::Csv { path: filename.to_path_buf(), source })?;
        samples.push(sample);
    }
    Ok(samples)
}

/// This will save a generic serializable struct to JSON.
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - user provided path to write to, gzipped if it ends in ".gz"
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file: Box<dyn std::io::Write> = if out_filename.extension().unwrap_or_default() == "gz" {
        Box::new(
            flate2::write::GzEncoder::new(
                File::create(out_filename)?,
                flate2::Compression::best()
            )
        )
    } else {
        Box::new(File::create(out_filename)?)
    };
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}
