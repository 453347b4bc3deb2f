//! CSV export of canonical records
//!
//! Each file has one header row taken from the record kind's column list,
//! then one row per record. Empty collections produce no file.

use crate::output::summary::{ExportedFile, OutputResult};
use crate::records::CanonicalRecord;
use std::io;
use std::path::Path;

/// Writes the header and rows for a set of records to any writer
///
/// # Arguments
///
/// * `writer` - Destination for the CSV text
/// * `records` - Records to write, in order
pub fn write_records<W, T>(writer: W, records: &[T]) -> OutputResult<()>
where
    W: io::Write,
    T: CanonicalRecord,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(T::COLUMNS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Exports records to a CSV file
///
/// # Arguments
///
/// * `records` - Records to export
/// * `path` - Destination file; parent directories are created as needed
///
/// # Returns
///
/// * `Ok(Some(ExportedFile))` - The file was written
/// * `Ok(None)` - There were no records, so nothing was written
/// * `Err(OutputError)` - Failed to write the file
pub fn export_csv<T: CanonicalRecord>(records: &[T], path: &Path) -> OutputResult<Option<ExportedFile>> {
    if records.is_empty() {
        tracing::info!("No {} data to save for {}", T::KIND, path.display());
        return Ok(None);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    tracing::info!("Saving {} items to {}", records.len(), path.display());
    let file = std::fs::File::create(path)?;
    write_records(file, records)?;

    Ok(Some(ExportedFile {
        path: path.to_path_buf(),
        rows: records.len(),
    }))
}
