use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use log::debug;

use crate::error::SeedError;
use crate::record::IncomeRecord;

/// Writes `records` as CSV with a header row. An absent program is an empty field.
///
/// # Errors
/// Errors when serialization or the underlying writer fails
pub fn write_records_csv<W: Write>(writer: W, records: &[IncomeRecord]) -> Result<(), SeedError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// # Errors
/// Errors when the file cannot be created or written
pub fn export_records_csv(path: &Path, records: &[IncomeRecord]) -> Result<(), SeedError> {
    let file = std::fs::File::create(path)?;
    write_records_csv(file, records)?;
    debug!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
