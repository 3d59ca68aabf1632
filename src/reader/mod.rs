mod client;
mod csv_file;

pub use client::SourceReader;
pub use csv_file::CsvSourceReader;

use tracing::debug;

use crate::catalog::Source;
use crate::error::Result;
use crate::records::SourceRecords;

/// Reads one source through `reader`, logging what came back.
pub fn read_source<R: SourceReader + ?Sized>(reader: &R, source: Source) -> Result<SourceRecords> {
    let records = reader.read(source)?;
    debug!(
        source = %source,
        records = records.records.len(),
        columns = records.schema.len(),
        "Source read"
    );
    Ok(records)
}
