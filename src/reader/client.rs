use crate::catalog::Source;
use crate::error::Result;
use crate::records::SourceRecords;

/// Produces the raw records of a source. Failures surface unchanged to the loader's caller.
pub trait SourceReader {
    fn read(&self, source: Source) -> Result<SourceRecords>;
}

impl<F> SourceReader for F
where
    F: Fn(Source) -> Result<SourceRecords>,
{
    fn read(&self, source: Source) -> Result<SourceRecords> {
        self(source)
    }
}
