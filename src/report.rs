use crate::model::SuiteRecord;
use anyhow::Result;
use csv::{QuoteStyle, WriterBuilder};
use std::io;

const HEADER: [&str; 3] = ["TestSuite", "Tests", "Runtime"];

/// CSV sink for suite records.
///
/// Fields are written as-is unless quoting is requested, in which case any field holding a comma,
/// quote or line break is quoted.
pub struct CsvReport<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvReport<W> {
    pub fn new(out: W, quote: bool) -> Self {
        let style = if quote {
            QuoteStyle::Necessary
        } else {
            QuoteStyle::Never
        };
        let writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(style)
            .from_writer(out);
        CsvReport { writer }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(HEADER)?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &SuiteRecord) -> Result<()> {
        self.writer.write_record(record.fields())?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| anyhow::anyhow!("Failed to output CSV: {}", err.error()))
    }
}
