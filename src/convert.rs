use crate::extract::extract_suite;
use crate::report::CsvReport;
use anyhow::Result;
use log::{debug, error, warn};
use std::io;
use std::path::PathBuf;

/// Outcome of one batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

/**
Write the CSV summary of `files` to `out`.

Files are processed one at a time in path order, whatever order they were listed in. A file that
cannot be summarised is logged and left out; only a failure of `out` itself is an error.
*/
pub fn convert<W: io::Write>(mut files: Vec<PathBuf>, out: W, quote: bool) -> Result<Summary> {
    files.sort();

    let mut report = CsvReport::new(out, quote);
    report.write_header()?;

    let mut summary = Summary::default();
    for path in files {
        debug!("Extracting {}", path.display());
        match extract_suite(&path) {
            Ok(record) => {
                report.write_record(&record)?;
                summary.written += 1;
            }
            Err(err) if err.is_shape_mismatch() => {
                warn!("Skipping {}: {}", path.display(), err);
                summary.skipped += 1;
            }
            Err(err) => {
                error!("Error parsing {}: {}", path.display(), err);
                summary.skipped += 1;
            }
        }
    }

    report.finish()?;
    Ok(summary)
}
