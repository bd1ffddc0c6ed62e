//! CSV export of record collections.
//!
//! A file always starts with a header row naming `columns`, followed by one
//! row per record in the order given. Fields a record lacks are written as
//! empty cells. An empty collection produces a header-only file.
//!
//! Callers choose what to pass: the table views hand over their visible rows
//! (the active filter, in display order), the calendar hands over every
//! event.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Record;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed writing csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `records` as CSV to `out`. Returns the number of data rows.
pub fn write_csv<'a, W, S, I>(out: W, columns: &[S], records: I) -> Result<usize, csv::Error>
where
    W: io::Write,
    S: AsRef<str>,
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|c| c.as_ref()))?;

    let mut rows = 0;
    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|c| record.text(c.as_ref()).unwrap_or_default()),
        )?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Create (or truncate) `path` and write `records` to it as CSV.
pub fn export_csv<'a, S, I>(path: &Path, columns: &[S], records: I) -> Result<usize, ExportError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'a Record>,
{
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_csv(file, columns, records)?;
    tracing::info!(path = %path.display(), rows, "export: csv written");
    Ok(rows)
}
