use crate::model::{ReportError, ReportRow};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const HEADER: [&str; 6] = ["name", "screen_name", "text", "polarity", "subjectivity", "label"];

/// Writes the header and one fully quoted record per row.
///
/// The header is always written, so an empty report still has it.
pub fn write_rows<W: Write>(out: W, rows: &[ReportRow]) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(out);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report into it as UTF-8.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_rows(file, rows).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved report: {} ({} rows)", path.display(), rows.len());
    Ok(())
}
