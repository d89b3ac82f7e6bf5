//! Delimited-text loading and export of segment tables.
//!
//! Reading is by header name, so column order in the input does not
//! matter. Export always writes the canonical column order of
//! [`SegmentRecord::COLUMNS`].

use crate::core::{validate_record, SegmentCollection, SegmentRecord};
use crate::errors::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse a segment table from any reader.
///
/// Missing columns and unparseable values are [`Error::MalformedInput`].
/// Records that parse but fail validation are logged and kept.
pub fn read_segments<R: Read>(reader: R) -> Result<SegmentCollection> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if let Some(missing) = SegmentRecord::COLUMNS
        .iter()
        .find(|&&column| !headers.iter().any(|h| h == column))
    {
        return Err(Error::malformed(1, format!("missing column '{}'", missing)));
    }

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    // Header is line 1
    let mut last_line = 1;
    loop {
        let more = csv_reader.read_record(&mut row).map_err(|e| {
            let line = e.position().map_or(last_line + 1, |p| p.line());
            Error::malformed(line, e.to_string())
        })?;
        if !more {
            break;
        }

        // Quoted fields may span lines, so take the line the record starts on
        let line = row.position().map_or(last_line + 1, |p| p.line());
        last_line = line;

        let record: SegmentRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| Error::malformed(line, e.to_string()))?;

        for issue in validate_record(&record) {
            warn!(line, %issue, "Keeping malformed record");
        }
        records.push(record);
    }

    debug!(records = records.len(), "Parsed segment table");
    Ok(SegmentCollection::new(records))
}

/// Load a segment table from a file.
///
/// A missing or unreadable file is [`Error::InputUnavailable`].
pub fn load_segments(path: &Path) -> Result<SegmentCollection> {
    let file = File::open(path).map_err(|e| Error::input_unavailable(path, e))?;
    let collection = read_segments(BufReader::new(file))?;
    info!(path = %path.display(), records = collection.len(), "Loaded segments");
    Ok(collection)
}

/// Write records with a header row, even when there are no records
pub fn write_segments<'a, W, I>(records: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a SegmentRecord>,
{
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(SegmentRecord::COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export records to a file, creating parent directories as needed
pub fn export_csv<'a, I>(records: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a SegmentRecord>,
{
    super::ensure_parent_dir(path)?;
    let file = File::create(path)?;
    write_segments(records, BufWriter::new(file))?;
    info!(path = %path.display(), "Exported segments");
    Ok(())
}
