use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::errors::UploadsError;
use crate::models::VideoRecord;

pub const FIELDNAMES: [&str; 4] = ["Title", "URL", "Published", "Video_ID"];

/// Writes the header and one row per record, replacing any existing file.
pub fn write_records(path: &Path, records: &[VideoRecord]) -> Result<usize, UploadsError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(BufWriter::new(file));

    writer.write_record(FIELDNAMES)?;
    for record in records {
        writer.write_record([
            record.title.as_str(),
            record.url.as_str(),
            record.published.as_str(),
            record.video_id.as_str(),
        ])?;
    }
    writer.flush()?;
    let mut inner = writer
        .into_inner()
        .map_err(|err| UploadsError::Io(err.into_error()))?;
    inner.flush()?;

    debug!(path = %path.display(), rows = records.len(), "wrote csv");
    Ok(records.len())
}

/// Reads an export back. A missing file yields no records.
pub fn read_records(path: &Path) -> Result<Vec<VideoRecord>, UploadsError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    if headers.iter().ne(FIELDNAMES.iter().copied()) {
        return Err(UploadsError::Other(format!(
            "unexpected CSV header in {}: {}",
            path.display(),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: VideoRecord = row?;
        records.push(record);
    }
    Ok(records)
}
