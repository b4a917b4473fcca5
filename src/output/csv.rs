//! CSV writer and reader for [`Dataset`] tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};
use tracing::{debug, info, instrument};

use super::OutputError;
use crate::collect::Record;
use crate::dataset::Dataset;

/// UTF-8 byte-order mark written before the header row.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Writes `dataset` to `path` with a header row.
///
/// Rows go to a sibling temporary file that is renamed over `path` once
/// complete, so a failure never leaves a partial table at `path`.
///
/// # Errors
///
/// Returns [`OutputError`] if the file cannot be created, written or renamed.
#[instrument(skip(dataset), fields(path = %path.display(), rows = dataset.len()))]
pub fn write_csv(path: &Path, dataset: &Dataset) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::io(parent, e))?;
    }

    let tmp_path = temp_path(path);
    let result = write_rows(&tmp_path, dataset);
    if result.is_err() {
        debug!(path = %tmp_path.display(), "cleaning up partial table after error");
        let _ = std::fs::remove_file(&tmp_path);
        return result;
    }

    std::fs::rename(&tmp_path, path).map_err(|e| OutputError::io(path, e))?;
    info!(rows = dataset.len(), "table written");
    Ok(())
}

/// Reads a table written by [`write_csv`]. A leading BOM is optional.
///
/// # Errors
///
/// Returns [`OutputError`] if the file cannot be read or a row does not
/// match the record columns.
#[instrument(fields(path = %path.display()))]
pub fn read_csv(path: &Path) -> Result<Vec<Record>, OutputError> {
    let bytes = std::fs::read(path).map_err(|e| OutputError::io(path, e))?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(body);
    let records = reader
        .deserialize::<Record>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| OutputError::csv(path, e))?;

    debug!(rows = records.len(), "table read");
    Ok(records)
}

fn write_rows(path: &Path, dataset: &Dataset) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    buf_writer
        .write_all(UTF8_BOM)
        .map_err(|e| OutputError::io(path, e))?;

    let mut writer = Writer::from_writer(buf_writer);
    // The header comes from serialize() on the first row; an empty table
    // still gets one.
    if dataset.is_empty() {
        writer
            .write_record(Record::COLUMNS)
            .map_err(|e| OutputError::csv(path, e))?;
    }
    for record in dataset.records() {
        writer
            .serialize(record)
            .map_err(|e| OutputError::csv(path, e))?;
    }

    let buf_writer = writer
        .into_inner()
        .map_err(|e| OutputError::io(path, e.into_error()))?;
    let file = buf_writer
        .into_inner()
        .map_err(|e| OutputError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| OutputError::io(path, e))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
