//! Reading and writing review datasets and video dumps.
//!
//! Everything works over generic readers and writers; opening files is the
//! caller's business.

use std::io::{BufRead, Read, Seek, SeekFrom, Write};

use needledrop_core::types::{ReviewRecord, VideoRecord};
use tracing::{debug, warn};

use crate::error::{DatasetError, Result};
use crate::row::{CSV_HEADER, ReviewRow};

/// Writes the dataset as CSV with a header row.
///
/// Unrated reviews get an empty `rating` cell. An empty dataset still gets
/// its header.
///
/// # Errors
///
/// Returns `DatasetError::Csv` or `DatasetError::Io` if writing fails.
pub fn write_csv<W: Write>(writer: W, reviews: &[ReviewRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if reviews.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for review in reviews {
        writer.serialize(ReviewRow::from(review))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a CSV dataset written by [`write_csv`] or [`append_csv`].
///
/// # Errors
///
/// Returns `DatasetError::Csv` for malformed records, or a row conversion
/// error.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ReviewRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut reviews = Vec::new();
    for row in reader.deserialize::<ReviewRow>() {
        reviews.push(row?.into_record()?);
    }
    debug!(reviews = reviews.len(), "read CSV dataset");
    Ok(reviews)
}

/// Appends one review to a CSV dataset, writing the header first if the
/// file is empty.
///
/// # Errors
///
/// Returns `DatasetError::Csv` or `DatasetError::Io` if writing fails.
pub fn append_csv<F: Read + Write + Seek>(mut file: F, review: &ReviewRecord) -> Result<()> {
    let empty = seek_to_new_line(&mut file)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(empty)
        .from_writer(file);
    writer.serialize(ReviewRow::from(review))?;
    writer.flush()?;
    Ok(())
}

/// Appends one review to a JSON Lines dataset.
///
/// # Errors
///
/// Returns `DatasetError::Json` or `DatasetError::Io` if writing fails.
pub fn append_json_line<F: Read + Write + Seek>(mut file: F, review: &ReviewRecord) -> Result<()> {
    seek_to_new_line(&mut file)?;
    serde_json::to_writer(&mut file, &ReviewRow::from(review))?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

/// Moves to the end of `file`, terminating its last line if a hand edit
/// left it open. Returns `true` if the file is empty.
fn seek_to_new_line<F: Read + Write + Seek>(file: &mut F) -> Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        warn!("dataset does not end with a newline, terminating its last line");
        file.write_all(b"\n")?;
    }
    Ok(false)
}

/// Writes one row per line.
///
/// # Errors
///
/// Returns `DatasetError::Json` or `DatasetError::Io` if writing fails.
pub fn write_json_lines<W: Write>(mut writer: W, reviews: &[ReviewRecord]) -> Result<()> {
    for review in reviews {
        serde_json::to_writer(&mut writer, &ReviewRow::from(review))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a JSON Lines dataset, skipping blank lines.
///
/// # Errors
///
/// Returns `DatasetError::JsonLine` with the 1-based line number for a
/// malformed line, or a row conversion error.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<ReviewRecord>> {
    let mut reviews = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: ReviewRow = serde_json::from_str(&line).map_err(|source| {
            DatasetError::JsonLine {
                line: idx + 1,
                source,
            }
        })?;
        reviews.push(row.into_record()?);
    }
    debug!(reviews = reviews.len(), "read JSON Lines dataset");
    Ok(reviews)
}

/// Writes the dataset as a pretty-printed JSON array of rows.
///
/// # Errors
///
/// Returns `DatasetError::Json` or `DatasetError::Io` if writing fails.
pub fn write_json<W: Write>(mut writer: W, reviews: &[ReviewRecord]) -> Result<()> {
    let rows: Vec<ReviewRow> = reviews.iter().map(ReviewRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a dataset written by [`write_json`].
///
/// # Errors
///
/// Returns `DatasetError::Json` for malformed input, or a row conversion
/// error.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<ReviewRecord>> {
    let rows: Vec<ReviewRow> = serde_json::from_reader(reader)?;
    let reviews = rows
        .into_iter()
        .map(ReviewRow::into_record)
        .collect::<Result<Vec<_>>>()?;
    debug!(reviews = reviews.len(), "read JSON dataset");
    Ok(reviews)
}

/// Reads a JSON array of videos, in playlist-item or flat shape.
///
/// # Errors
///
/// Returns `DatasetError::Json` for malformed input or timestamps.
pub fn read_videos<R: Read>(reader: R) -> Result<Vec<VideoRecord>> {
    let videos: Vec<VideoRecord> = serde_json::from_reader(reader)?;
    debug!(videos = videos.len(), "read video dump");
    Ok(videos)
}

/// Returns `true` if `dataset` already holds a review published at the same
/// moment under the same title.
#[must_use]
pub fn contains_review(dataset: &[ReviewRecord], review: &ReviewRecord) -> bool {
    dataset
        .iter()
        .any(|r| r.published_at == review.published_at && r.title == review.title)
}

/// Appends `review` unless an identical `(publishedAt, title)` entry exists.
///
/// Returns `true` if the review was appended. Repeated notifications for the
/// same upload are therefore harmless.
pub fn append_review(dataset: &mut Vec<ReviewRecord>, review: ReviewRecord) -> bool {
    if contains_review(dataset, &review) {
        warn!(title = %review.title, "review already in dataset, not appending");
        return false;
    }
    dataset.push(review);
    true
}
