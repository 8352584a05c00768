use needledrop_core::types::{MAX_RATING, ReviewRecord, format_timestamp, parse_timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Joins genre tags in flat storage (`"hip hop;experimental"`).
pub const GENRE_DELIMITER: &str = ";";

/// Column names of the CSV dataset, in order.
pub const CSV_HEADER: [&str; 6] = ["publishedAt", "title", "artist", "workTitle", "rating", "genres"];

/// One review flattened for tabular storage.
///
/// Column order matches the published dataset:
/// `publishedAt, title, artist, workTitle, rating, genres`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRow {
    /// RFC 3339 publish timestamp, `Z` for UTC.
    pub published_at: String,
    pub title: String,
    pub artist: String,
    pub work_title: String,
    pub rating: Option<u8>,
    /// Genre tags joined with [`GENRE_DELIMITER`]; empty when untagged.
    #[serde(default)]
    pub genres: String,
}

impl From<&ReviewRecord> for ReviewRow {
    fn from(review: &ReviewRecord) -> Self {
        Self {
            published_at: format_timestamp(&review.published_at),
            title: review.title.clone(),
            artist: review.artist.clone(),
            work_title: review.work_title.clone(),
            rating: review.rating,
            genres: review.genres.join(GENRE_DELIMITER),
        }
    }
}

impl ReviewRow {
    /// Converts the row back into a review record.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Core` for a malformed timestamp and
    /// `DatasetError::InvalidRow` for a blank artist or work title or a
    /// rating above ten.
    pub fn into_record(self) -> Result<ReviewRecord> {
        let published_at = parse_timestamp(&self.published_at)?;

        if self.artist.trim().is_empty() || self.work_title.trim().is_empty() {
            return Err(DatasetError::InvalidRow {
                title: self.title,
                reason: "blank artist or work title".into(),
            });
        }
        if let Some(rating) = self.rating.filter(|r| *r > MAX_RATING) {
            return Err(DatasetError::InvalidRow {
                title: self.title,
                reason: format!("rating {rating} is out of range"),
            });
        }

        let genres = self
            .genres
            .split(GENRE_DELIMITER)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ReviewRecord {
            published_at,
            title: self.title,
            artist: self.artist,
            work_title: self.work_title,
            rating: self.rating,
            genres,
        })
    }
}
