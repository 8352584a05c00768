use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Highest rating a review can carry.
pub const MAX_RATING: u8 = 10;

/// The primary output of the extraction engine.
///
/// One record per video that classified as a review. `artist` and
/// `work_title` are never empty; `rating`, when present, is in `0..=10`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    /// Publish moment of the review video.
    pub published_at: DateTime<FixedOffset>,

    /// Raw video title, verbatim.
    pub title: String,

    /// Reviewed artist.
    pub artist: String,

    /// Reviewed album, mixtape or EP.
    pub work_title: String,

    /// Numeric score out of ten, if the description carried one.
    pub rating: Option<u8>,

    /// Lowercased genre tags in description order.
    pub genres: Vec<String>,
}

impl ReviewRecord {
    /// Returns `true` if the review carries a numeric rating.
    #[must_use]
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    /// Returns `true` if any genre tag was extracted.
    #[must_use]
    pub fn has_genres(&self) -> bool {
        !self.genres.is_empty()
    }
}

impl std::fmt::Display for ReviewRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.work_title)?;
        match self.rating {
            Some(rating) => write!(f, " [{rating}/{MAX_RATING}]")?,
            None => write!(f, " [unrated]")?,
        }
        if !self.genres.is_empty() {
            write!(f, " ({})", self.genres.join(", "))?;
        }
        Ok(())
    }
}
