use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::{NeedledropError, Result};

/// Parses an RFC 3339 publish timestamp ("2010-05-05T18:34:43Z").
///
/// # Errors
///
/// Returns `NeedledropError::Timestamp` naming the offending value.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|source| NeedledropError::Timestamp {
        value: value.to_string(),
        source,
    })
}

/// Formats a publish timestamp the way the upload API writes it: whole
/// seconds, `Z` for UTC, the numeric offset otherwise.
#[must_use]
pub fn format_timestamp(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Metadata for one uploaded video, as supplied by the fetch layer.
///
/// Deserializes from either the upstream playlist-item shape
/// (`{"snippet": {"publishedAt", "title", "description", "resourceId": {"videoId"}}}`)
/// or the flat shape this type serializes to
/// (`{"videoId", "publishedAt", "title", "description"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawVideo")]
pub struct VideoRecord {
    /// Upstream video identifier. Empty when the source omitted it.
    pub video_id: String,

    /// Publish moment, offset preserved.
    pub published_at: DateTime<FixedOffset>,

    /// Video title as uploaded.
    pub title: String,

    /// Full description text.
    pub description: String,
}

impl VideoRecord {
    /// Creates a video record from already-parsed fields.
    #[must_use]
    pub fn new(
        video_id: impl Into<String>,
        published_at: DateTime<FixedOffset>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            published_at,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Creates a video record, parsing `published_at` as RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::Timestamp` if the timestamp is malformed.
    pub fn parse(
        video_id: impl Into<String>,
        published_at: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(
            video_id,
            parse_timestamp(published_at)?,
            title,
            description,
        ))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVideo {
    Playlist(PlaylistItem),
    Flat(FlatVideo),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    snippet: Snippet,
    #[serde(default)]
    content_details: Option<VideoRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    published_at: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    resource_id: Option<VideoRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRef {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatVideo {
    #[serde(default)]
    video_id: String,
    published_at: String,
    title: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawVideo> for VideoRecord {
    type Error = NeedledropError;

    fn try_from(raw: RawVideo) -> Result<Self> {
        match raw {
            RawVideo::Playlist(item) => {
                let video_id = item
                    .snippet
                    .resource_id
                    .and_then(|r| r.video_id)
                    .or_else(|| item.content_details.and_then(|c| c.video_id))
                    .unwrap_or_default();
                Self::parse(
                    video_id,
                    &item.snippet.published_at,
                    item.snippet.title,
                    item.snippet.description,
                )
            }
            RawVideo::Flat(flat) => Self::parse(
                flat.video_id,
                &flat.published_at,
                flat.title,
                flat.description,
            ),
        }
    }
}
