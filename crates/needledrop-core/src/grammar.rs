//! # Title Grammar
//!
//! The read-only lookup tables that drive classification and extraction:
//! era markers, the era cutoff, the ignore list, hand-authored edge cases
//! and the record-label tokens that leak into genre lists.
//!
//! A grammar is built once, validated, and shared by reference between the
//! classifier and the extractor. Nothing mutates it after construction.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NeedledropError, Result};

/// Type markers used from "Flying Lotus- Cosmogramma ALBUM REVIEW" onward.
pub const NEW_ERA_MARKERS: [&str; 3] = ["ALBUM", "MIXTAPE", "EP"];

/// Type markers used by titles published before the cutoff.
pub const OLD_ERA_MARKERS: [&str; 2] = ["Album", "Review"];

/// Publish moment of "Flying Lotus- Cosmogramma ALBUM REVIEW"
/// (2010-05-05T18:34:43Z) in Unix seconds.
pub const ERA_CUTOFF_TIMESTAMP: i64 = 1_273_084_483;

/// Uploaded twice with conflicting ratings (an April Fools' video).
pub const APRIL_FOOLS_REVIEW: &str = "PLANNINGTOROCK - All Love's Legal ALBUM REVIEW";

/// Label names seen in descriptions of reviews that carry no genre tags.
/// Not exhaustive: unknown labels still come through as genres.
pub const LABELS: [&str; 6] = [
    "RECORDS",
    "FORTUNA",
    "DEAD OCEANS",
    "PLUDERPHONICS",
    "DOMINO",
    "PGLANG",
];

const EDGE_CASES: [(&str, &str, &str); 4] = [
    (
        "An Evening with Silk Sonic ALBUM REVIEW",
        "Silk Sonic",
        "An Evening with Silk Sonic",
    ),
    (
        "Belle and Sebastian Write About Love ALBUM REVIEW",
        "Belle and Sebastian",
        "Belle and Sebastian Write About Love",
    ),
    (
        "Master Musicians of Bukkake-Totem 3 ALBUM REVIEW",
        "Master Musicians of Bukkake",
        "Totem 3",
    ),
    (
        "CX KiDTRONiK: KRAK ATTACK 2: THE BALLAD OF ELLI SKIFF ALBUM REVIEW",
        "CX KiDTRONiK",
        "KRAK ATTACK 2: THE BALLAD OF ELLI SKIFF",
    ),
];

/// Which title convention a video was published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    /// Before the cutoff: `<artist>- <title> Review`.
    Old,
    /// At or after the cutoff: `<artist> - <title> <TYPE> REVIEW`.
    New,
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Old => write!(f, "old"),
            Self::New => write!(f, "new"),
        }
    }
}

/// Hand-authored artist and work title for a title that fits no grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCase {
    pub artist: String,
    pub work_title: String,
}

/// Versioned lookup tables for both title eras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleGrammar {
    /// Markers that precede `" REVIEW"` in new-era titles.
    pub new_era_markers: Vec<String>,

    /// Markers that end the work title in old-era titles.
    pub old_era_markers: Vec<String>,

    /// Videos published at or after this moment are new era.
    pub era_cutoff: DateTime<FixedOffset>,

    /// Titles that are never reviews, whatever else they match.
    pub ignored_titles: Vec<String>,

    /// Exact-title overrides for artist/work title extraction.
    pub edge_cases: BTreeMap<String, EdgeCase>,

    /// Substrings that mark a description token as a record label.
    pub labels: Vec<String>,
}

impl Default for TitleGrammar {
    fn default() -> Self {
        // DateTime<Utc>::default() is the Unix epoch.
        let era_cutoff = (DateTime::<Utc>::default() + TimeDelta::seconds(ERA_CUTOFF_TIMESTAMP))
            .fixed_offset();

        Self {
            new_era_markers: NEW_ERA_MARKERS.iter().map(|m| m.to_string()).collect(),
            old_era_markers: OLD_ERA_MARKERS.iter().map(|m| m.to_string()).collect(),
            era_cutoff,
            ignored_titles: vec![APRIL_FOOLS_REVIEW.to_string()],
            edge_cases: EDGE_CASES
                .iter()
                .map(|(title, artist, work_title)| {
                    (
                        title.to_string(),
                        EdgeCase {
                            artist: artist.to_string(),
                            work_title: work_title.to_string(),
                        },
                    )
                })
                .collect(),
            labels: LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl TitleGrammar {
    /// Create the built-in grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a grammar from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::GrammarFormat` for malformed JSON and
    /// `NeedledropError::InvalidGrammar` if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let grammar: Self = serde_json::from_str(json)?;
        grammar.validate()?;
        Ok(grammar)
    }

    /// Register an exact-title override.
    pub fn with_edge_case(
        mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        work_title: impl Into<String>,
    ) -> Self {
        self.edge_cases.insert(
            title.into(),
            EdgeCase {
                artist: artist.into(),
                work_title: work_title.into(),
            },
        );
        self
    }

    /// Add a title that must never classify as a review.
    pub fn with_ignored_title(mut self, title: impl Into<String>) -> Self {
        self.ignored_titles.push(title.into());
        self
    }

    /// Add a record-label token to filter out of genre lists.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Checks that every table is usable by the matchers built from it.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::InvalidGrammar` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.new_era_markers.is_empty() {
            return Err(NeedledropError::InvalidGrammar(
                "no new-era markers".into(),
            ));
        }
        if self.old_era_markers.is_empty() {
            return Err(NeedledropError::InvalidGrammar(
                "no old-era markers".into(),
            ));
        }
        if let Some(marker) = self
            .new_era_markers
            .iter()
            .chain(&self.old_era_markers)
            .find(|m| m.trim().is_empty())
        {
            return Err(NeedledropError::InvalidGrammar(format!(
                "blank marker {marker:?}"
            )));
        }
        if self.labels.iter().any(|l| l.is_empty()) {
            // An empty label is a substring of every token and would drop all genres.
            return Err(NeedledropError::InvalidGrammar("empty label".into()));
        }
        for (title, case) in &self.edge_cases {
            if case.artist.trim().is_empty() || case.work_title.trim().is_empty() {
                return Err(NeedledropError::InvalidGrammar(format!(
                    "edge case {title:?} has a blank artist or work title"
                )));
            }
        }
        Ok(())
    }

    /// Era a video published at `published_at` belongs to.
    #[must_use]
    pub fn era(&self, published_at: &DateTime<FixedOffset>) -> Era {
        if *published_at >= self.era_cutoff {
            Era::New
        } else {
            Era::Old
        }
    }

    /// Returns `true` if `title` is on the ignore list.
    #[must_use]
    pub fn is_ignored(&self, title: &str) -> bool {
        self.ignored_titles.iter().any(|t| t == title)
    }

    /// Looks up the override for an exact title.
    #[must_use]
    pub fn edge_case(&self, title: &str) -> Option<&EdgeCase> {
        self.edge_cases.get(title)
    }

    /// Returns `true` if `token` contains any known label.
    #[must_use]
    pub fn is_label(&self, token: &str) -> bool {
        self.labels.iter().any(|label| token.contains(label.as_str()))
    }
}
