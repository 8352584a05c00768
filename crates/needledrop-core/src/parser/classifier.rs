use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::grammar::{Era, TitleGrammar};
use crate::parser::rating::RatingPattern;
use crate::types::VideoRecord;

/// Why a video was or was not accepted as a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Review-shaped title and a rated description.
    Review,
    /// Title is on the grammar's ignore list.
    Ignored,
    /// Title does not follow its era's review format.
    NotReviewShaped,
    /// Title looks like a review but the description has no score.
    Unrated,
}

impl Classification {
    /// Returns `true` for [`Classification::Review`].
    #[must_use]
    pub fn is_review(self) -> bool {
        self == Self::Review
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Review => write!(f, "review"),
            Self::Ignored => write!(f, "ignored"),
            Self::NotReviewShaped => write!(f, "not-review-shaped"),
            Self::Unrated => write!(f, "unrated"),
        }
    }
}

/// Decides whether a video is a rated album review.
///
/// New-era titles need a literal `"<TYPE> REVIEW"` substring; old-era titles
/// need the `<artist>- <title> Review` shape. Either way the description must
/// also carry an `N/10` score, which keeps retrospectives and Q&A uploads
/// that mention "Review" out of the dataset.
pub struct Classifier {
    grammar: Arc<TitleGrammar>,
    new_era_needles: Vec<String>,
    re_old_era: Regex,
    rating: RatingPattern,
}

impl Classifier {
    /// Builds a classifier over the given grammar.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::RegexError` if a pattern fails to compile.
    pub fn new(grammar: Arc<TitleGrammar>) -> Result<Self> {
        let new_era_needles = grammar
            .new_era_markers
            .iter()
            .map(|marker| format!("{marker} REVIEW"))
            .collect();

        Ok(Self {
            grammar,
            new_era_needles,
            re_old_era: Regex::new(r#"^.+- [^"]+ Review"#)?,
            rating: RatingPattern::new()?,
        })
    }

    /// Classifies a single video.
    #[must_use]
    pub fn classify(&self, video: &VideoRecord) -> Classification {
        let verdict = if self.grammar.is_ignored(&video.title) {
            Classification::Ignored
        } else if !self.is_review_shaped(&video.title, self.era(video)) {
            Classification::NotReviewShaped
        } else if !self.rating.is_rated(&video.description) {
            Classification::Unrated
        } else {
            Classification::Review
        };

        debug!(video_id = %video.video_id, title = %video.title, %verdict, "classified video");
        verdict
    }

    /// Returns `true` iff the video is a rated, non-ignored review.
    #[must_use]
    pub fn is_review(&self, video: &VideoRecord) -> bool {
        self.classify(video).is_review()
    }

    /// Era the video was published in.
    #[must_use]
    pub fn era(&self, video: &VideoRecord) -> Era {
        self.grammar.era(&video.published_at)
    }

    /// Returns `true` if `title` follows the review format of `era`.
    #[must_use]
    pub fn is_review_shaped(&self, title: &str, era: Era) -> bool {
        match era {
            Era::New => self
                .new_era_needles
                .iter()
                .any(|needle| title.contains(needle.as_str())),
            Era::Old => self.re_old_era.is_match(title),
        }
    }

    /// The grammar this classifier reads.
    pub fn grammar(&self) -> &TitleGrammar {
        &self.grammar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::APRIL_FOOLS_REVIEW;

    fn classifier() -> Classifier {
        Classifier::new(Arc::new(TitleGrammar::default())).unwrap()
    }

    fn video(published_at: &str, title: &str, description: &str) -> VideoRecord {
        VideoRecord::parse("id", published_at, title, description).unwrap()
    }

    #[test]
    fn new_era_markers_with_rating() {
        let c = classifier();
        for title in [
            "Flying Lotus- Cosmogramma ALBUM REVIEW",
            "JPEGMAFIA - Veteran MIXTAPE REVIEW",
            "Burial - Antidawn EP REVIEW",
        ] {
            let v = video("2022-01-08T18:52:54Z", title, "8/10 http://theneedledrop.com");
            assert!(c.is_review(&v), "should be a review: {title}");
        }
    }

    #[test]
    fn ignored_title_overrides_everything() {
        let c = classifier();
        let v = video("2013-04-01T12:00:00Z", APRIL_FOOLS_REVIEW, "7/10");
        assert_eq!(c.classify(&v), Classification::Ignored);
        assert!(!c.is_review(&v));
    }

    #[test]
    fn comma_suffixed_ratings_only_is_unrated() {
        let c = classifier();
        let v = video(
            "2019-12-20T12:00:00Z",
            "Best Albums of the Decade ALBUM REVIEW",
            "9/10, 8/10, 7/10,",
        );
        assert_eq!(c.classify(&v), Classification::Unrated);
    }

    #[test]
    fn word_rating_is_unrated() {
        let c = classifier();
        let v = video(
            "2022-01-08T18:52:54Z",
            "Cocteau Twins - Heaven or Las Vegas ALBUM REVIEW",
            "COCTEAU TWINS - HEAVEN OR LAS VEGAS / 1990 / 4AD / DREAM POP\n\nCLASSIC/10",
        );
        assert_eq!(c.classify(&v), Classification::Unrated);
    }

    #[test]
    fn new_era_substring_is_not_word_aware() {
        let c = classifier();
        let v = video("2015-06-01T00:00:00Z", "Some DEEP REVIEW of things", "6/10");
        assert!(c.is_review(&v));
    }

    #[test]
    fn new_era_rejects_lowercase_review() {
        let c = classifier();
        let v = video("2015-06-01T00:00:00Z", "Radiohead- In Rainbows Review", "9/10");
        assert_eq!(c.classify(&v), Classification::NotReviewShaped);
    }

    #[test]
    fn old_era_shape() {
        let c = classifier();
        let v = video(
            "2010-03-03T03:25:15Z",
            "Gorillaz- Plastic Beach Review",
            "7/10 http://bit.ly/9k9Chc",
        );
        assert_eq!(c.era(&v), Era::Old);
        assert!(c.is_review(&v));

        let v = video("2010-03-03T03:25:15Z", "Gorillaz- \"Stylo\" Review", "7/10");
        assert_eq!(c.classify(&v), Classification::NotReviewShaped);

        let v = video("2010-03-03T03:25:15Z", "Gorillaz- Plastic Beach ALBUM REVIEW", "7/10");
        assert_eq!(c.classify(&v), Classification::NotReviewShaped);
    }

    #[test]
    fn cutoff_switches_grammar() {
        let c = classifier();
        let title = "Flying Lotus- Cosmogramma ALBUM REVIEW";
        assert!(c.is_review(&video("2010-05-05T18:34:43Z", title, "8/10")));
        assert!(!c.is_review(&video("2010-05-05T18:34:42Z", title, "8/10")));
    }

    #[test]
    fn classification_serializes_kebab_case() {
        let json = serde_json::to_string(&Classification::NotReviewShaped).unwrap();
        assert_eq!(json, "\"not-review-shaped\"");
        assert_eq!(Classification::Unrated.to_string(), "unrated");
    }
}
