//! # Collator
//!
//! Runs a batch of videos through classification and extraction and orders
//! the resulting reviews newest first.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{NeedledropError, Result};
use crate::grammar::TitleGrammar;
use crate::parser::classifier::Classifier;
use crate::parser::extractor::Extractor;
use crate::types::{ReviewRecord, VideoRecord};

/// A video that classified as a review but could not be extracted.
#[derive(Debug)]
pub struct SkippedVideo {
    pub video_id: String,
    pub title: String,
    pub error: NeedledropError,
}

/// Output of [`Collator::collect`].
#[derive(Debug, Default)]
pub struct Collection {
    /// Reviews sorted by publish time, newest first.
    pub reviews: Vec<ReviewRecord>,
    /// Reviews dropped because extraction failed, in input order.
    pub skipped: Vec<SkippedVideo>,
}

impl Collection {
    /// Returns `true` if no review was collected or skipped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty() && self.skipped.is_empty()
    }
}

/// Classifier and extractor sharing one grammar.
pub struct Collator {
    classifier: Classifier,
    extractor: Extractor,
}

impl Collator {
    /// Create a collator over the given grammar.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::InvalidGrammar` if the grammar fails
    /// validation, or `NeedledropError::RegexError` if a pattern fails to
    /// compile.
    pub fn new(grammar: TitleGrammar) -> Result<Self> {
        grammar.validate()?;
        Self::with_grammar(Arc::new(grammar))
    }

    /// Create a collator over an already validated, shared grammar.
    pub fn with_grammar(grammar: Arc<TitleGrammar>) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(Arc::clone(&grammar))?,
            extractor: Extractor::new(grammar)?,
        })
    }

    /// Create a collator over the built-in grammar.
    pub fn default() -> Result<Self> {
        Self::new(TitleGrammar::default())
    }

    /// Classifies, extracts and sorts a batch of videos.
    ///
    /// Extraction failures never abort the batch; they are logged and
    /// reported in [`Collection::skipped`].
    ///
    /// # Examples
    /// ```
    /// use needledrop_core::parser::Collator;
    /// use needledrop_core::types::VideoRecord;
    ///
    /// let videos = vec![
    ///     VideoRecord::parse("a", "2012-10-22T14:27:09Z", "Kendrick Lamar- good kid, m.A.A.d. city ALBUM REVIEW", "9/10").unwrap(),
    ///     VideoRecord::parse("b", "2022-05-17T04:59:34Z", "Kendrick Lamar - Mr. Morale & The Big Steppers ALBUM REVIEW", "8/10").unwrap(),
    ///     VideoRecord::parse("c", "2022-05-18T00:00:00Z", "Weekly Track Roundup: 5/18", "").unwrap(),
    /// ];
    ///
    /// let collection = Collator::default().unwrap().collect(&videos);
    /// assert_eq!(collection.reviews.len(), 2);
    /// assert_eq!(collection.reviews[0].work_title, "Mr. Morale & The Big Steppers");
    /// ```
    #[must_use]
    pub fn collect<'a, I>(&self, videos: I) -> Collection
    where
        I: IntoIterator<Item = &'a VideoRecord>,
    {
        let mut collection = Collection::default();
        let mut seen = 0usize;

        for video in videos {
            seen += 1;
            if !self.classifier.is_review(video) {
                continue;
            }
            match self.extractor.extract(video) {
                Ok(review) => collection.reviews.push(review),
                Err(error) => {
                    warn!(video_id = %video.video_id, title = %video.title, %error, "skipping review");
                    collection.skipped.push(SkippedVideo {
                        video_id: video.video_id.clone(),
                        title: video.title.clone(),
                        error,
                    });
                }
            }
        }

        // Stable: equal timestamps keep input order.
        collection
            .reviews
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));

        debug!(
            videos = seen,
            reviews = collection.reviews.len(),
            skipped = collection.skipped.len(),
            "collected reviews"
        );
        collection
    }

    /// Runs one video through classification and extraction.
    ///
    /// Returns `Ok(None)` when the video is not a review.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::Extraction` if the video is a review whose
    /// title cannot be split.
    pub fn process_one(&self, video: &VideoRecord) -> Result<Option<ReviewRecord>> {
        if !self.classifier.is_review(video) {
            return Ok(None);
        }
        self.extractor.extract(video).map(Some)
    }

    /// The classifier used by this collator.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The extractor used by this collator.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}

/// Convenience function to collect reviews with the built-in grammar.
pub fn collect<'a, I>(videos: I) -> Result<Collection>
where
    I: IntoIterator<Item = &'a VideoRecord>,
{
    let collator = Collator::default()?;
    Ok(collator.collect(videos))
}
