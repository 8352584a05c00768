use std::sync::Arc;

use tracing::debug;

use crate::error::{NeedledropError, Result};
use crate::grammar::TitleGrammar;
use crate::parser::genres::GenrePattern;
use crate::parser::rating::RatingPattern;
use crate::parser::title::TitleMatchers;
use crate::types::{ReviewRecord, VideoRecord};

/// Turns a video already classified as a review into a [`ReviewRecord`].
///
/// The extractor does not re-check classification; calling it on a
/// non-review gives whatever the patterns happen to produce.
pub struct Extractor {
    grammar: Arc<TitleGrammar>,
    rating: RatingPattern,
    genres: GenrePattern,
    titles: TitleMatchers,
}

impl Extractor {
    /// Builds an extractor over the given grammar.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::RegexError` if a pattern fails to compile.
    pub fn new(grammar: Arc<TitleGrammar>) -> Result<Self> {
        let titles = TitleMatchers::new(&grammar)?;
        Ok(Self {
            grammar,
            rating: RatingPattern::new()?,
            genres: GenrePattern::new()?,
            titles,
        })
    }

    /// Extracts the structured review.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::Extraction` if the title is neither an edge
    /// case nor splittable by any title matcher.
    pub fn extract(&self, video: &VideoRecord) -> Result<ReviewRecord> {
        let (artist, work_title) = self.artist_and_title(&video.title)?;

        Ok(ReviewRecord {
            published_at: video.published_at,
            title: video.title.clone(),
            artist,
            work_title,
            rating: self.rating(&video.description),
            genres: self.genres(&video.description),
        })
    }

    /// First `N/10` score in the description.
    #[must_use]
    pub fn rating(&self, description: &str) -> Option<u8> {
        self.rating.parse(description)
    }

    /// Genre tags from the description's credits line.
    #[must_use]
    pub fn genres(&self, description: &str) -> Vec<String> {
        self.genres.extract(description, &self.grammar)
    }

    /// Splits a video title into `(artist, work_title)`.
    ///
    /// # Errors
    ///
    /// Returns `NeedledropError::Extraction` naming the title when no edge
    /// case or matcher applies.
    pub fn artist_and_title(&self, title: &str) -> Result<(String, String)> {
        if let Some(case) = self.grammar.edge_case(title) {
            debug!(%title, "title resolved by edge case");
            return Ok((case.artist.clone(), case.work_title.clone()));
        }

        let found = self
            .titles
            .split(title)
            .ok_or_else(|| NeedledropError::Extraction {
                title: title.to_string(),
            })?;

        debug!(%title, shape = %found.shape, "title split");
        Ok((found.artist, found.work_title))
    }
}
