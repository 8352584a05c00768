use regex::Regex;

use crate::error::Result;
use crate::types::MAX_RATING;

/// Finds the `N/10` score in a review description.
///
/// A score immediately followed by a comma is skipped: those come from
/// ranking lists ("9/10, 8/10") rather than the verdict line.
#[derive(Debug, Clone)]
pub struct RatingPattern {
    re_rating: Regex,
}

impl RatingPattern {
    /// # Errors
    ///
    /// Returns `NeedledropError::RegexError` if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_rating: Regex::new(r"([0-9]|10)/10")?,
        })
    }

    /// Returns the digits of the first score not followed by a comma.
    pub fn find<'h>(&self, description: &'h str) -> Option<&'h str> {
        let mut start = 0;
        while let Some(caps) = self.re_rating.captures_at(description, start) {
            let whole = caps.get(0)?;
            if !description[whole.end()..].starts_with(',') {
                return caps.get(1).map(|m| m.as_str());
            }
            // Matches start on an ASCII digit, so one byte forward is a char boundary.
            start = whole.start() + 1;
        }
        None
    }

    /// Returns `true` if the description carries a score.
    #[must_use]
    pub fn is_rated(&self, description: &str) -> bool {
        self.find(description).is_some()
    }

    /// Parses the first score, or `None` if absent or out of range.
    #[must_use]
    pub fn parse(&self, description: &str) -> Option<u8> {
        self.find(description)
            .and_then(|digits| digits.parse::<u8>().ok())
            .filter(|rating| *rating <= MAX_RATING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> RatingPattern {
        RatingPattern::new().unwrap()
    }

    #[test]
    fn finds_verdict_line() {
        let p = pattern();
        assert_eq!(p.parse("blah\n\n8/10 http://theneedledrop.com"), Some(8));
        assert_eq!(p.parse("0/10"), Some(0));
        assert_eq!(p.parse("a perfect 10/10"), Some(10));
    }

    #[test]
    fn first_unsuffixed_match_wins() {
        let p = pattern();
        assert_eq!(p.parse("7/10 http://bit.ly\nThere are some real 10/10s"), Some(7));
        assert_eq!(p.parse("ranked 9/10, 8/10, then 6/10 overall"), Some(6));
    }

    #[test]
    fn comma_suffixed_scores_are_not_ratings() {
        let p = pattern();
        assert!(!p.is_rated("9/10, 8/10,"));
        assert!(!p.is_rated("10/10, and more"));
        assert_eq!(p.parse("9/10, 8/10,"), None);
    }

    #[test]
    fn word_ratings_are_not_numeric() {
        let p = pattern();
        assert_eq!(p.parse("CLASSIC/10"), None);
        assert_eq!(p.parse("NOT GOOD/10"), None);
        assert_eq!(p.parse("4/✨"), None);
    }

    #[test]
    fn leftmost_score_inside_longer_numbers() {
        let p = pattern();
        // "110/10" contains "10/10"; "10/100" still starts with "10/10".
        assert_eq!(p.parse("110/10"), Some(10));
        assert_eq!(p.parse("10/100"), Some(10));
    }
}
