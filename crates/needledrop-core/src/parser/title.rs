//! Artist / work-title matchers for review video titles.
//!
//! Each matcher is an independent pattern over the whole title. They overlap
//! loosely, so [`TitleMatchers`] tries them in a fixed priority order and
//! stops at the first one that yields a non-empty artist and title.

use regex::Regex;

use crate::error::Result;
use crate::grammar::TitleGrammar;

/// Which title shape produced an artist/title split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleShape {
    /// `<artist>- <title> <NEW MARKER>`
    NewEraDash,
    /// `<artist>: <title> <NEW MARKER>`, or a dash followed by any whitespace.
    NewEraLoose,
    /// `<artist>- <title> <OLD MARKER>`
    OldEraDash,
}

impl std::fmt::Display for TitleShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewEraDash => write!(f, "new-era dash"),
            Self::NewEraLoose => write!(f, "new-era loose"),
            Self::OldEraDash => write!(f, "old-era dash"),
        }
    }
}

/// A successful split of a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    pub artist: String,
    pub work_title: String,
    pub shape: TitleShape,
}

#[derive(Debug, Clone)]
struct TitleMatcher {
    shape: TitleShape,
    regex: Regex,
}

impl TitleMatcher {
    fn new(shape: TitleShape, separator: &str, markers: &[String]) -> Result<Self> {
        let markers = markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        // Greedy artist takes the last separator; lazy title stops at the first marker after it.
        let pattern = format!(r"^(.+){separator}(.+?) (?:{markers})");
        Ok(Self {
            shape,
            regex: Regex::new(&pattern)?,
        })
    }

    fn split(&self, title: &str) -> Option<TitleMatch> {
        let caps = self.regex.captures(title)?;
        let artist = caps[1].trim();
        let work_title = caps[2].trim();
        if artist.is_empty() || work_title.is_empty() {
            return None;
        }
        Some(TitleMatch {
            artist: artist.to_string(),
            work_title: work_title.to_string(),
            shape: self.shape,
        })
    }
}

/// Priority-ordered title matchers built from a grammar's era markers.
#[derive(Debug, Clone)]
pub struct TitleMatchers {
    matchers: Vec<TitleMatcher>,
}

impl TitleMatchers {
    /// # Errors
    ///
    /// Returns `NeedledropError::RegexError` if a pattern fails to compile.
    pub fn new(grammar: &TitleGrammar) -> Result<Self> {
        Ok(Self {
            matchers: vec![
                TitleMatcher::new(TitleShape::NewEraDash, "- ", &grammar.new_era_markers)?,
                TitleMatcher::new(
                    TitleShape::NewEraLoose,
                    r"(?:-\s+|: )",
                    &grammar.new_era_markers,
                )?,
                TitleMatcher::new(TitleShape::OldEraDash, "- ", &grammar.old_era_markers)?,
            ],
        })
    }

    /// Splits `title` with the first matcher that succeeds.
    #[must_use]
    pub fn split(&self, title: &str) -> Option<TitleMatch> {
        self.matchers.iter().find_map(|m| m.split(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(title: &str) -> Option<(String, String, TitleShape)> {
        TitleMatchers::new(&TitleGrammar::default())
            .unwrap()
            .split(title)
            .map(|m| (m.artist, m.work_title, m.shape))
    }

    fn pair(title: &str) -> (String, String) {
        let (artist, work_title, _) = split(title).unwrap();
        (artist, work_title)
    }

    #[test]
    fn immediate_hyphen_new_era() {
        assert_eq!(
            split("Flying Lotus- Cosmogramma ALBUM REVIEW"),
            Some(("Flying Lotus".into(), "Cosmogramma".into(), TitleShape::NewEraDash))
        );
        assert_eq!(
            pair("Kendrick Lamar- good kid, m.A.A.d. city ALBUM REVIEW"),
            ("Kendrick Lamar".into(), "good kid, m.A.A.d. city".into())
        );
    }

    #[test]
    fn spaced_hyphen_new_era() {
        assert_eq!(
            pair("Kendrick Lamar - Mr. Morale & The Big Steppers ALBUM REVIEW"),
            ("Kendrick Lamar".into(), "Mr. Morale & The Big Steppers".into())
        );
        assert_eq!(
            pair("JPEGMAFIA - Veteran MIXTAPE REVIEW"),
            ("JPEGMAFIA".into(), "Veteran".into())
        );
        assert_eq!(
            pair("Jay-Z - 4:44 ALBUM REVIEW"),
            ("Jay-Z".into(), "4:44".into())
        );
    }

    #[test]
    fn artist_takes_last_separator() {
        assert_eq!(
            pair("Godspeed You! Black Emperor - Luciferian Towers - Deluxe ALBUM REVIEW"),
            (
                "Godspeed You! Black Emperor - Luciferian Towers".into(),
                "Deluxe".into()
            )
        );
    }

    #[test]
    fn title_stops_at_first_marker() {
        assert_eq!(
            pair("Death Grips - The Money Store EP ALBUM REVIEW"),
            ("Death Grips".into(), "The Money Store".into())
        );
    }

    #[test]
    fn colon_separated_new_era() {
        assert_eq!(
            split("Tyler, The Creator: Flower Boy ALBUM REVIEW"),
            Some((
                "Tyler, The Creator".into(),
                "Flower Boy".into(),
                TitleShape::NewEraLoose
            ))
        );
    }

    #[test]
    fn old_era_review_suffix() {
        assert_eq!(
            split("Gorillaz- Plastic Beach Review"),
            Some(("Gorillaz".into(), "Plastic Beach".into(), TitleShape::OldEraDash))
        );
        assert_eq!(
            pair("Animal Collective- Merriweather Post Pavilion Album Review"),
            ("Animal Collective".into(), "Merriweather Post Pavilion".into())
        );
    }

    #[test]
    fn unsplittable_titles() {
        assert_eq!(split("An Evening with Silk Sonic ALBUM REVIEW"), None);
        assert_eq!(split("Master Musicians of Bukkake-Totem 3 ALBUM REVIEW"), None);
        assert_eq!(split("Weekly Track Roundup: 4/20"), None);
        assert_eq!(split(" - x ALBUM REVIEW"), None);
    }
}
