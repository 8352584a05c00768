use regex::Regex;

use crate::error::Result;
use crate::grammar::TitleGrammar;

/// Pulls genre tags out of the credits line of a review description.
///
/// The credits line reads `ARTIST - TITLE / 2012 / LABEL / GENRE, GENRE`.
/// The release year anchors the match; genres are whatever follows the last
/// slash on that line, minus tokens that look like record labels.
#[derive(Debug, Clone)]
pub struct GenrePattern {
    re_credits: Regex,
}

impl GenrePattern {
    /// # Errors
    ///
    /// Returns `NeedledropError::RegexError` if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_credits: Regex::new(r" (?:19[0-9]{2}|20[0-2][0-9]) (/.*)")?,
        })
    }

    /// Returns the lowercased genre tags, or an empty list if the
    /// description has no credits line.
    #[must_use]
    pub fn extract(&self, description: &str, grammar: &TitleGrammar) -> Vec<String> {
        let Some(caps) = self.re_credits.captures(description) else {
            return Vec::new();
        };
        let after_year = &caps[1];
        let tail = after_year.rsplit('/').next().unwrap_or_default();

        tail.split(", ")
            .filter(|token| !grammar.is_label(token))
            .map(|token| token.trim().to_lowercase())
            .filter(|genre| !genre.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(description: &str) -> Vec<String> {
        GenrePattern::new()
            .unwrap()
            .extract(description, &TitleGrammar::default())
    }

    #[test]
    fn label_segment_is_skipped() {
        assert_eq!(
            extract("... 2020 /RECORDS / hip hop, experimental"),
            vec!["hip hop", "experimental"]
        );
    }

    #[test]
    fn credits_line_in_full_description() {
        let description = "FAV TRACKS: BACKSEAT FREESTYLE\n\n\
            KENDRICK LAMAR- GOOD KID, M.A.A.D. CITY / 2012 / INTERSCOPE / WEST COAST HIP HOP, CONSCIOUS HIP HOP\n\n\
            9/10 http://www.theneedledrop.com/loved-list/2012";
        assert_eq!(
            extract(description),
            vec!["west coast hip hop", "conscious hip hop"]
        );
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let description = "GLASS ANIMALS - DREAMLAND / 2020 / WOLF TONE / POP, INDIETRONIC, TRAP\r\n\r\nNOT GOOD/10";
        assert_eq!(extract(description), vec!["pop", "indietronic", "trap"]);
    }

    #[test]
    fn known_label_without_genres_yields_nothing() {
        assert!(extract("ARTIST - TITLE / 2015 / DEAD OCEANS").is_empty());
        assert!(extract("ARTIST - TITLE / 2015 / WARP RECORDS").is_empty());
    }

    #[test]
    fn label_only_credits_yield_no_genres() {
        let description = "KENDRICK LAMAR - MR. MORALE & THE BIG STEPPERS / 2022 / TDE / PGLANG\n\n8/10";
        assert!(extract(description).is_empty());
        assert!(extract("ARCTIC MONKEYS - THE CAR / 2022 / DOMINO").is_empty());
    }

    #[test]
    fn unknown_label_leaks_through() {
        // Unlisted labels are kept rather than risk dropping real genres.
        assert_eq!(extract("THE 1975 - NOTES ON A CONDITIONAL FORM / 2020 / DIRTY HIT"), vec!["dirty hit"]);
    }

    #[test]
    fn year_range_and_missing_credits() {
        assert!(extract("no credits here, 8/10").is_empty());
        assert!(extract("ARTIST - TITLE / 1899 / LABEL / ROCK").is_empty());
        assert!(extract("ARTIST - TITLE / 2030 / LABEL / ROCK").is_empty());
        assert_eq!(extract("COCTEAU TWINS - HEAVEN OR LAS VEGAS / 1990 / 4AD / DREAM POP"), vec!["dream pop"]);
    }

    #[test]
    fn first_credits_line_wins() {
        let description = "A - B / 2011 / X / SHOEGAZE\nC - D / 2012 / Y / NOISE ROCK";
        assert_eq!(extract(description), vec!["shoegaze"]);
    }
}
