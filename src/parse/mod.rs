//! Source-specific text-to-record extraction.
//!
//! Each source module turns source-native content (DOM fragments, forum
//! posts, wiki markup) into raw [`Candidate`]s, which the [`normalize`]
//! module then folds into canonical [`crate::model::FilmingLocation`]
//! records via the shared hierarchy and country heuristics.

pub mod country;
pub mod hierarchy;
pub mod imdb;
pub mod normalize;
pub mod reddit;
pub mod wikipedia;

/// One raw extraction result: a free-text location string plus an optional
/// scene description, produced by a source parser before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub location: String,
    pub scene: Option<String>,
}

impl Candidate {
    pub fn new(location: impl Into<String>, scene: Option<String>) -> Self {
        Self {
            location: location.into(),
            scene,
        }
    }
}

static TITLE_ANNOTATION: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"\s*\(.*?\)\s*$").expect("title annotation pattern is valid")
});

/// Strip a trailing parenthetical annotation such as "(1994)" or
/// "(TV Series 2008-2013)" from a production title.
pub fn strip_title_annotation(title: &str) -> String {
    TITLE_ANNOTATION.replace(title.trim(), "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_year() {
        assert_eq!(
            strip_title_annotation("The Shawshank Redemption (1994)"),
            "The Shawshank Redemption"
        );
    }

    #[test]
    fn strips_trailing_type_marker() {
        assert_eq!(
            strip_title_annotation("Breaking Bad (TV Series 2008-2013)"),
            "Breaking Bad"
        );
    }

    #[test]
    fn only_the_trailing_parenthetical_is_removed() {
        assert_eq!(
            strip_title_annotation("(500) Days of Summer"),
            "(500) Days of Summer"
        );
        assert_eq!(strip_title_annotation("Se7en"), "Se7en");
    }
}
