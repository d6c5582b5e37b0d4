//! Extracts a production/location pair out of free-text forum posts.

use regex::Regex;

/// Maximum scene-description length taken from a post body.
const SCENE_MAX_CHARS: usize = 500;
/// Bodies at or below this length carry no usable scene context.
const SCENE_MIN_BODY_CHARS: usize = 50;

/// One successfully matched post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPost {
    pub production_title: String,
    pub location: String,
    pub scene: Option<String>,
}

/// Free-text parser for forum posts. Both pattern lists are ordered and
/// evaluated first-match-wins: quoted titles beat Title-Case guesses, and
/// "filmed at" beats the vaguer verb forms. Keep the ordering.
pub struct RedditParser {
    title_patterns: Vec<Regex>,
    location_patterns: Vec<Regex>,
}

impl RedditParser {
    pub fn new() -> Self {
        let title_patterns = [
            r#""([^"]+)""#,
            r"'([^']+)'",
            r"\b([A-Z][A-Za-z\s]+(?:Season \d+)?)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("title pattern is valid"))
        .collect();

        let location_patterns = [
            r"(?i)filmed (?:at|in) ([^.]+)",
            r"(?i)shooting (?:at|in) ([^.]+)",
            r"(?i)location[s]? (?:at|in|:) ([^.]+)",
            r"(?i)shot (?:at|in) ([^.]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("location pattern is valid"))
        .collect();

        Self {
            title_patterns,
            location_patterns,
        }
    }

    /// Extract a (production title, location) pair from a post's title and
    /// body. A post only yields a result when both a title pattern and a
    /// location pattern match; anything else is noise.
    pub fn extract(&self, post_title: &str, post_body: &str) -> Option<ExtractedPost> {
        let combined = format!("{} {}", post_title, post_body);

        let production_title = first_capture(&self.title_patterns, &combined)?;
        let location = first_capture(&self.location_patterns, &combined)?;

        let scene = if post_body.chars().count() > SCENE_MIN_BODY_CHARS {
            Some(truncate_chars(post_body, SCENE_MAX_CHARS))
        } else {
            None
        };

        Some(ExtractedPost {
            production_title,
            location,
            scene,
        })
    }
}

impl Default for RedditParser {
    fn default() -> Self {
        Self::new()
    }
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// Truncate on a char boundary; post bodies are arbitrary UTF-8.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_title_and_filmed_at_location() {
        let parser = RedditParser::new();
        let post = parser
            .extract(
                r#""Breaking Bad" was the best show"#,
                "Scenes filmed at 3828 Piermont Dr, Albuquerque, NM.",
            )
            .unwrap();
        assert_eq!(post.production_title, "Breaking Bad");
        assert_eq!(post.location, "3828 Piermont Dr, Albuquerque, NM");
    }

    #[test]
    fn quoted_title_beats_title_case() {
        let parser = RedditParser::new();
        let post = parser
            .extract(
                r#"Visited The Very Spot where "Inception" was shot in Paris today"#,
                "",
            )
            .unwrap();
        assert_eq!(post.production_title, "Inception");
    }

    #[test]
    fn no_location_verb_means_no_candidate() {
        let parser = RedditParser::new();
        assert!(parser
            .extract(r#""The Godfather" is a masterpiece"#, "Just rewatched it.")
            .is_none());
    }

    #[test]
    fn no_title_means_no_candidate() {
        let parser = RedditParser::new();
        // Nothing matches any title pattern: no quotes and no Title-Case run.
        assert!(parser.extract("", "filmed at 12 somewhere street.").is_none());
    }

    #[test]
    fn scene_requires_a_long_enough_body() {
        let parser = RedditParser::new();
        let short = parser
            .extract(r#""Heat" locations"#, "Shot at Kate Mantilini.")
            .unwrap();
        assert_eq!(short.scene, None);

        let body = "Shot at Kate Mantilini on Wilshire Blvd, the diner scene \
                    between Pacino and De Niro was filmed there in 1995.";
        let long = parser.extract(r#""Heat" locations"#, body).unwrap();
        assert_eq!(long.scene.as_deref(), Some(body));
    }

    #[test]
    fn scene_gate_counts_chars_not_bytes() {
        let parser = RedditParser::new();
        // 40 chars but 80 bytes; still below the 50-char threshold.
        let body = "é".repeat(40);
        let post = parser
            .extract(r#""Amélie" was filmed in Montmartre"#, &body)
            .unwrap();
        assert_eq!(post.scene, None);

        let body = "é".repeat(51);
        let post = parser
            .extract(r#""Amélie" was filmed in Montmartre"#, &body)
            .unwrap();
        assert!(post.scene.is_some());
    }

    #[test]
    fn scene_is_capped_at_500_chars() {
        let parser = RedditParser::new();
        let body = format!("filmed at Stage 7. {}", "x".repeat(600));
        let post = parser.extract(r#""Dune" set"#, &body).unwrap();
        assert_eq!(post.scene.unwrap().chars().count(), 500);
    }

    #[test]
    fn location_matching_is_case_insensitive() {
        let parser = RedditParser::new();
        let post = parser
            .extract(r#""Fargo" trivia"#, "Mostly Shot In Bathgate, North Dakota.")
            .unwrap();
        assert_eq!(post.location, "Bathgate, North Dakota");
    }
}
