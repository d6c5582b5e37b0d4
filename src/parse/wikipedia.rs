//! Extracts filming-location candidates from raw wiki markup.

use regex::Regex;
use tracing::debug;

/// Candidates shorter than this are fragments, not locations.
const MIN_PHRASE_LEN: usize = 6;
/// Candidates longer than this are running prose, not locations.
const MAX_PHRASE_LEN: usize = 199;

/// Wiki-markup parser. Locates a filming/production section by trying the
/// heading patterns in order (level-2 before level-3), then runs every
/// sentence pattern over the whole section and keeps ALL matches. This is
/// deliberately the opposite of the first-match-wins policy used for forum
/// posts: wiki prose routinely names many locations in one section.
pub struct WikipediaParser {
    section_patterns: Vec<Regex>,
    sentence_patterns: Vec<Regex>,
    wiki_link: Regex,
    html_tag: Regex,
    parenthetical: Regex,
}

impl WikipediaParser {
    pub fn new() -> Self {
        let section_patterns = [
            r"(?i)==\s*(?:Filming|Production|Principal photography|Shooting locations?)\s*==",
            r"(?i)===\s*(?:Filming locations?|Shooting locations?)\s*===",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("section pattern is valid"))
        .collect();

        let sentence_patterns = [
            r"(?i)filmed (?:in|at) ([^\.]+?)[\.,]",
            r"(?i)shot (?:in|at) ([^\.]+?)[\.,]",
            r"(?i)([^\.]+?) was used for",
            r"(?i)scenes were filmed at ([^\.]+?)[\.,]",
            // Catch-all for bullet lists of locations.
            r"(?im)\*\s*([^:\n]+?)(?::|$)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("sentence pattern is valid"))
        .collect();

        Self {
            section_patterns,
            sentence_patterns,
            wiki_link: Regex::new(r"\[\[([^\]]+)\]\]").expect("wiki link pattern is valid"),
            html_tag: Regex::new(r"<[^>]+>").expect("html tag pattern is valid"),
            parenthetical: Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"),
        }
    }

    /// Extract distinct location phrases from a page's wikitext. Pages
    /// without a recognizable filming section yield nothing.
    pub fn extract(&self, wikitext: &str) -> Vec<String> {
        let Some(section) = self.filming_section(wikitext) else {
            debug!("no filming section found");
            return Vec::new();
        };

        let mut phrases = Vec::new();
        for pattern in &self.sentence_patterns {
            for caps in pattern.captures_iter(section) {
                let Some(m) = caps.get(1) else { continue };
                if let Some(phrase) = self.clean_phrase(m.as_str()) {
                    if !phrases.contains(&phrase) {
                        phrases.push(phrase);
                    }
                }
            }
        }

        debug!(count = phrases.len(), "extracted wiki location candidates");
        phrases
    }

    /// Find the filming/production section: from the end of the first
    /// matching heading to the start of the next level-2 heading or EOF.
    fn filming_section<'a>(&self, wikitext: &'a str) -> Option<&'a str> {
        for pattern in &self.section_patterns {
            if let Some(m) = pattern.find(wikitext) {
                let start = m.end();
                let rest = &wikitext[start..];
                let end = rest.find("\n==").map(|i| start + i).unwrap_or(wikitext.len());
                return Some(&wikitext[start..end]);
            }
        }
        None
    }

    /// Unwrap wiki links to their display text, strip HTML tags, apply the
    /// length window, then drop parenthetical asides.
    fn clean_phrase(&self, raw: &str) -> Option<String> {
        let unwrapped = self.wiki_link.replace_all(raw.trim(), |caps: &regex::Captures| {
            let inner = &caps[1];
            // Piped links render their last segment.
            inner.rsplit('|').next().unwrap_or(inner).to_string()
        });
        let stripped = self.html_tag.replace_all(&unwrapped, "");
        let text = stripped.trim();

        if text.len() < MIN_PHRASE_LEN || text.len() > MAX_PHRASE_LEN {
            return None;
        }

        let without_parens = self.parenthetical.replace_all(text, "");
        let cleaned = without_parens.trim();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }
}

impl Default for WikipediaParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKITEXT: &str = "\
'''The Shawshank Redemption''' is a 1994 film.\n\
\n\
== Production ==\n\
The film was filmed in [[Mansfield]], using the town square. Interior scenes \
were shot at the <i>Ohio State Reformatory</i>, a decommissioned prison.\n\
\n\
== Reception ==\n\
The film was filmed in obscurity but became a classic.\n";

    #[test]
    fn finds_section_and_extracts_candidates() {
        let phrases = WikipediaParser::new().extract(WIKITEXT);
        assert!(phrases.contains(&"Mansfield".to_string()));
        // Content after the next level-2 heading is out of scope.
        assert!(!phrases.iter().any(|p| p.contains("obscurity")));
    }

    #[test]
    fn strips_html_tags() {
        let phrases = WikipediaParser::new().extract(WIKITEXT);
        assert!(phrases.iter().any(|p| p.contains("Ohio State Reformatory")));
        assert!(!phrases.iter().any(|p| p.contains('<')));
    }

    #[test]
    fn piped_wiki_links_keep_display_text() {
        let wikitext =
            "== Filming ==\nThe opening was filmed at [[Hobbiton|the Hobbiton set]] near Matamata.\n";
        let phrases = WikipediaParser::new().extract(wikitext);
        assert!(phrases.contains(&"the Hobbiton set near Matamata".to_string()));
    }

    #[test]
    fn both_bullet_lines_are_kept() {
        let wikitext = "\
== Filming ==\n\
* Hobbiton Movie Set, Matamata, New Zealand\n\
* Pinewood Studios, Buckinghamshire, England\n";
        let phrases = WikipediaParser::new().extract(wikitext);
        assert!(phrases.contains(&"Hobbiton Movie Set, Matamata, New Zealand".to_string()));
        assert!(phrases.contains(&"Pinewood Studios, Buckinghamshire, England".to_string()));
    }

    #[test]
    fn level_two_filming_locations_heading_is_not_recognized() {
        // "Filming locations" is only a level-3 alternative; at level 2 the
        // recognized Production section wins.
        let wikitext = "\
== Filming locations ==\n\
* Alpha Studios, Burbank, California\n\
\n\
== Production ==\n\
The pilot was filmed in Toronto, doubling for New York.\n";
        let phrases = WikipediaParser::new().extract(wikitext);
        assert_eq!(phrases, vec!["Toronto".to_string()]);
    }

    #[test]
    fn no_section_means_no_candidates() {
        let wikitext = "== Plot ==\nA banker is sent to prison, filmed in Ohio.\n";
        assert!(WikipediaParser::new().extract(wikitext).is_empty());
    }

    #[test]
    fn level_three_headings_are_a_fallback() {
        let wikitext = "\
== Development ==\nScript history.\n\
=== Filming locations ===\n\
Exteriors were shot at Fox Plaza, Los Angeles, California.\n";
        let phrases = WikipediaParser::new().extract(wikitext);
        assert!(phrases
            .iter()
            .any(|p| p.contains("Fox Plaza")));
    }

    #[test]
    fn length_window_filters_fragments_and_prose() {
        let long_run = "x".repeat(250);
        let wikitext = format!(
            "== Filming ==\n* Leeds\n* {}\n* Shepperton Studios, Surrey\n",
            long_run
        );
        let phrases = WikipediaParser::new().extract(&wikitext);
        assert_eq!(phrases, vec!["Shepperton Studios, Surrey".to_string()]);
    }

    #[test]
    fn duplicate_phrases_are_reported_once() {
        let wikitext = "\
== Filming ==\n\
The chase was filmed in downtown Chicago, and the finale was also filmed in downtown Chicago, at night.\n";
        let phrases = WikipediaParser::new().extract(wikitext);
        let hits = phrases.iter().filter(|p| *p == "downtown Chicago").count();
        assert_eq!(hits, 1);
    }
}
