//! Extracts filming-location candidates from an IMDb locations page.

use scraper::{Html, Selector};
use tracing::debug;

use crate::model::ProductionType;
use crate::parse::{strip_title_annotation, Candidate};

/// Everything extracted from one locations page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImdbPage {
    pub production_title: String,
    pub production_type: ProductionType,
    pub candidates: Vec<Candidate>,
}

/// DOM-fragment parser for the IMDb locations page. IMDb has reshuffled its
/// markup more than once, so both the title and the location containers are
/// located through ordered selector fallback lists.
pub struct ImdbParser {
    title_selectors: Vec<Selector>,
    container_selectors: Vec<Selector>,
}

impl ImdbParser {
    pub fn new() -> Self {
        let title_selectors = [
            r#"h3[data-testid="hero__primary-text"]"#,
            r#"a[data-testid="hero__pageTitle"]"#,
        ]
        .iter()
        .map(|s| Selector::parse(s).expect("title selector is valid"))
        .collect();

        let container_selectors = [
            r#"div[data-testid="item-body"]"#,
            "div.ipc-html-content-inner-div",
        ]
        .iter()
        .map(|s| Selector::parse(s).expect("container selector is valid"))
        .collect();

        Self {
            title_selectors,
            container_selectors,
        }
    }

    /// Parse a locations page. Returns `None` when no title element can be
    /// found under any known selector; that is a soft miss (the page layout
    /// changed or the title does not exist), not an error.
    pub fn extract(&self, html: &str) -> Option<ImdbPage> {
        let document = Html::parse_document(html);

        let title_text = self.title_selectors.iter().find_map(|selector| {
            document
                .select(selector)
                .next()
                .map(|el| collapse_text(el.text()))
        })?;

        let production_type = if html.contains("TV Series") {
            ProductionType::TvShow
        } else {
            ProductionType::Movie
        };
        let production_title = strip_title_annotation(&title_text);

        // First selector that yields anything wins; later ones are only
        // consulted when the earlier markup generation is absent.
        let containers: Vec<_> = self
            .container_selectors
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|found| !found.is_empty())
            .unwrap_or_default();

        let mut candidates = Vec::new();
        for container in &containers {
            // A single text node can carry several lines; split before
            // treating anything as the location.
            let lines: Vec<String> = container
                .text()
                .flat_map(str::lines)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();

            let Some(location) = lines.first() else {
                continue;
            };
            if location.len() < 5 {
                continue;
            }

            let scene = if lines.len() > 1 {
                let joined = lines[1..].join(" ").trim().to_string();
                // A leading parenthesis marks a stray annotation like
                // "(uncredited)", not a scene description.
                if joined.is_empty() || joined.starts_with('(') {
                    None
                } else {
                    Some(joined)
                }
            } else {
                None
            };

            candidates.push(Candidate::new(location.clone(), scene));
        }

        debug!(
            title = %production_title,
            count = candidates.len(),
            "extracted imdb location candidates"
        );

        Some(ImdbPage {
            production_title,
            production_type,
            candidates,
        })
    }
}

impl Default for ImdbParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Join an element's text nodes into one whitespace-trimmed string.
fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <h3 data-testid="hero__primary-text">The Shawshank Redemption (1994)</h3>
        <div data-testid="item-body">
            <span>Ohio State Reformatory, Mansfield, Ohio, USA</span>
            <span>Shawshank State Prison exteriors</span>
        </div>
        <div data-testid="item-body">
            <span>Mansfield, Ohio, USA</span>
            <span>(as Portland, Maine)</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn extracts_title_type_and_candidates() {
        let page = ImdbParser::new().extract(PAGE).unwrap();
        assert_eq!(page.production_title, "The Shawshank Redemption");
        assert_eq!(page.production_type, ProductionType::Movie);
        assert_eq!(page.candidates.len(), 2);
        assert_eq!(
            page.candidates[0].location,
            "Ohio State Reformatory, Mansfield, Ohio, USA"
        );
        assert_eq!(
            page.candidates[0].scene.as_deref(),
            Some("Shawshank State Prison exteriors")
        );
    }

    #[test]
    fn parenthetical_trailer_is_not_a_scene() {
        let page = ImdbParser::new().extract(PAGE).unwrap();
        assert_eq!(page.candidates[1].location, "Mansfield, Ohio, USA");
        assert_eq!(page.candidates[1].scene, None);
    }

    #[test]
    fn multi_line_text_node_splits_into_location_and_scene() {
        let html = "<html><body>\
            <h3 data-testid=\"hero__primary-text\">The Shawshank Redemption (1994)</h3>\
            <div data-testid=\"item-body\">Ohio State Reformatory, Mansfield, Ohio, USA\n\
            Shawshank State Prison exteriors</div>\
            </body></html>";
        let page = ImdbParser::new().extract(html).unwrap();
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(
            page.candidates[0].location,
            "Ohio State Reformatory, Mansfield, Ohio, USA"
        );
        assert_eq!(
            page.candidates[0].scene.as_deref(),
            Some("Shawshank State Prison exteriors")
        );
    }

    #[test]
    fn missing_title_yields_nothing() {
        let html = r#"<html><body><div data-testid="item-body">Somewhere, USA</div></body></html>"#;
        assert!(ImdbParser::new().extract(html).is_none());
    }

    #[test]
    fn falls_back_to_alternate_title_selector() {
        let html = r#"
            <html><body>
            <a data-testid="hero__pageTitle">Breaking Bad (TV Series 2008-2013)</a>
            <div class="ipc-html-content-inner-div">Albuquerque, New Mexico, USA</div>
            </body></html>
        "#;
        let page = ImdbParser::new().extract(html).unwrap();
        assert_eq!(page.production_title, "Breaking Bad");
        assert_eq!(page.production_type, ProductionType::TvShow);
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].location, "Albuquerque, New Mexico, USA");
    }

    #[test]
    fn short_container_text_is_skipped() {
        let html = r#"
            <html><body>
            <h3 data-testid="hero__primary-text">Heat (1995)</h3>
            <div data-testid="item-body">LA</div>
            <div data-testid="item-body">Los Angeles, California, USA</div>
            </body></html>
        "#;
        let page = ImdbParser::new().extract(html).unwrap();
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].location, "Los Angeles, California, USA");
    }

    #[test]
    fn primary_container_selector_wins_when_both_present() {
        let html = r#"
            <html><body>
            <h3 data-testid="hero__primary-text">Heat (1995)</h3>
            <div data-testid="item-body">Los Angeles, California, USA</div>
            <div class="ipc-html-content-inner-div">Should not be picked up</div>
            </body></html>
        "#;
        let page = ImdbParser::new().extract(html).unwrap();
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].location, "Los Angeles, California, USA");
    }
}
