//! Batch orchestration: runs the right parser over each content item,
//! normalizes every candidate it yields, and accumulates records.
//!
//! Uniform fail-soft policy: a candidate that will not normalize, an item
//! that will not parse, or a post with missing fields is logged and
//! skipped. One bad page never loses the rest of the batch.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::SourcesConfig;
use crate::model::{FilmingLocation, ProductionType};
use crate::parse::hierarchy::SplitMode;
use crate::parse::imdb::ImdbParser;
use crate::parse::normalize::{NormalizeContext, Normalizer};
use crate::parse::reddit::RedditParser;
use crate::parse::wikipedia::WikipediaParser;

pub struct LocationCollector {
    sources: SourcesConfig,
    imdb: ImdbParser,
    reddit: RedditParser,
    wikipedia: WikipediaParser,
    normalizer: Normalizer,
    series_marker: Regex,
}

impl LocationCollector {
    /// Source lists are fixed at construction; nothing mutates them during
    /// a run.
    pub fn new(sources: SourcesConfig) -> Self {
        Self {
            sources,
            imdb: ImdbParser::new(),
            reddit: RedditParser::new(),
            wikipedia: WikipediaParser::new(),
            normalizer: Normalizer::new(),
            series_marker: Regex::new(r"(?i)\b(TV series|Season \d+|episode)\b")
                .expect("series marker pattern is valid"),
        }
    }

    pub fn sources(&self) -> &SourcesConfig {
        &self.sources
    }

    /// Normalize everything an IMDb locations page yields.
    pub fn collect_imdb_page(&self, imdb_id: &str, html: &str) -> Vec<FilmingLocation> {
        let Some(page) = self.imdb.extract(html) else {
            info!(imdb_id, "no title element on locations page, skipping");
            return Vec::new();
        };

        let tag = format!("imdb:{}", imdb_id);
        let ctx = NormalizeContext {
            production_title: &page.production_title,
            production_type: page.production_type,
            source_id: Some(imdb_id),
            source_tag: Some(&tag),
            split_mode: SplitMode::FixedPosition,
        };

        let records: Vec<_> = page
            .candidates
            .iter()
            .filter_map(|c| self.normalizer.normalize(&ctx, &c.location, c.scene.clone()))
            .collect();

        info!(imdb_id, count = records.len(), "collected imdb locations");
        records
    }

    /// Walk a Reddit search listing (`data.children[].data`) and normalize
    /// every post that yields a title/location pair.
    pub fn collect_reddit_listing(&self, subreddit: &str, listing: &Value) -> Vec<FilmingLocation> {
        let children = listing
            .get("data")
            .and_then(|d| d.get("children"))
            .and_then(Value::as_array);

        let Some(children) = children else {
            warn!(subreddit, "listing has no data.children, skipping");
            return Vec::new();
        };

        let tag = format!("reddit:{}", subreddit);
        let mut records = Vec::new();

        for child in children {
            let Some(post) = child.get("data") else {
                debug!(subreddit, "child without data, skipping");
                continue;
            };
            let title = post.get("title").and_then(Value::as_str).unwrap_or("");
            let body = post.get("selftext").and_then(Value::as_str).unwrap_or("");

            let Some(extracted) = self.reddit.extract(title, body) else {
                continue;
            };

            let combined = format!("{} {}", title, body);
            let ctx = NormalizeContext {
                production_title: &extracted.production_title,
                production_type: self.infer_production_type(&combined),
                source_id: None,
                source_tag: Some(&tag),
                split_mode: SplitMode::TrailingCountry,
            };

            if let Some(record) =
                self.normalizer.normalize(&ctx, &extracted.location, extracted.scene.clone())
            {
                records.push(record);
            }
        }

        info!(subreddit, count = records.len(), "collected reddit locations");
        records
    }

    /// Normalize every candidate phrase found in a wiki article's filming
    /// section. The page title stands in for the production title.
    pub fn collect_wiki_page(&self, page_title: &str, wikitext: &str) -> Vec<FilmingLocation> {
        let candidates = self.wikipedia.extract(wikitext);
        if candidates.is_empty() {
            debug!(page_title, "no location candidates in article");
            return Vec::new();
        }

        let tag = format!("wikipedia:{}", page_title);
        let ctx = NormalizeContext {
            production_title: page_title,
            production_type: self.infer_production_type(wikitext),
            source_id: None,
            source_tag: Some(&tag),
            split_mode: SplitMode::TrailingCountry,
        };

        let records: Vec<_> = candidates
            .iter()
            .filter_map(|raw| self.normalizer.normalize(&ctx, raw, None))
            .collect();

        info!(page_title, count = records.len(), "collected wikipedia locations");
        records
    }

    /// Forum posts and wiki prose carry no structured type field; fall back
    /// to a series marker in the text, defaulting to movie.
    fn infer_production_type(&self, text: &str) -> ProductionType {
        if self.series_marker.is_match(text) {
            ProductionType::TvShow
        } else {
            ProductionType::Movie
        }
    }
}
