//! Per-item feature extraction.
//!
//! Turns a catalog item into four raw blocks: TF-IDF text, genre counts, a
//! quality scalar and a fixed-order stats vector. Missing attributes never
//! fail extraction; they fall back to the defaults below.

use crate::models::CatalogItem;

use super::vocabulary::{GenreVocabulary, TextVocabulary};

/// IMDb rating assumed when none is usable (midpoint of the 0-10 scale)
pub const DEFAULT_QUALITY: f64 = 5.0;
pub const DEFAULT_RUNTIME_MINUTES: f64 = 90.0;
pub const DEFAULT_META_SCORE: f64 = 50.0;
pub const DEFAULT_BOX_OFFICE: f64 = 0.0;

/// Number of columns in the stats block:
/// runtime, meta score, box office, content rating ordinal
pub const STATS_WIDTH: usize = 4;

/// Unnormalized feature blocks of one item
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeatures {
    pub text: Vec<f64>,
    pub genre: Vec<f64>,
    pub quality: f64,
    pub stats: [f64; STATS_WIDTH],
}

/// Feature extractor fit to one catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    text: TextVocabulary,
    genres: GenreVocabulary,
}

impl FeatureExtractor {
    /// Fits the text and genre vocabularies over the whole catalog
    pub fn fit(catalog: &[CatalogItem]) -> Self {
        let documents: Vec<String> = catalog.iter().map(document_text).collect();
        let text = TextVocabulary::fit(documents.iter().map(String::as_str));
        let genres = GenreVocabulary::fit(catalog.iter().map(|item| item.genres.as_slice()));

        Self { text, genres }
    }

    pub fn text_vocabulary(&self) -> &TextVocabulary {
        &self.text
    }

    pub fn genre_vocabulary(&self) -> &GenreVocabulary {
        &self.genres
    }

    pub fn extract(&self, item: &CatalogItem) -> RawFeatures {
        RawFeatures {
            text: self.text.transform(&document_text(item)),
            genre: self.genres.transform(&item.genres),
            quality: parse_quality(item.imdb_rating.as_deref()),
            stats: stats_row(item),
        }
    }
}

/// Title and description joined into the document used for the text block
pub fn document_text(item: &CatalogItem) -> String {
    format!("{} {}", item.title, item.description)
}

/// Parses a stored IMDb rating, defaulting to `DEFAULT_QUALITY` when the
/// value is absent, "N/A" or not a finite number
pub fn parse_quality(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() && !value.eq_ignore_ascii_case("n/a") => value
            .parse::<f64>()
            .ok()
            .filter(|rating| rating.is_finite())
            .unwrap_or(DEFAULT_QUALITY),
        _ => DEFAULT_QUALITY,
    }
}

pub fn stats_row(item: &CatalogItem) -> [f64; STATS_WIDTH] {
    [
        item.runtime_minutes
            .map(f64::from)
            .unwrap_or(DEFAULT_RUNTIME_MINUTES),
        item.meta_score.map(f64::from).unwrap_or(DEFAULT_META_SCORE),
        item.box_office.map(|gross| gross as f64).unwrap_or(DEFAULT_BOX_OFFICE),
        f64::from(item.content_rating().ordinal()),
    ]
}
