//! Weighted combination of the normalized blocks into one feature vector per
//! catalog item.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

use crate::models::{CatalogItem, MovieId};

use super::features::{FeatureExtractor, RawFeatures, STATS_WIDTH};
use super::normalize::{l2_normalize, normalize_blocks, MinMaxScaler};

/// Importance of each block in the combined vector
///
/// Weights do not need to sum to 1. They must be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub description: f64,
    pub genre: f64,
    pub imdb: f64,
    pub stats: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            description: 0.10,
            genre: 0.30,
            imdb: 0.40,
            stats: 0.20,
        }
    }
}

impl FeatureWeights {
    pub fn is_valid(&self) -> bool {
        [self.description, self.genre, self.imdb, self.stats]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// Offsets of the four blocks inside a combined vector
///
/// Fixed for one catalog snapshot: text block, genre block, one quality
/// column, then the stats columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    text_width: usize,
    genre_width: usize,
}

impl BlockLayout {
    pub fn new(text_width: usize, genre_width: usize) -> Self {
        Self {
            text_width,
            genre_width,
        }
    }

    pub fn text_range(&self) -> Range<usize> {
        0..self.text_width
    }

    pub fn genre_range(&self) -> Range<usize> {
        self.text_width..self.text_width + self.genre_width
    }

    pub fn quality_index(&self) -> usize {
        self.text_width + self.genre_width
    }

    pub fn stats_range(&self) -> Range<usize> {
        let start = self.quality_index() + 1;
        start..start + STATS_WIDTH
    }

    pub fn width(&self) -> usize {
        self.text_width + self.genre_width + 1 + STATS_WIDTH
    }
}

/// Concatenates normalized blocks scaled by their weights, then rescales the
/// whole vector to unit length so dot products are cosine similarities
pub fn combine(features: &RawFeatures, weights: &FeatureWeights, layout: &BlockLayout) -> Vec<f64> {
    let mut vector = Vec::with_capacity(layout.width());
    vector.extend(features.text.iter().map(|x| x * weights.description));
    vector.extend(features.genre.iter().map(|x| x * weights.genre));
    vector.push(features.quality * weights.imdb);
    vector.extend(features.stats.iter().map(|x| x * weights.stats));

    debug_assert_eq!(vector.len(), layout.width());
    l2_normalize(&mut vector);
    vector
}

/// Combined feature vectors for every item of one catalog snapshot
///
/// Rows follow catalog order. Vectors depend on the vocabularies discovered in
/// the snapshot and are not comparable with those of another snapshot.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    layout: BlockLayout,
    ids: Vec<MovieId>,
    quality: Vec<f64>,
    rows: Vec<Vec<f64>>,
    positions: HashMap<MovieId, usize>,
}

impl FeatureMatrix {
    /// Runs extraction, normalization and weighting over the catalog
    pub fn build(catalog: &[CatalogItem], weights: &FeatureWeights) -> Self {
        let extractor = FeatureExtractor::fit(catalog);
        let layout = BlockLayout::new(
            extractor.text_vocabulary().len(),
            extractor.genre_vocabulary().len(),
        );

        let raw: Vec<RawFeatures> = catalog.iter().map(|item| extractor.extract(item)).collect();
        let stats_rows: Vec<[f64; STATS_WIDTH]> = raw.iter().map(|features| features.stats).collect();
        let scaler = MinMaxScaler::fit(&stats_rows);

        let mut ids = Vec::with_capacity(catalog.len());
        let mut quality = Vec::with_capacity(catalog.len());
        let mut rows = Vec::with_capacity(catalog.len());
        let mut positions = HashMap::with_capacity(catalog.len());

        for (position, (item, features)) in catalog.iter().zip(raw).enumerate() {
            ids.push(item.id);
            quality.push(features.quality);
            let normalized = normalize_blocks(features, &scaler);
            rows.push(combine(&normalized, weights, &layout));
            positions.entry(item.id).or_insert(position);
        }

        tracing::debug!(
            items = rows.len(),
            text_terms = extractor.text_vocabulary().len(),
            genres = extractor.genre_vocabulary().len(),
            width = layout.width(),
            "Built feature matrix"
        );

        Self {
            layout,
            ids,
            quality,
            rows,
            positions,
        }
    }

    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row position of a movie, if it is in the snapshot
    pub fn position(&self, movie_id: MovieId) -> Option<usize> {
        self.positions.get(&movie_id).copied()
    }

    pub fn row(&self, position: usize) -> &[f64] {
        &self.rows[position]
    }

    pub fn vector(&self, movie_id: MovieId) -> Option<&[f64]> {
        self.position(movie_id).map(|position| self.row(position))
    }

    pub fn movie_id(&self, position: usize) -> MovieId {
        self.ids[position]
    }

    /// Unscaled quality scalar (0-10) of the item at `position`
    pub fn quality(&self, position: usize) -> f64 {
        self.quality[position]
    }
}
