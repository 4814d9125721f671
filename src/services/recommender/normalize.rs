//! Block normalization.
//!
//! Text and genre blocks are rescaled to unit length, the quality scalar is
//! divided by its fixed 0-10 scale and stats columns are min-max scaled over
//! the catalog. Quality and stats keep their magnitude after scaling.

use super::features::{RawFeatures, STATS_WIDTH};

/// Upper bound of the IMDb rating scale
pub const QUALITY_SCALE: f64 = 10.0;

pub fn l2_norm(vector: &[f64]) -> f64 {
    vector.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Rescales a vector to unit Euclidean length in place. All-zero vectors are
/// left untouched.
pub fn l2_normalize(vector: &mut [f64]) {
    let norm = l2_norm(vector);
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

pub fn scale_quality(quality: f64) -> f64 {
    quality / QUALITY_SCALE
}

/// Per-column min-max scaler fit over a set of rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler<const N: usize> {
    min: [f64; N],
    max: [f64; N],
}

impl<const N: usize> MinMaxScaler<N> {
    pub fn fit(rows: &[[f64; N]]) -> Self {
        let mut min = [f64::INFINITY; N];
        let mut max = [f64::NEG_INFINITY; N];

        for row in rows {
            for (column, &value) in row.iter().enumerate() {
                min[column] = min[column].min(value);
                max[column] = max[column].max(value);
            }
        }

        Self { min, max }
    }

    /// Scales each column into [0, 1]. A constant column has no range to
    /// scale by and passes through unchanged.
    pub fn transform(&self, row: &[f64; N]) -> [f64; N] {
        let mut scaled = *row;
        for (column, value) in scaled.iter_mut().enumerate() {
            let (min, max) = (self.min[column], self.max[column]);
            if max > min {
                *value = (*value - min) / (max - min);
            }
        }
        scaled
    }
}

/// Applies every block's normalization to one item's raw features
pub fn normalize_blocks(mut features: RawFeatures, stats: &MinMaxScaler<STATS_WIDTH>) -> RawFeatures {
    l2_normalize(&mut features.text);
    l2_normalize(&mut features.genre);
    features.quality = scale_quality(features.quality);
    features.stats = stats.transform(&features.stats);
    features
}
