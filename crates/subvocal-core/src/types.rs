//! Core types for the Subvocal word decoder
//!
//! This module provides the data model shared across the pipeline:
//! - Named frequency bands used to weight the power proxy
//! - Raw multi-channel signal windows
//! - Ordered per-class score distributions
//! - The final combined prediction record

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

// ============================================================================
// Frequency Bands
// ============================================================================

/// A named frequency interval used to weight a band-power feature.
///
/// Bands are configured once at decoder construction and are immutable for
/// the decoder's lifetime. The name is the unique key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    name: String,
    low_hz: f64,
    high_hz: f64,
}

impl FrequencyBand {
    /// Create a band, validating `low_hz < high_hz`.
    pub fn new(name: impl Into<String>, low_hz: f64, high_hz: f64) -> DecodeResult<Self> {
        if !(low_hz < high_hz) {
            return Err(DecodeError::InvalidInput {
                reason: format!("band bounds must satisfy low < high, got [{low_hz}, {high_hz}]"),
            });
        }
        Ok(Self {
            name: name.into(),
            low_hz,
            high_hz,
        })
    }

    /// Band name (unique key).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower bound in Hz.
    #[must_use]
    pub fn low_hz(&self) -> f64 {
        self.low_hz
    }

    /// Upper bound in Hz.
    #[must_use]
    pub fn high_hz(&self) -> f64 {
        self.high_hz
    }

    /// Center frequency `(low + high) / 2`, the proxy weight for this band.
    #[must_use]
    pub fn center_hz(&self) -> f64 {
        (self.low_hz + self.high_hz) / 2.0
    }
}

/// The canonical EEG band set used when no custom bands are configured.
pub fn default_bands() -> Vec<FrequencyBand> {
    [
        ("delta", 0.5, 4.0),
        ("theta", 4.0, 8.0),
        ("alpha", 8.0, 13.0),
        ("beta", 13.0, 30.0),
        ("gamma", 30.0, 100.0),
    ]
    .into_iter()
    .map(|(name, low_hz, high_hz)| FrequencyBand {
        name: name.to_string(),
        low_hz,
        high_hz,
    })
    .collect()
}

// ============================================================================
// Raw Samples
// ============================================================================

/// One window of multi-channel signal data.
///
/// An ordered sequence of channels, each an ordered sequence of amplitude
/// readings at a fixed sampling rate. The sampling rate itself is not
/// validated here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    channels: Vec<Vec<f64>>,
}

impl RawSample {
    /// Create a sample from per-channel amplitude sequences.
    #[must_use]
    pub fn new(channels: Vec<Vec<f64>>) -> Self {
        Self { channels }
    }

    /// Number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Per-channel amplitude sequences, in channel order.
    #[must_use]
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }
}

/// One training example: a raw window with its ground-truth word.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingSample {
    /// The signal window
    pub sample: RawSample,
    /// The word the subject was subvocalizing
    pub label: String,
}

// ============================================================================
// Score Distributions
// ============================================================================

/// Ordered mapping from class index to a non-negative score.
///
/// The key space is the class-index set of the currently trained mapping.
/// Iteration is in ascending index order, which makes tie-breaking and the
/// fusion intersection rule deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    scores: BTreeMap<usize, f64>,
}

impl ScoreDistribution {
    /// Create an empty distribution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score for a class index.
    pub fn insert(&mut self, class: usize, score: f64) {
        self.scores.insert(class, score);
    }

    /// Score for a class index, if present.
    #[must_use]
    pub fn get(&self, class: usize) -> Option<f64> {
        self.scores.get(&class).copied()
    }

    /// Number of classes with a score.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the distribution has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate `(class, score)` pairs in ascending class order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.scores.iter().map(|(&k, &v)| (k, v))
    }

    /// Class index with the strictly greatest score.
    ///
    /// Ties are broken by the first-seen key in iteration order (the lowest
    /// index). Fails with [`DecodeError::EmptyDistribution`] when empty.
    pub fn argmax(&self) -> DecodeResult<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (class, score) in self.iter() {
            let replace = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if replace {
                best = Some((class, score));
            }
        }
        best.map(|(class, _)| class)
            .ok_or(DecodeError::EmptyDistribution)
    }
}

impl FromIterator<(usize, f64)> for ScoreDistribution {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ScoreDistribution {
    type Item = (usize, f64);
    type IntoIter = btree_map::IntoIter<usize, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

// ============================================================================
// Prediction Results
// ============================================================================

/// The combined output of a full decode: word, definition, and concept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The decoded vocabulary word
    pub predicted_word: String,
    /// Natural-language definition, or the not-found placeholder
    pub definition: String,
    /// Nearest abstract concept, or the out-of-vocabulary sentinel
    pub universal_concept: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_center_frequency() {
        let band = FrequencyBand::new("delta", 0.5, 4.0).unwrap();
        assert!((band.center_hz() - 2.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_band_rejects_inverted_bounds() {
        assert!(FrequencyBand::new("bad", 10.0, 4.0).is_err());
        assert!(FrequencyBand::new("bad", 4.0, 4.0).is_err());
    }

    #[test]
    fn test_default_bands_ordered() {
        let bands = default_bands();
        assert_eq!(bands.len(), 5);
        assert_eq!(bands[0].name(), "delta");
        assert_eq!(bands[4].name(), "gamma");
    }

    #[test]
    fn test_argmax_picks_greatest() {
        let dist: ScoreDistribution = [(0, 0.1), (1, 0.9), (2, 0.3)].into_iter().collect();
        assert_eq!(dist.argmax().unwrap(), 1);
    }

    #[test]
    fn test_argmax_tie_breaks_first_seen() {
        let dist: ScoreDistribution = [(2, 0.5), (0, 0.5), (1, 0.2)].into_iter().collect();
        // Iteration is ascending by index, so index 0 wins the tie with 2.
        assert_eq!(dist.argmax().unwrap(), 0);
    }

    #[test]
    fn test_argmax_empty_fails() {
        let dist = ScoreDistribution::new();
        assert!(matches!(
            dist.argmax(),
            Err(DecodeError::EmptyDistribution)
        ));
    }
}
