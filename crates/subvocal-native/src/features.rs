//! Feature extraction for subvocal classification
//!
//! Turns raw multi-channel windows into the two flat feature vectors the
//! ensemble trains on: a "phonetic" vector from the first half of each
//! channel and a "semantic" vector from the second half.
//!
//! The band-power computation here is deliberately a whole-signal proxy,
//! not a DSP filter bank: one power value per channel, weighted by each
//! band's center frequency. Distinct bands therefore differ only by a
//! multiplicative weight. A true band-limited extractor would be a separate
//! filter stage in front of this one, not a change to it.

use subvocal_core::error::{DecodeError, DecodeResult};
use subvocal_core::math::mean_power;
use subvocal_core::types::{FrequencyBand, RawSample};

// ============================================================================
// Band Power Extraction
// ============================================================================

/// Per-channel band-power proxy extractor.
///
/// Owns the configured band list; band order fixes feature order for the
/// lifetime of the decoder.
#[derive(Clone, Debug)]
pub struct BandPowerExtractor {
    bands: Vec<FrequencyBand>,
}

impl BandPowerExtractor {
    /// Create an extractor over an ordered band list.
    #[must_use]
    pub fn new(bands: Vec<FrequencyBand>) -> Self {
        Self { bands }
    }

    /// Number of configured bands.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Configured bands in feature order.
    #[must_use]
    pub fn bands(&self) -> &[FrequencyBand] {
        &self.bands
    }

    /// Extract one feature per band from a single channel.
    ///
    /// `power = mean(x²)` is computed once; each band contributes
    /// `power * center_hz`. Output order matches the configured band order.
    /// Fails with [`DecodeError::InvalidInput`] on an empty channel.
    pub fn extract(&self, channel_samples: &[f64]) -> DecodeResult<Vec<f64>> {
        let power = mean_power(channel_samples)?;
        Ok(self
            .bands
            .iter()
            .map(|band| power * band.center_hz())
            .collect())
    }
}

// ============================================================================
// Dual-Pathway Featurization
// ============================================================================

/// Splits each window into phonetic and semantic halves and featurizes both.
///
/// The first `floor(len/2)` samples of every channel feed the phonetic
/// pathway; the remainder feed the semantic pathway, so an odd-length
/// channel gives the semantic half one extra sample. Per-channel band
/// features are concatenated in channel order into one flat vector per
/// pathway, length `channels × bands`.
#[derive(Clone, Debug)]
pub struct DualPathwayFeaturizer {
    extractor: BandPowerExtractor,
}

impl DualPathwayFeaturizer {
    /// Create a featurizer over the given band configuration.
    #[must_use]
    pub fn new(bands: Vec<FrequencyBand>) -> Self {
        Self {
            extractor: BandPowerExtractor::new(bands),
        }
    }

    /// The underlying band extractor.
    #[must_use]
    pub fn extractor(&self) -> &BandPowerExtractor {
        &self.extractor
    }

    /// Feature vector length for a given channel count.
    #[must_use]
    pub fn feature_len(&self, channel_count: usize) -> usize {
        channel_count * self.extractor.band_count()
    }

    /// Featurize the first half of every channel.
    pub fn featurize_phonetic(&self, sample: &RawSample) -> DecodeResult<Vec<f64>> {
        self.featurize_half(sample, Pathway::Phonetic)
    }

    /// Featurize the second half of every channel.
    pub fn featurize_semantic(&self, sample: &RawSample) -> DecodeResult<Vec<f64>> {
        self.featurize_half(sample, Pathway::Semantic)
    }

    fn featurize_half(&self, sample: &RawSample, pathway: Pathway) -> DecodeResult<Vec<f64>> {
        // Zero channels is a valid degenerate window, not an error.
        let mut features = Vec::with_capacity(self.feature_len(sample.channel_count()));

        for channel in sample.channels() {
            let mid = channel.len() / 2;
            let half = match pathway {
                Pathway::Phonetic => &channel[..mid],
                Pathway::Semantic => &channel[mid..],
            };
            if half.is_empty() {
                return Err(DecodeError::InvalidInput {
                    reason: format!(
                        "channel of length {} leaves an empty {} half",
                        channel.len(),
                        pathway.name()
                    ),
                });
            }
            features.extend(self.extractor.extract(half)?);
        }

        Ok(features)
    }
}

#[derive(Clone, Copy, Debug)]
enum Pathway {
    Phonetic,
    Semantic,
}

impl Pathway {
    fn name(self) -> &'static str {
        match self {
            Self::Phonetic => "phonetic",
            Self::Semantic => "semantic",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use subvocal_core::types::default_bands;

    fn delta_only() -> Vec<FrequencyBand> {
        vec![FrequencyBand::new("delta", 0.5, 4.0).unwrap()]
    }

    #[test]
    fn test_extract_reference_scenario() {
        // power = mean(1,1,1,1) = 1, center = 2.25 → [2.25]
        let extractor = BandPowerExtractor::new(delta_only());
        let features = extractor.extract(&[1.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(features, vec![2.25]);
    }

    #[test]
    fn test_extract_output_per_band() {
        let extractor = BandPowerExtractor::new(default_bands());
        let features = extractor.extract(&[1.0, -1.0, 2.0]).unwrap();
        assert_eq!(features.len(), 5);
    }

    #[test]
    fn test_extract_values_proportional_to_center_frequency() {
        let extractor = BandPowerExtractor::new(default_bands());
        let features = extractor.extract(&[0.5, 1.5, -0.5]).unwrap();

        let centers: Vec<f64> = extractor.bands().iter().map(FrequencyBand::center_hz).collect();
        for i in 1..features.len() {
            let ratio = features[i] / features[0];
            let expected = centers[i] / centers[0];
            assert!((ratio - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_extract_empty_channel_fails() {
        let extractor = BandPowerExtractor::new(delta_only());
        assert!(matches!(
            extractor.extract(&[]),
            Err(DecodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_featurizer_vector_length() {
        let featurizer = DualPathwayFeaturizer::new(default_bands());
        let sample = RawSample::new(vec![vec![1.0; 8], vec![2.0; 8], vec![3.0; 8]]);

        let phonetic = featurizer.featurize_phonetic(&sample).unwrap();
        let semantic = featurizer.featurize_semantic(&sample).unwrap();
        assert_eq!(phonetic.len(), 3 * 5);
        assert_eq!(semantic.len(), 3 * 5);
    }

    #[test]
    fn test_even_split_is_symmetric() {
        // Even length with identical halves: both pathways see the same data.
        let featurizer = DualPathwayFeaturizer::new(delta_only());
        let sample = RawSample::new(vec![vec![1.0, 2.0, 1.0, 2.0]]);

        let phonetic = featurizer.featurize_phonetic(&sample).unwrap();
        let semantic = featurizer.featurize_semantic(&sample).unwrap();
        assert_eq!(phonetic, semantic);
    }

    #[test]
    fn test_odd_split_semantic_gets_extra_sample() {
        // Length 5: phonetic sees [0,0], semantic sees [0,0,3].
        let featurizer = DualPathwayFeaturizer::new(delta_only());
        let sample = RawSample::new(vec![vec![0.0, 0.0, 0.0, 0.0, 3.0]]);

        let phonetic = featurizer.featurize_phonetic(&sample).unwrap();
        let semantic = featurizer.featurize_semantic(&sample).unwrap();
        assert_eq!(phonetic, vec![0.0]);
        // power = 9/3 = 3, weighted by center 2.25
        assert!((semantic[0] - 3.0 * 2.25).abs() < 1e-12);
    }

    #[test]
    fn test_zero_channels_yields_empty_vector() {
        let featurizer = DualPathwayFeaturizer::new(default_bands());
        let sample = RawSample::new(Vec::new());

        assert!(featurizer.featurize_phonetic(&sample).unwrap().is_empty());
        assert!(featurizer.featurize_semantic(&sample).unwrap().is_empty());
    }

    #[test]
    fn test_single_sample_channel_phonetic_half_empty() {
        // floor(1/2) = 0 phonetic samples: invalid input, not NaN.
        let featurizer = DualPathwayFeaturizer::new(delta_only());
        let sample = RawSample::new(vec![vec![1.0]]);

        assert!(matches!(
            featurizer.featurize_phonetic(&sample),
            Err(DecodeError::InvalidInput { .. })
        ));
        assert!(featurizer.featurize_semantic(&sample).is_ok());
    }
}
