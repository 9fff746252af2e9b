//! The top-level subvocal decoder
//!
//! An explicit decoder object owning both pathway classifiers, the label
//! mapping, the concept grounder, and the lookup collaborator. Training
//! mutates classifier and mapping state through `&mut self`; inference is
//! read-only. The exclusive borrow is the single-writer guard: callers who
//! share a decoder across threads wrap it in an `RwLock`, which gives the
//! readers-wait-for-writer discipline the pipeline requires.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use subvocal_core::error::{DecodeError, DecodeResult};
use subvocal_core::labels::LabelCodec;
use subvocal_core::types::{default_bands, FrequencyBand, PredictionResult, RawSample};
use subvocal_core::DEFINITION_NOT_FOUND;

use crate::ensemble::{DualClassifierEnsemble, EnsembleSample};
use crate::features::DualPathwayFeaturizer;
use crate::grounding::ConceptGrounder;
use crate::lookup::{DefinitionLookup, DictionaryApiClient};
use crate::net::NetConfig;

/// Decoder configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Frequency bands in feature order; immutable after construction
    pub bands: Vec<FrequencyBand>,
    /// Network hyperparameters shared by both pathway classifiers
    pub net: NetConfig,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            net: NetConfig::default(),
        }
    }
}

/// Decodes signal windows into words and grounds them.
pub struct SubvocalDecoder {
    config: DecoderConfig,
    featurizer: DualPathwayFeaturizer,
    ensemble: DualClassifierEnsemble,
    codec: LabelCodec,
    grounder: ConceptGrounder,
    lookup: Box<dyn DefinitionLookup>,
}

impl SubvocalDecoder {
    /// Create a decoder with default configuration and the public
    /// dictionary client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create with custom configuration.
    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self::with_parts(
            config,
            ConceptGrounder::new(),
            Box::new(DictionaryApiClient::new()),
        )
    }

    /// Create with custom grounder and lookup collaborator (used by tests
    /// and by callers pointing at a private dictionary service).
    #[must_use]
    pub fn with_parts(
        config: DecoderConfig,
        grounder: ConceptGrounder,
        lookup: Box<dyn DefinitionLookup>,
    ) -> Self {
        let featurizer = DualPathwayFeaturizer::new(config.bands.clone());
        Self {
            config,
            featurizer,
            ensemble: DualClassifierEnsemble::new(),
            codec: LabelCodec::new(),
            grounder,
            lookup,
        }
    }

    /// Current vocabulary size (0 before training).
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.codec.vocabulary_size()
    }

    /// Train both pathway classifiers on labelled windows.
    ///
    /// Rebuilds the label mapping from scratch (order of first occurrence
    /// fixes index assignment) and retrains both networks over the new
    /// class space. Prior classifier-to-word associations are invalidated.
    /// The `&mut self` receiver is the exclusive region around training:
    /// no `predict` call can overlap it on the same instance.
    pub fn train(&mut self, samples: &[RawSample], labels: &[String]) -> DecodeResult<()> {
        if samples.len() != labels.len() {
            return Err(DecodeError::InvalidInput {
                reason: format!(
                    "sample/label count mismatch: {} vs {}",
                    samples.len(),
                    labels.len()
                ),
            });
        }

        self.codec.build(labels.iter().cloned());
        let num_classes = self.codec.vocabulary_size();

        let mut batch = Vec::with_capacity(samples.len());
        for (sample, label) in samples.iter().zip(labels.iter()) {
            batch.push(EnsembleSample {
                phonetic: self.featurizer.featurize_phonetic(sample)?,
                semantic: self.featurizer.featurize_semantic(sample)?,
                label: self.codec.encode(label)?,
            });
        }

        self.ensemble.train(&batch, num_classes, &self.config.net)?;
        debug!(
            vocabulary = num_classes,
            samples = samples.len(),
            "decoder trained"
        );
        Ok(())
    }

    /// Decode one window into a vocabulary word.
    ///
    /// Featurize → classify both pathways → fuse → argmax → decode. A
    /// winning index the codec cannot decode means the trained class space
    /// and the mapping diverged, which is an internal inconsistency.
    pub fn predict(&self, sample: &RawSample) -> DecodeResult<String> {
        let phonetic = self.featurizer.featurize_phonetic(sample)?;
        let semantic = self.featurizer.featurize_semantic(sample)?;
        let winner = self.ensemble.classify(&phonetic, &semantic)?;

        match self.codec.decode(winner) {
            Ok(word) => Ok(word.to_string()),
            Err(DecodeError::UnknownIndex { index, .. }) => {
                Err(DecodeError::InternalInconsistency { index })
            }
            Err(other) => Err(other),
        }
    }

    /// Full pipeline: decode, then ground and look up the definition.
    ///
    /// The decode completes first; grounding and the definition lookup
    /// have no data dependency on each other and run concurrently. A
    /// lookup failure is converted to the not-found placeholder here and
    /// never aborts the result.
    pub async fn process_and_predict(&self, sample: &RawSample) -> DecodeResult<PredictionResult> {
        let predicted_word = self.predict(sample)?;

        let (definition, universal_concept) = tokio::join!(
            async {
                match self.lookup.definition(&predicted_word).await {
                    Ok(definition) => definition,
                    Err(err) => {
                        warn!(word = %predicted_word, error = %err, "definition lookup failed");
                        DEFINITION_NOT_FOUND.to_string()
                    }
                }
            },
            async { self.grounder.ground(&predicted_word) },
        );

        Ok(PredictionResult {
            predicted_word,
            definition,
            universal_concept: universal_concept?,
        })
    }
}

impl Default for SubvocalDecoder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_rejects_mismatched_lengths() {
        let mut decoder = SubvocalDecoder::new();
        let samples = vec![RawSample::new(vec![vec![1.0, 2.0]])];
        let labels = vec!["a".to_string(), "b".to_string()];

        assert!(matches!(
            decoder.train(&samples, &labels),
            Err(DecodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_predict_before_training_fails() {
        let decoder = SubvocalDecoder::new();
        let sample = RawSample::new(vec![vec![1.0, 2.0, 3.0, 4.0]]);

        assert!(matches!(
            decoder.predict(&sample),
            Err(DecodeError::NotTrained)
        ));
    }

    #[test]
    fn test_training_builds_first_occurrence_mapping() {
        let mut decoder = SubvocalDecoder::new();
        let samples = vec![
            RawSample::new(vec![vec![1.0, 1.0, 1.0, 1.0]]),
            RawSample::new(vec![vec![5.0, 5.0, 5.0, 5.0]]),
            RawSample::new(vec![vec![1.1, 1.1, 0.9, 0.9]]),
        ];
        let labels = ["a", "b", "a"].iter().map(|s| (*s).to_string()).collect::<Vec<_>>();

        decoder.train(&samples, &labels).unwrap();
        assert_eq!(decoder.vocabulary_size(), 2);
    }
}
