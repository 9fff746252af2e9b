//! Dual-classifier ensemble: pathway training, fusion, and selection
//!
//! Owns two independently trained networks, one per pathway. At inference
//! each network scores the full trained class space; the two score
//! distributions are fused by arithmetic mean and the winning class is the
//! greatest fused score.
//!
//! Fusion is defined only over the intersection of the two key sets: a
//! class scored by one pathway but not the other is dropped. Both networks
//! here emit scores for every trained class, so the sets coincide in
//! practice, but the intersection rule is the documented contract and is
//! kept explicit rather than papered over with zero defaults.

use subvocal_core::error::{DecodeError, DecodeResult};
use subvocal_core::types::ScoreDistribution;

use crate::net::{DenseNetwork, NetConfig};

/// One training example for the ensemble.
#[derive(Clone, Debug)]
pub struct EnsembleSample {
    /// Features from the first half of the window
    pub phonetic: Vec<f64>,
    /// Features from the second half of the window
    pub semantic: Vec<f64>,
    /// Dense class index of the ground-truth word
    pub label: usize,
}

/// Per-dimension min-max scaling fitted at training time.
///
/// The raw power-proxy features grow with band center frequency; squashing
/// them into `[0, 1]` keeps the sigmoid layers out of saturation. Purely an
/// internal detail of the classifiers, not part of the feature contract.
#[derive(Clone, Debug)]
struct FeatureScaler {
    mins: Vec<f64>,
    spans: Vec<f64>,
}

impl FeatureScaler {
    fn fit(vectors: &[&[f64]]) -> Self {
        let dims = vectors.first().map_or(0, |v| v.len());
        let mut mins = vec![f64::MAX; dims];
        let mut maxs = vec![f64::MIN; dims];
        for vector in vectors {
            for (i, &x) in vector.iter().enumerate() {
                mins[i] = mins[i].min(x);
                maxs[i] = maxs[i].max(x);
            }
        }
        let spans = mins
            .iter()
            .zip(maxs.iter())
            .map(|(lo, hi)| if hi > lo { hi - lo } else { 1.0 })
            .collect();
        Self { mins, spans }
    }

    fn apply(&self, vector: &[f64]) -> Vec<f64> {
        vector
            .iter()
            .zip(self.mins.iter().zip(self.spans.iter()))
            .map(|(&x, (&min, &span))| (x - min) / span)
            .collect()
    }
}

/// One pathway: a trained network plus the scaler fitted with it.
#[derive(Clone, Debug)]
struct PathwayClassifier {
    net: DenseNetwork,
    scaler: FeatureScaler,
}

/// The two pathway classifiers and their fusion policy.
#[derive(Clone, Debug, Default)]
pub struct DualClassifierEnsemble {
    phonetic: Option<PathwayClassifier>,
    semantic: Option<PathwayClassifier>,
}

impl DualClassifierEnsemble {
    /// Create an untrained ensemble.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both pathway networks have been trained.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.phonetic.is_some() && self.semantic.is_some()
    }

    /// Train both pathway networks from scratch.
    ///
    /// Each network maps its pathway's feature vector to a one-hot target
    /// of length `num_classes` over the current class space. Prior trained
    /// state is discarded.
    pub fn train(
        &mut self,
        samples: &[EnsembleSample],
        num_classes: usize,
        config: &NetConfig,
    ) -> DecodeResult<()> {
        if samples.is_empty() || num_classes == 0 {
            return Err(DecodeError::InvalidInput {
                reason: "training requires at least one sample and one class".into(),
            });
        }
        for sample in samples {
            if sample.label >= num_classes {
                return Err(DecodeError::InternalInconsistency {
                    index: sample.label,
                });
            }
        }

        let targets: Vec<Vec<f64>> = samples
            .iter()
            .map(|s| {
                let mut t = vec![0.0; num_classes];
                t[s.label] = 1.0;
                t
            })
            .collect();

        let phonetic = Self::train_pathway(
            samples.iter().map(|s| s.phonetic.as_slice()).collect(),
            &targets,
            num_classes,
            config,
        );
        let semantic = Self::train_pathway(
            samples.iter().map(|s| s.semantic.as_slice()).collect(),
            &targets,
            num_classes,
            config,
        );

        tracing::debug!(
            num_classes,
            samples = samples.len(),
            "ensemble trained"
        );

        self.phonetic = Some(phonetic);
        self.semantic = Some(semantic);
        Ok(())
    }

    fn train_pathway(
        features: Vec<&[f64]>,
        targets: &[Vec<f64>],
        num_classes: usize,
        config: &NetConfig,
    ) -> PathwayClassifier {
        let scaler = FeatureScaler::fit(&features);
        let batch: Vec<(Vec<f64>, Vec<f64>)> = features
            .iter()
            .zip(targets.iter())
            .map(|(f, t)| (scaler.apply(f), t.clone()))
            .collect();

        let input_len = features.first().map_or(0, |f| f.len());
        let mut net = DenseNetwork::new(input_len, num_classes, config);
        let error = net.train(&batch, config);
        tracing::debug!(input_len, error, "pathway classifier fitted");

        PathwayClassifier { net, scaler }
    }

    /// Score a phonetic feature vector over the trained class space.
    pub fn predict_phonetic(&self, features: &[f64]) -> DecodeResult<ScoreDistribution> {
        Self::predict_with(self.phonetic.as_ref(), features)
    }

    /// Score a semantic feature vector over the trained class space.
    pub fn predict_semantic(&self, features: &[f64]) -> DecodeResult<ScoreDistribution> {
        Self::predict_with(self.semantic.as_ref(), features)
    }

    fn predict_with(
        pathway: Option<&PathwayClassifier>,
        features: &[f64],
    ) -> DecodeResult<ScoreDistribution> {
        let pathway = pathway.ok_or(DecodeError::NotTrained)?;
        let scaled = pathway.scaler.apply(features);
        Ok(pathway
            .net
            .run(&scaled)
            .into_iter()
            .enumerate()
            .collect())
    }

    /// Arithmetic-mean fusion over the intersection of the two key sets.
    ///
    /// Classes present in only one distribution are dropped, not defaulted
    /// to zero. Commutative for identical key sets.
    #[must_use]
    pub fn fuse(
        phonetic: &ScoreDistribution,
        semantic: &ScoreDistribution,
    ) -> ScoreDistribution {
        phonetic
            .iter()
            .filter_map(|(class, p_score)| {
                semantic
                    .get(class)
                    .map(|s_score| (class, (p_score + s_score) / 2.0))
            })
            .collect()
    }

    /// Full inference: score both pathways, fuse, and pick the winner.
    pub fn classify(&self, phonetic: &[f64], semantic: &[f64]) -> DecodeResult<usize> {
        let phonetic_scores = self.predict_phonetic(phonetic)?;
        let semantic_scores = self.predict_semantic(semantic)?;
        let fused = Self::fuse(&phonetic_scores, &semantic_scores);
        fused.argmax()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(pairs: &[(usize, f64)]) -> ScoreDistribution {
        pairs.iter().copied().collect()
    }

    fn fast_config() -> NetConfig {
        NetConfig {
            hidden1: 8,
            hidden2: 8,
            learning_rate: 0.5,
            max_epochs: 4000,
            error_threshold: 0.001,
            seed: 11,
        }
    }

    #[test]
    fn test_fuse_means_shared_keys() {
        let fused = DualClassifierEnsemble::fuse(
            &dist(&[(0, 0.2), (1, 0.8)]),
            &dist(&[(0, 0.6), (1, 0.4)]),
        );
        assert!((fused.get(0).unwrap() - 0.4).abs() < 1e-12);
        assert!((fused.get(1).unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_drops_non_shared_keys() {
        let fused = DualClassifierEnsemble::fuse(
            &dist(&[(0, 0.9), (1, 0.5)]),
            &dist(&[(1, 0.5), (2, 0.9)]),
        );
        assert_eq!(fused.len(), 1);
        assert!((fused.get(1).unwrap() - 0.5).abs() < 1e-12);
        assert!(fused.get(0).is_none());
        assert!(fused.get(2).is_none());
    }

    #[test]
    fn test_fuse_commutative_on_identical_key_sets() {
        let a = dist(&[(0, 0.1), (1, 0.7), (2, 0.3)]);
        let b = dist(&[(0, 0.5), (1, 0.2), (2, 0.9)]);
        assert_eq!(
            DualClassifierEnsemble::fuse(&a, &b),
            DualClassifierEnsemble::fuse(&b, &a)
        );
    }

    #[test]
    fn test_untrained_predict_fails() {
        let ensemble = DualClassifierEnsemble::new();
        assert!(matches!(
            ensemble.predict_phonetic(&[0.5]),
            Err(DecodeError::NotTrained)
        ));
    }

    #[test]
    fn test_train_rejects_out_of_range_label() {
        let mut ensemble = DualClassifierEnsemble::new();
        let samples = vec![EnsembleSample {
            phonetic: vec![1.0],
            semantic: vec![1.0],
            label: 3,
        }];
        assert!(matches!(
            ensemble.train(&samples, 2, &fast_config()),
            Err(DecodeError::InternalInconsistency { index: 3 })
        ));
    }

    #[test]
    fn test_trained_ensemble_ranks_training_classes() {
        let mut ensemble = DualClassifierEnsemble::new();
        let samples = vec![
            EnsembleSample {
                phonetic: vec![1.0, 0.0],
                semantic: vec![1.0, 0.0],
                label: 0,
            },
            EnsembleSample {
                phonetic: vec![0.0, 1.0],
                semantic: vec![0.0, 1.0],
                label: 1,
            },
        ];
        ensemble.train(&samples, 2, &fast_config()).unwrap();

        assert_eq!(ensemble.classify(&[1.0, 0.0], &[1.0, 0.0]).unwrap(), 0);
        assert_eq!(ensemble.classify(&[0.0, 1.0], &[0.0, 1.0]).unwrap(), 1);
    }

    #[test]
    fn test_score_distribution_covers_class_space() {
        let mut ensemble = DualClassifierEnsemble::new();
        let samples = vec![
            EnsembleSample {
                phonetic: vec![1.0, 0.0],
                semantic: vec![1.0, 0.0],
                label: 0,
            },
            EnsembleSample {
                phonetic: vec![0.0, 1.0],
                semantic: vec![0.0, 1.0],
                label: 1,
            },
        ];
        ensemble.train(&samples, 2, &fast_config()).unwrap();

        let scores = ensemble.predict_phonetic(&[0.5, 0.5]).unwrap();
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|(_, s)| (0.0..=1.0).contains(&s)));
    }
}
