//! Concept grounding via embedding similarity
//!
//! Maps a predicted word to one of a small fixed set of abstract concepts
//! by cosine nearest-neighbour over low-dimension word vectors. A word
//! absent from the embedding table is a normal outcome and returns the
//! out-of-vocabulary sentinel, never an error.

use std::collections::HashMap;

use subvocal_core::error::DecodeResult;
use subvocal_core::math::cosine_similarity;
use subvocal_core::CONCEPT_OUT_OF_VOCABULARY;

/// Embedding dimension for the built-in tables.
pub const EMBEDDING_DIM: usize = 6;

/// Fixed ordered concept table: name and anchor vector.
///
/// Axes, loosely: [need, social, affect, assent, object, action].
/// Order matters: the first-seen concept wins similarity ties.
const CONCEPT_TABLE: &[(&str, [f64; EMBEDDING_DIM])] = &[
    ("sustenance", [1.0, 0.1, 0.2, 0.0, 0.6, 0.1]),
    ("social", [0.1, 1.0, 0.5, 0.1, 0.1, 0.2]),
    ("distress", [0.5, 0.3, 1.0, 0.0, 0.0, 0.4]),
    ("affirmation", [0.0, 0.2, 0.1, 1.0, 0.0, 0.1]),
    ("negation", [0.0, 0.2, 0.3, -1.0, 0.0, 0.1]),
    ("action", [0.2, 0.2, 0.2, 0.1, 0.1, 1.0]),
];

/// Built-in word-embedding table covering the default demo vocabulary.
fn default_embeddings() -> HashMap<String, Vec<f64>> {
    let entries: &[(&str, [f64; EMBEDDING_DIM])] = &[
        ("water", [0.9, 0.0, 0.1, 0.0, 0.7, 0.1]),
        ("food", [1.0, 0.1, 0.1, 0.0, 0.6, 0.1]),
        ("hungry", [0.9, 0.1, 0.4, 0.0, 0.2, 0.2]),
        ("mother", [0.2, 1.0, 0.4, 0.1, 0.2, 0.1]),
        ("friend", [0.1, 0.9, 0.3, 0.2, 0.1, 0.1]),
        ("help", [0.4, 0.5, 0.9, 0.0, 0.0, 0.5]),
        ("pain", [0.3, 0.1, 1.0, 0.0, 0.0, 0.2]),
        ("yes", [0.0, 0.2, 0.1, 0.9, 0.0, 0.1]),
        ("no", [0.0, 0.2, 0.2, -0.9, 0.0, 0.1]),
        ("stop", [0.1, 0.1, 0.4, -0.6, 0.0, 0.8]),
        ("go", [0.1, 0.1, 0.1, 0.5, 0.0, 0.9]),
        ("move", [0.1, 0.1, 0.1, 0.1, 0.2, 1.0]),
    ];
    entries
        .iter()
        .map(|(word, vector)| ((*word).to_string(), vector.to_vec()))
        .collect()
}

/// Nearest-concept grounder over a word-embedding table.
#[derive(Clone, Debug)]
pub struct ConceptGrounder {
    embeddings: HashMap<String, Vec<f64>>,
}

impl ConceptGrounder {
    /// Create a grounder with the built-in embedding table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            embeddings: default_embeddings(),
        }
    }

    /// Create a grounder over a custom embedding table.
    #[must_use]
    pub fn with_embeddings(embeddings: HashMap<String, Vec<f64>>) -> Self {
        Self { embeddings }
    }

    /// Whether the table has a vector for this word.
    #[must_use]
    pub fn knows(&self, word: &str) -> bool {
        self.embeddings.contains_key(word)
    }

    /// Concept names in table order.
    pub fn concepts() -> impl Iterator<Item = &'static str> {
        CONCEPT_TABLE.iter().map(|(name, _)| *name)
    }

    /// Ground a word in its nearest abstract concept.
    ///
    /// Returns [`CONCEPT_OUT_OF_VOCABULARY`] for words missing from the
    /// embedding table. A zero-magnitude embedding fails with
    /// `DegenerateVector` rather than producing NaN similarities. Ties go
    /// to the first concept in table order.
    pub fn ground(&self, word: &str) -> DecodeResult<String> {
        let Some(embedding) = self.embeddings.get(word) else {
            return Ok(CONCEPT_OUT_OF_VOCABULARY.to_string());
        };

        let mut best: Option<(&str, f64)> = None;
        for (name, anchor) in CONCEPT_TABLE {
            let similarity = cosine_similarity(embedding, anchor, name)?;
            let replace = match best {
                None => true,
                Some((_, best_sim)) => similarity > best_sim,
            };
            if replace {
                best = Some((name, similarity));
            }
        }

        // CONCEPT_TABLE is non-empty, so best is always set by here.
        match best {
            Some((name, _)) => Ok(name.to_string()),
            None => Ok(CONCEPT_OUT_OF_VOCABULARY.to_string()),
        }
    }
}

impl Default for ConceptGrounder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
