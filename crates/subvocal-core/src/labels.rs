//! Word ↔ class-index codec
//!
//! Maintains the bijection between vocabulary words and the dense integer
//! class indices the classifiers are trained over. Built once per training
//! batch; rebuilding fully replaces prior state, so retraining on a new
//! label set invalidates any earlier classifier-to-word association.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

/// Bidirectional mapping between words and dense indices `[0, vocab_size)`.
///
/// Index assignment follows order of first occurrence in the training
/// labels, so the mapping is deterministic for a fixed input order. The
/// mapping is a bijection: every index in range has exactly one word and
/// vice versa.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LabelCodec {
    word_to_index: HashMap<String, usize>,
    index_to_word: Vec<String>,
}

impl LabelCodec {
    /// Create an empty codec with no vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the mapping from a label sequence, replacing all prior state.
    ///
    /// Duplicate words keep the index of their first occurrence.
    pub fn build<I>(&mut self, words: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.word_to_index.clear();
        self.index_to_word.clear();

        for word in words {
            if !self.word_to_index.contains_key(&word) {
                self.word_to_index
                    .insert(word.clone(), self.index_to_word.len());
                self.index_to_word.push(word);
            }
        }
    }

    /// Number of distinct words in the current mapping.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.index_to_word.len()
    }

    /// Class index for a word.
    pub fn encode(&self, word: &str) -> DecodeResult<usize> {
        self.word_to_index
            .get(word)
            .copied()
            .ok_or_else(|| DecodeError::UnknownWord {
                word: word.to_string(),
            })
    }

    /// Word for a class index.
    pub fn decode(&self, index: usize) -> DecodeResult<&str> {
        self.index_to_word
            .get(index)
            .map(String::as_str)
            .ok_or(DecodeError::UnknownIndex {
                index,
                vocabulary_size: self.index_to_word.len(),
            })
    }

    /// Iterate the vocabulary in index order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.index_to_word.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec_from(words: &[&str]) -> LabelCodec {
        let mut codec = LabelCodec::new();
        codec.build(words.iter().map(|w| (*w).to_string()));
        codec
    }

    #[test]
    fn test_first_occurrence_indexing() {
        let codec = codec_from(&["a", "b", "a"]);
        assert_eq!(codec.vocabulary_size(), 2);
        assert_eq!(codec.encode("a").unwrap(), 0);
        assert_eq!(codec.encode("b").unwrap(), 1);
        assert_eq!(codec.decode(0).unwrap(), "a");
        assert_eq!(codec.decode(1).unwrap(), "b");
    }

    #[test]
    fn test_roundtrip_bijection() {
        let words = ["water", "help", "yes", "no", "water", "yes"];
        let codec = codec_from(&words);

        assert_eq!(codec.vocabulary_size(), 4);
        for word in words {
            let index = codec.encode(word).unwrap();
            assert!(index < codec.vocabulary_size());
            assert_eq!(codec.decode(index).unwrap(), word);
        }
    }

    #[test]
    fn test_unknown_word_and_index() {
        let codec = codec_from(&["a"]);
        assert!(matches!(
            codec.encode("missing"),
            Err(DecodeError::UnknownWord { .. })
        ));
        assert!(matches!(
            codec.decode(5),
            Err(DecodeError::UnknownIndex {
                index: 5,
                vocabulary_size: 1
            })
        ));
    }

    #[test]
    fn test_rebuild_replaces_state() {
        let mut codec = codec_from(&["a", "b"]);
        codec.build(["x".to_string(), "y".to_string(), "z".to_string()]);

        assert_eq!(codec.vocabulary_size(), 3);
        assert!(codec.encode("a").is_err());
        assert_eq!(codec.encode("x").unwrap(), 0);
        assert_eq!(codec.decode(2).unwrap(), "z");
    }
}
