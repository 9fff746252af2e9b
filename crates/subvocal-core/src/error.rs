//! Error types for the Subvocal decoding pipeline
//!
//! Error taxonomy using `thiserror`. Every kind propagates to the caller of
//! the public decoder surface; lookup failures are a separate native-side
//! error recovered at the lookup boundary, not part of this taxonomy.

use thiserror::Error;

/// Result alias for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors from the decoding pipeline.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Empty or malformed signal data reached the band-power extractor.
    #[error("Invalid input signal: {reason}")]
    InvalidInput {
        /// What made the input invalid
        reason: String,
    },

    /// Label codec asked to encode a word outside its current mapping.
    #[error("Unknown label word {word:?}")]
    UnknownWord {
        /// The word that has no index
        word: String,
    },

    /// Label codec asked to decode an index outside its current mapping.
    #[error("Unknown label index {index} (vocabulary size {vocabulary_size})")]
    UnknownIndex {
        /// The index that has no word
        index: usize,
        /// Current vocabulary size
        vocabulary_size: usize,
    },

    /// Argmax requested over a score distribution with no entries.
    #[error("Cannot select a class from an empty score distribution")]
    EmptyDistribution,

    /// Cosine similarity requested against a zero-magnitude vector.
    #[error("Degenerate zero vector for {side}")]
    DegenerateVector {
        /// Which operand was zero ("query" or the concept name)
        side: String,
    },

    /// A fused distribution produced a winning index the codec cannot decode.
    /// Indicates a mismatch between the trained class space and the mapping.
    #[error("Internal inconsistency: winning class {index} has no word mapping")]
    InternalInconsistency {
        /// The unmapped winning index
        index: usize,
    },

    /// The ensemble was queried before any training established a class space.
    #[error("Decoder has not been trained")]
    NotTrained,
}
