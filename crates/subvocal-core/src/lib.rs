//! Subvocal Core - foundational types for the subvocal word decoder
//!
//! This crate provides the types shared across the Subvocal pipeline:
//!
//! - [`types`]: Frequency bands, raw signal samples, score distributions,
//!   and the final prediction record
//! - [`error`]: Error taxonomy for decoding, labeling, and grounding
//! - [`labels`]: The word ↔ class-index codec
//! - [`math`]: Signal power proxy and vector similarity utilities
//!
//! # Example
//!
//! ```rust
//! use subvocal_core::labels::LabelCodec;
//!
//! let mut codec = LabelCodec::new();
//! codec.build(["water", "help", "water"].iter().map(|w| w.to_string()));
//! assert_eq!(codec.encode("help").unwrap(), 1);
//! assert_eq!(codec.decode(0).unwrap(), "water");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod labels;
pub mod math;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DecodeError, DecodeResult};
pub use labels::LabelCodec;
pub use types::{FrequencyBand, PredictionResult, RawSample, ScoreDistribution};

/// Placeholder returned when the definition service fails or has no entry.
pub const DEFINITION_NOT_FOUND: &str = "Definition not found";

/// Sentinel concept returned for words absent from the embedding table.
pub const CONCEPT_OUT_OF_VOCABULARY: &str = "word not in vocabulary";
