//! Subvocal Native - host-side subvocal word decoding
//!
//! This crate turns short windows of multi-channel biosignal data into a
//! predicted vocabulary word, then grounds that word in a definition and an
//! abstract concept.
//!
//! # Pipeline
//!
//! ```text
//! RawSample ──► DualPathwayFeaturizer ──► DualClassifierEnsemble
//!                  │          │                │
//!             phonetic    semantic         fuse + argmax
//!               half         half              │
//!                                              ▼
//!                                        predicted word
//!                                         │          │
//!                                         ▼          ▼
//!                                  ConceptGrounder  DefinitionLookup
//!                                         │          │
//!                                         └──► PredictionResult
//! ```
//!
//! # Modules
//!
//! - [`features`]: Band-power proxy extraction and the phonetic/semantic split
//! - [`net`]: Feed-forward networks backing the two classifiers
//! - [`ensemble`]: Dual-classifier training, score fusion, and selection
//! - [`grounding`]: Embedding-similarity concept grounding
//! - [`lookup`]: External dictionary collaborator
//! - [`decoder`]: The top-level decoder object
//! - [`simulation`]: Synthetic labelled signal generation for demos and tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod decoder;
pub mod ensemble;
pub mod features;
pub mod grounding;
pub mod lookup;
pub mod net;
pub mod simulation;

// Re-export key types
pub use decoder::{DecoderConfig, SubvocalDecoder};
pub use ensemble::DualClassifierEnsemble;
pub use features::{BandPowerExtractor, DualPathwayFeaturizer};
pub use grounding::ConceptGrounder;
pub use lookup::{DefinitionLookup, DictionaryApiClient, LookupError};
pub use simulation::{SignalSimulator, SimulationConfig};
