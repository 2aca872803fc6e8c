//! # jp-core
//!
//! Core types for jetperf: jet records, truth-flavor labels, and the
//! b-tagging discriminants derived from tagger probabilities.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod discriminant;
pub mod error;
pub mod jet;

pub use error::{Error, Result};
pub use jet::{Flavor, Jet, JetRecord, TagTriple};
