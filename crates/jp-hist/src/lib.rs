//! # jp-hist
//!
//! Flavor- and pT-binned b-tagging performance histograms.
//!
//! Jets are routed by truth flavor ([`JetPerfHists`]), then by transverse
//! momentum ([`FlavoredHists`]), into bundles of seven discriminant
//! histograms ([`BtagHists`]). The result is written into a hierarchical
//! [`Group`] tree:
//!
//! ```text
//! /<B|C|U|T>/btag/all/<7 datasets>
//! /<B|C|U|T>/btag/ptBins/<lo>-<hi>/<7 datasets>
//! ```
//!
//! ## Example
//!
//! ```
//! use jp_core::{Flavor, Jet, TagTriple};
//! use jp_hist::{BinningConfig, Group, JetPerfHists};
//!
//! let mut hists = JetPerfHists::new(&BinningConfig::default()).unwrap();
//! let jet = Jet {
//!     flavor: Flavor::B,
//!     pt: 25_000.0,
//!     gaia: TagTriple::new(0.8, 0.1, 0.1),
//!     mv1: 0.9,
//!     mv2c00: 0.8,
//!     mv2c10: 0.8,
//!     mv2c20: 0.8,
//! };
//! hists.fill(&jet, 1.0);
//!
//! let mut root = Group::new();
//! hists.write_to(&mut root).unwrap();
//! assert!(root.dataset("B/btag/ptBins/20-30/mv1").is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod btag;
pub mod config;
pub mod flavored;
pub mod histogram;
pub mod perf;
pub mod pt_bins;
pub mod store;

pub use btag::{BtagHists, DATASET_NAMES};
pub use config::BinningConfig;
pub use flavored::FlavoredHists;
pub use histogram::Histogram;
pub use jp_core::{Error, Result};
pub use perf::JetPerfHists;
pub use pt_bins::PtBinTable;
pub use store::{Dataset, Group};
