//! Jet records and truth-flavor labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// True flavor of a jet.
///
/// The discriminant is the storage slot in `[0, 4)`; it does not follow the
/// canonical write-out order, which is [`Flavor::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Flavor {
    /// Light-flavor (u, d, s, gluon) jet.
    U = 0,
    /// Charm jet.
    C = 1,
    /// Bottom jet.
    B = 2,
    /// Tau / other.
    T = 3,
}

impl Flavor {
    /// Number of flavor slots.
    pub const COUNT: usize = 4;

    /// Canonical write-out order.
    pub const ALL: [Flavor; Flavor::COUNT] = [Flavor::B, Flavor::C, Flavor::U, Flavor::T];

    /// Storage slot of this flavor, always `< Flavor::COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a truth label (0 = light, 4 = charm, 5 = bottom, 15 = tau) to a flavor.
    pub fn from_truth_label(label: i32) -> Result<Self> {
        match label {
            0 => Ok(Flavor::U),
            4 => Ok(Flavor::C),
            5 => Ok(Flavor::B),
            15 => Ok(Flavor::T),
            _ => Err(Error::UnknownFlavor(format!("truth label {label}"))),
        }
    }

    /// Group name used in the output tree.
    pub fn name(self) -> &'static str {
        match self {
            Flavor::B => "B",
            Flavor::C => "C",
            Flavor::U => "U",
            Flavor::T => "T",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagger class probabilities `(p_b, p_c, p_u)`.
///
/// The components are expected to sum to one, but nothing checks it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagTriple {
    /// Bottom probability.
    pub pb: f64,
    /// Charm probability.
    pub pc: f64,
    /// Light probability.
    pub pu: f64,
}

impl TagTriple {
    /// Create a new triple.
    pub fn new(pb: f64, pc: f64, pu: f64) -> Self {
        Self { pb, pc, pu }
    }
}

/// A validated jet, ready to be filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet {
    /// Truth flavor.
    pub flavor: Flavor,
    /// Transverse momentum in MeV.
    pub pt: f64,
    /// Probability triple of the likelihood tagger.
    pub gaia: TagTriple,
    /// MV1 score.
    pub mv1: f64,
    /// MV2c00 score.
    pub mv2c00: f64,
    /// MV2c10 score.
    pub mv2c10: f64,
    /// MV2c20 score.
    pub mv2c20: f64,
}

/// One jet as read from input, before the truth label is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JetRecord {
    /// Truth label (0, 4, 5 or 15).
    pub truth_label: i32,
    /// Transverse momentum in MeV.
    pub pt: f64,
    /// Bottom probability.
    pub pb: f64,
    /// Charm probability.
    pub pc: f64,
    /// Light probability.
    pub pu: f64,
    /// MV1 score.
    pub mv1: f64,
    /// MV2c00 score.
    pub mv2c00: f64,
    /// MV2c10 score.
    pub mv2c10: f64,
    /// MV2c20 score.
    pub mv2c20: f64,
    /// Event weight; 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl JetRecord {
    /// Resolve the truth label and build a [`Jet`].
    pub fn to_jet(&self) -> Result<Jet> {
        Ok(Jet {
            flavor: Flavor::from_truth_label(self.truth_label)?,
            pt: self.pt,
            gaia: TagTriple::new(self.pb, self.pc, self.pu),
            mv1: self.mv1,
            mv2c00: self.mv2c00,
            mv2c10: self.mv2c10,
            mv2c20: self.mv2c20,
        })
    }

    /// Weight to fill with.
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}
