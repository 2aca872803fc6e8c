//! Per-jet b-tagging discriminant histograms.

use jp_core::discriminant::{anti_c, anti_u, gr1};
use jp_core::{Jet, Result};

use crate::config::BinningConfig;
use crate::histogram::Histogram;
use crate::store::Group;

/// Dataset names written by [`BtagHists::write_to`], in write order.
pub const DATASET_NAMES: [&str; 7] =
    ["mv1", "gaiaAntiU", "gaiaAntiC", "gaiaGr1", "mv2c00", "mv2c10", "mv2c20"];

/// The seven discriminant histograms of one (flavor, pT) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BtagHists {
    mv1: Histogram,
    gaia_anti_light: Histogram,
    gaia_anti_charm: Histogram,
    gaia_gr1: Histogram,
    mv2c00: Histogram,
    mv2c10: Histogram,
    mv2c20: Histogram,
}

impl BtagHists {
    /// Allocate empty histograms with the configured binning.
    pub fn new(cfg: &BinningConfig) -> Result<Self> {
        let n = cfg.n_bins;
        let (s_lo, s_hi) = cfg.score_range;
        let (d_lo, d_hi) = cfg.discriminant_range;
        Ok(Self {
            mv1: Histogram::new(n, s_lo, s_hi)?,
            gaia_anti_light: Histogram::new(n, d_lo, d_hi)?,
            gaia_anti_charm: Histogram::new(n, d_lo, d_hi)?,
            gaia_gr1: Histogram::new(n, d_lo, d_hi)?,
            mv2c00: Histogram::new(n, s_lo, s_hi)?,
            mv2c10: Histogram::new(n, s_lo, s_hi)?,
            mv2c20: Histogram::new(n, s_lo, s_hi)?,
        })
    }

    /// Fill all seven histograms with `weight`.
    #[inline]
    pub fn fill(&mut self, jet: &Jet, weight: f64) {
        self.mv1.fill(jet.mv1, weight);
        self.gaia_anti_light.fill(anti_u(&jet.gaia), weight);
        self.gaia_anti_charm.fill(anti_c(&jet.gaia), weight);
        self.gaia_gr1.fill(gr1(&jet.gaia), weight);
        self.mv2c00.fill(jet.mv2c00, weight);
        self.mv2c10.fill(jet.mv2c10, weight);
        self.mv2c20.fill(jet.mv2c20, weight);
    }

    /// Histograms paired with their dataset names, in write order.
    pub fn histograms(&self) -> [(&'static str, &Histogram); 7] {
        [
            (DATASET_NAMES[0], &self.mv1),
            (DATASET_NAMES[1], &self.gaia_anti_light),
            (DATASET_NAMES[2], &self.gaia_anti_charm),
            (DATASET_NAMES[3], &self.gaia_gr1),
            (DATASET_NAMES[4], &self.mv2c00),
            (DATASET_NAMES[5], &self.mv2c10),
            (DATASET_NAMES[6], &self.mv2c20),
        ]
    }

    /// Look up one histogram by dataset name.
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.histograms().into_iter().find(|(n, _)| *n == name).map(|(_, h)| h)
    }

    /// Check all seven histograms against `other` without modifying anything.
    pub fn check_compatible(&self, other: &BtagHists) -> Result<()> {
        for ((_, mine), (_, theirs)) in self.histograms().into_iter().zip(other.histograms()) {
            mine.check_compatible(theirs)?;
        }
        Ok(())
    }

    /// Add another bundle bin by bin. On error `self` is unchanged.
    pub fn merge(&mut self, other: &BtagHists) -> Result<()> {
        self.check_compatible(other)?;
        for (mine, theirs) in self.histograms_mut().into_iter().zip(other.histograms()) {
            mine.merge(theirs.1)?;
        }
        Ok(())
    }

    fn histograms_mut(&mut self) -> [&mut Histogram; 7] {
        [
            &mut self.mv1,
            &mut self.gaia_anti_light,
            &mut self.gaia_anti_charm,
            &mut self.gaia_gr1,
            &mut self.mv2c00,
            &mut self.mv2c10,
            &mut self.mv2c20,
        ]
    }

    /// Write the seven histograms as datasets of `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        for (name, hist) in self.histograms() {
            hist.write_to(group, name)?;
        }
        Ok(())
    }
}
