//! Top-level histogram set: one [`FlavoredHists`] per truth flavor.

use jp_core::{Flavor, Jet, JetRecord, Result};

use crate::config::BinningConfig;
use crate::flavored::FlavoredHists;
use crate::store::Group;

/// Performance histograms for all four truth flavors.
#[derive(Debug, Clone, PartialEq)]
pub struct JetPerfHists {
    flavors: [FlavoredHists; Flavor::COUNT],
}

impl JetPerfHists {
    /// Validate `cfg` and allocate histograms for every flavor.
    pub fn new(cfg: &BinningConfig) -> Result<Self> {
        let flavors = [
            FlavoredHists::new(cfg)?,
            FlavoredHists::new(cfg)?,
            FlavoredHists::new(cfg)?,
            FlavoredHists::new(cfg)?,
        ];
        Ok(Self { flavors })
    }

    /// Fill the histograms of the jet's flavor.
    #[inline]
    pub fn fill(&mut self, jet: &Jet, weight: f64) {
        self.flavors[jet.flavor.index()].fill(jet, weight);
    }

    /// Resolve a raw record and fill it with its own weight.
    ///
    /// An unknown truth label is returned as an error before anything is filled.
    pub fn fill_record(&mut self, record: &JetRecord) -> Result<()> {
        let jet = record.to_jet()?;
        self.fill(&jet, record.weight());
        Ok(())
    }

    /// Histograms of one flavor.
    pub fn flavor(&self, flavor: Flavor) -> &FlavoredHists {
        &self.flavors[flavor.index()]
    }

    /// Jets, summed over flavors, that matched no pT bin.
    pub fn pt_misses(&self) -> u64 {
        self.flavors.iter().map(FlavoredHists::pt_misses).sum()
    }

    /// Check every flavor against `other` without modifying anything.
    pub fn check_compatible(&self, other: &JetPerfHists) -> Result<()> {
        for (mine, theirs) in self.flavors.iter().zip(&other.flavors) {
            mine.check_compatible(theirs)?;
        }
        Ok(())
    }

    /// Add another instance built from the same config, flavor by flavor.
    ///
    /// On error `self` is unchanged.
    pub fn merge(&mut self, other: &JetPerfHists) -> Result<()> {
        self.check_compatible(other)?;
        for (mine, theirs) in self.flavors.iter_mut().zip(&other.flavors) {
            mine.merge(theirs)?;
        }
        Ok(())
    }

    /// Write `<flavor>/btag/...` for B, C, U and T under `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        for flavor in Flavor::ALL {
            let flavor_group = group.create_group(flavor.name())?;
            self.flavor(flavor).write_to(flavor_group)?;
        }
        tracing::debug!(path = %group.path(), "wrote jet performance histograms");
        Ok(())
    }
}
