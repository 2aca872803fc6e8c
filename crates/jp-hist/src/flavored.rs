//! Discriminant histograms of one flavor, inclusive and split in pT bins.

use jp_core::{Error, Jet, Result};

use crate::btag::BtagHists;
use crate::config::BinningConfig;
use crate::pt_bins::PtBinTable;
use crate::store::Group;

/// Inclusive histograms plus one [`BtagHists`] per pT bin.
#[derive(Debug, Clone, PartialEq)]
pub struct FlavoredHists {
    btag: BtagHists,
    pt_table: PtBinTable,
    pt_btag: Vec<BtagHists>,
    pt_misses: u64,
}

impl FlavoredHists {
    /// Validate `cfg`, then allocate the inclusive bundle and one bundle per pT bin.
    pub fn new(cfg: &BinningConfig) -> Result<Self> {
        cfg.validate()?;
        let pt_table = PtBinTable::from_config(cfg);
        let pt_btag =
            (0..pt_table.n_bins()).map(|_| BtagHists::new(cfg)).collect::<Result<Vec<_>>>()?;
        Ok(Self { btag: BtagHists::new(cfg)?, pt_table, pt_btag, pt_misses: 0 })
    }

    /// Fill the inclusive bundle and the bundle of the jet's pT bin.
    ///
    /// A jet whose pT matches no bin (NaN) only enters the inclusive
    /// histograms and is counted in [`FlavoredHists::pt_misses`].
    #[inline]
    pub fn fill(&mut self, jet: &Jet, weight: f64) {
        self.btag.fill(jet, weight);
        match self.pt_table.find_bin(jet.pt) {
            Some(bin) => self.pt_btag[bin].fill(jet, weight),
            None => {
                self.pt_misses += 1;
                tracing::trace!(pt = jet.pt, "jet matches no pT bin");
            }
        }
    }

    /// Inclusive histograms.
    pub fn all(&self) -> &BtagHists {
        &self.btag
    }

    /// Histograms of pT bin `bin`.
    pub fn pt_bin(&self, bin: usize) -> Option<&BtagHists> {
        self.pt_btag.get(bin)
    }

    /// The pT bin table.
    pub fn pt_table(&self) -> &PtBinTable {
        &self.pt_table
    }

    /// Jets that entered only the inclusive histograms.
    pub fn pt_misses(&self) -> u64 {
        self.pt_misses
    }

    /// Check the pT table and every bundle against `other` without modifying anything.
    pub fn check_compatible(&self, other: &FlavoredHists) -> Result<()> {
        if self.pt_table != other.pt_table {
            return Err(Error::IncompatibleBinning(format!(
                "pT edges {:?} vs {:?}",
                self.pt_table.edges(),
                other.pt_table.edges()
            )));
        }
        self.btag.check_compatible(&other.btag)?;
        for (mine, theirs) in self.pt_btag.iter().zip(&other.pt_btag) {
            mine.check_compatible(theirs)?;
        }
        Ok(())
    }

    /// Add another instance built from the same config. On error `self` is unchanged.
    pub fn merge(&mut self, other: &FlavoredHists) -> Result<()> {
        self.check_compatible(other)?;
        self.btag.merge(&other.btag)?;
        for (mine, theirs) in self.pt_btag.iter_mut().zip(&other.pt_btag) {
            mine.merge(theirs)?;
        }
        self.pt_misses += other.pt_misses;
        Ok(())
    }

    /// Write `btag/all` and `btag/ptBins/<lo>-<hi>` under `group`.
    pub fn write_to(&self, group: &mut Group) -> Result<()> {
        let btag_group = group.create_group("btag")?;
        self.btag.write_to(btag_group.create_group("all")?)?;

        let pt_bins = btag_group.create_group("ptBins")?;
        for (name, hists) in self.pt_table.bin_names().iter().zip(&self.pt_btag) {
            hists.write_to(pt_bins.create_group(name)?)?;
        }
        tracing::debug!(path = %pt_bins.path(), n_bins = self.pt_btag.len(), "wrote pT bins");
        Ok(())
    }
}
