//! Binning configuration shared by every histogram in a run.

use std::collections::HashSet;
use std::path::Path;

use jp_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::pt_bins::PtBinTable;

/// Default number of bins for every discriminant histogram.
pub const N_BINS: usize = 1000;
/// Default range of the raw tagger-score histograms.
pub const SCORE_RANGE: (f64, f64) = (0.0, 1.0);
/// Default range of the log-ratio discriminant histograms.
pub const DISCRIMINANT_RANGE: (f64, f64) = (-15.0, 15.0);
/// Default finite pT bin edges in GeV.
pub const PT_EDGES_GEV: [f64; 12] =
    [0.0, 20.0, 30.0, 40.0, 50.0, 60.0, 75.0, 90.0, 110.0, 150.0, 200.0, 600.0];
/// MeV per GeV.
pub const PT_SCALE: u32 = 1000;

/// Binning of the discriminant histograms and of the pT table.
///
/// Loaded from YAML or JSON; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinningConfig {
    /// Bin count shared by all discriminant histograms.
    pub n_bins: usize,
    /// `[low, high)` of the mv1 / mv2 score histograms.
    pub score_range: (f64, f64),
    /// `[low, high)` of the log-ratio discriminant histograms.
    pub discriminant_range: (f64, f64),
    /// Finite pT edges in GeV, strictly ascending. A `+inf` edge is always appended.
    pub pt_edges_gev: Vec<f64>,
    /// Factor from the edge unit to the unit of `Jet::pt`.
    pub pt_scale: u32,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            n_bins: N_BINS,
            score_range: SCORE_RANGE,
            discriminant_range: DISCRIMINANT_RANGE,
            pt_edges_gev: PT_EDGES_GEV.to_vec(),
            pt_scale: PT_SCALE,
        }
    }
}

impl BinningConfig {
    /// Read a YAML (or JSON) config file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        // YAML is a superset of JSON, so one parser covers both.
        let cfg: BinningConfig = serde_yaml_ng::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check ranges, edges and that no two pT bins share a label.
    pub fn validate(&self) -> Result<()> {
        if self.n_bins == 0 {
            return Err(Error::Validation("n_bins must be > 0".into()));
        }
        for (name, (lo, hi)) in
            [("score_range", self.score_range), ("discriminant_range", self.discriminant_range)]
        {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::Validation(format!("{name} [{lo}, {hi}) is empty or non-finite")));
            }
        }
        if self.pt_scale == 0 {
            return Err(Error::Validation("pt_scale must be >= 1".into()));
        }
        if self.pt_edges_gev.is_empty() {
            return Err(Error::Validation("pt_edges_gev needs at least one edge".into()));
        }
        if let Some(bad) = self.pt_edges_gev.iter().find(|e| !e.is_finite()) {
            return Err(Error::Validation(format!(
                "pt_edges_gev must be finite (got {bad}); the +inf edge is implicit"
            )));
        }
        if let Some(w) = self.pt_edges_gev.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::Validation(format!(
                "pt_edges_gev must be strictly ascending ({} >= {})",
                w[0], w[1]
            )));
        }

        let table = PtBinTable::from_config(self);
        let mut seen = HashSet::new();
        for name in table.bin_names() {
            if !seen.insert(name.clone()) {
                return Err(Error::Validation(format!(
                    "pt edges produce duplicate bin name '{name}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        BinningConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let cfg: BinningConfig = serde_yaml_ng::from_str("n_bins: 50\n").unwrap();
        assert_eq!(cfg.n_bins, 50);
        assert_eq!(cfg.pt_edges_gev, PT_EDGES_GEV.to_vec());
        assert_eq!(cfg.pt_scale, 1000);
    }

    #[test]
    fn json_is_accepted() {
        let cfg: BinningConfig =
            serde_yaml_ng::from_str(r#"{"pt_edges_gev": [25.0, 100.0], "pt_scale": 1}"#).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.pt_edges_gev, vec![25.0, 100.0]);
    }

    #[test]
    fn yaml_round_trip() {
        let cfg = BinningConfig::default();
        let back: BinningConfig = serde_yaml_ng::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(serde_yaml_ng::from_str::<BinningConfig>("nbins: 3\n").is_err());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            BinningConfig { n_bins: 0, ..Default::default() },
            BinningConfig { score_range: (1.0, 0.0), ..Default::default() },
            BinningConfig { discriminant_range: (0.0, f64::INFINITY), ..Default::default() },
            BinningConfig { pt_scale: 0, ..Default::default() },
            BinningConfig { pt_edges_gev: vec![], ..Default::default() },
            BinningConfig { pt_edges_gev: vec![10.0, f64::INFINITY], ..Default::default() },
            BinningConfig { pt_edges_gev: vec![10.0, 10.0], ..Default::default() },
            BinningConfig { pt_edges_gev: vec![30.0, 20.0], ..Default::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(Error::Validation(_))), "{cfg:?}");
        }
    }

    #[test]
    fn colliding_bin_labels_are_rejected() {
        // All three edges truncate to "20", giving two "20-20" bins.
        let cfg = BinningConfig { pt_edges_gev: vec![20.1, 20.4, 20.7], ..Default::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate bin name"), "{err}");
    }
}
