//! Transverse-momentum bin table.
//!
//! Bin `i` covers `(edge[i-1], edge[i]]`; bin 0 has no lower edge and the
//! last edge is always `+inf`, so every non-NaN pT lands in some bin.

use crate::config::BinningConfig;

/// Label of the missing lower edge of the first bin.
pub const NO_EDGE_LABEL: &str = "NONE";
/// Label of the infinite upper edge of the last bin.
pub const INF_LABEL: &str = "INF";

/// Ascending pT edges in the unit of `Jet::pt`, terminated by `+inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct PtBinTable {
    edges: Vec<f64>,
    scale: u32,
}

impl PtBinTable {
    /// Build the table from a config whose `pt_scale` is non-zero.
    ///
    /// Only reached through [`BinningConfig::validate`] and validated
    /// constructors, so unsorted or unscaled edges never make it into a table.
    pub(crate) fn from_config(cfg: &BinningConfig) -> Self {
        let scale = f64::from(cfg.pt_scale);
        let mut edges: Vec<f64> = cfg.pt_edges_gev.iter().map(|e| e * scale).collect();
        edges.push(f64::INFINITY);
        Self { edges, scale: cfg.pt_scale }
    }

    /// Number of bins, the `+inf` bin included.
    pub fn n_bins(&self) -> usize {
        self.edges.len()
    }

    /// Scaled edges, ending with `+inf`.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin holding `pt`: the first edge `>= pt`.
    ///
    /// A pT equal to an edge belongs to the bin that edge closes. Only NaN
    /// misses.
    #[inline]
    pub fn find_bin(&self, pt: f64) -> Option<usize> {
        if pt.is_nan() {
            return None;
        }
        let idx = self.edges.partition_point(|&edge| edge < pt);
        (idx < self.edges.len()).then_some(idx)
    }

    /// Label of one scaled edge, in the unscaled unit.
    pub fn edge_label(&self, edge: f64) -> String {
        if edge.is_infinite() {
            return INF_LABEL.to_string();
        }
        ((edge as i64) / i64::from(self.scale)).to_string()
    }

    /// `(lower, upper)` labels of every bin, in ascending order.
    pub fn bin_labels(&self) -> impl Iterator<Item = (String, String)> + '_ {
        let lowers = std::iter::once(NO_EDGE_LABEL.to_string())
            .chain(self.edges.iter().map(|&e| self.edge_label(e)));
        let uppers = self.edges.iter().map(|&e| self.edge_label(e));
        lowers.zip(uppers)
    }

    /// `"<lower>-<upper>"` group names, in ascending order.
    pub fn bin_names(&self) -> Vec<String> {
        self.bin_labels().map(|(lo, hi)| format!("{lo}-{hi}")).collect()
    }
}
