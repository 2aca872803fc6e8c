//! Fixed-range, equal-width weighted histogram.

use jp_core::{Error, Result};

use crate::store::{Dataset, Group};

/// A 1D weighted histogram with underflow and overflow slots.
///
/// Slot 0 is underflow, slots `1..=n_bins` are the regular bins and slot
/// `n_bins + 1` is overflow. NaN inputs are accumulated separately so that
/// no weight is ever dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    n_bins: usize,
    x_min: f64,
    x_max: f64,
    contents: Vec<f64>,
    nan: f64,
    entries: u64,
}

impl Histogram {
    /// Create an empty histogram with `n_bins` equal-width bins over `[x_min, x_max)`.
    pub fn new(n_bins: usize, x_min: f64, x_max: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::Validation("histogram needs at least one bin".into()));
        }
        if !(x_min.is_finite() && x_max.is_finite() && x_min < x_max) {
            return Err(Error::Validation(format!(
                "invalid histogram range [{x_min}, {x_max})"
            )));
        }
        Ok(Self { n_bins, x_min, x_max, contents: vec![0.0; n_bins + 2], nan: 0.0, entries: 0 })
    }

    /// Number of regular bins.
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Lower edge of the first regular bin.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Upper edge of the last regular bin.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// All slots, including underflow (first) and overflow (last).
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    /// Weight accumulated from NaN inputs.
    pub fn nan(&self) -> f64 {
        self.nan
    }

    /// Number of `fill` calls.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Slot index for `x`, or `None` for NaN.
    pub fn find_slot(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            return None;
        }
        if x < self.x_min {
            return Some(0);
        }
        if x >= self.x_max {
            return Some(self.n_bins + 1);
        }
        let frac = (x - self.x_min) / (self.x_max - self.x_min);
        // Rounding can push values just below x_max onto n_bins.
        let bin = ((frac * self.n_bins as f64) as usize).min(self.n_bins - 1);
        Some(bin + 1)
    }

    /// Add `weight` to the slot containing `x`.
    #[inline]
    pub fn fill(&mut self, x: f64, weight: f64) {
        match self.find_slot(x) {
            Some(slot) => self.contents[slot] += weight,
            None => self.nan += weight,
        }
        self.entries += 1;
    }

    /// Content of the slot containing `x` (the NaN accumulator for NaN).
    pub fn content_at(&self, x: f64) -> f64 {
        match self.find_slot(x) {
            Some(slot) => self.contents[slot],
            None => self.nan,
        }
    }

    /// Total weight, including flow slots and NaN.
    pub fn sum_weights(&self) -> f64 {
        self.contents.iter().sum::<f64>() + self.nan
    }

    /// Fail with [`Error::IncompatibleBinning`] unless `other` has the same binning.
    pub fn check_compatible(&self, other: &Histogram) -> Result<()> {
        if self.n_bins != other.n_bins || self.x_min != other.x_min || self.x_max != other.x_max {
            return Err(Error::IncompatibleBinning(format!(
                "({}, {}, {}) vs ({}, {}, {})",
                self.n_bins, self.x_min, self.x_max, other.n_bins, other.x_min, other.x_max
            )));
        }
        Ok(())
    }

    /// Add another histogram with identical binning, bin by bin.
    ///
    /// On error `self` is unchanged.
    pub fn merge(&mut self, other: &Histogram) -> Result<()> {
        self.check_compatible(other)?;
        for (a, b) in self.contents.iter_mut().zip(&other.contents) {
            *a += b;
        }
        self.nan += other.nan;
        self.entries += other.entries;
        Ok(())
    }

    /// Write the histogram as dataset `name` under `group`.
    pub fn write_to(&self, group: &mut Group, name: &str) -> Result<()> {
        let dataset = Dataset::new(self.contents.clone())
            .with_attribute("n_bins", self.n_bins as f64)
            .with_attribute("x_min", self.x_min)
            .with_attribute("x_max", self.x_max)
            .with_attribute("entries", self.entries as f64)
            .with_attribute("nan", self.nan);
        group.create_dataset(name, dataset)
    }
}
