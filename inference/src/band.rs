//! Dominant frequency band extraction
//!
//! Columns of a spectrogram are frequency bins. The extractor averages each
//! column into an energy profile, keeps the columns whose energy is above a
//! fraction of the peak, and reports the span from the first to the last of
//! those columns together with a simple energy-contrast score.

use crate::config::DEFAULT_ENERGY_THRESHOLD_RATIO;
use crate::types::BandParams;
use ndarray::ArrayView2;

/// Mean intensity of every image column, in column order
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnEnergyProfile {
    energy: Vec<f64>,
}

impl ColumnEnergyProfile {
    /// Wrap precomputed per-column energies
    pub fn new(energy: Vec<f64>) -> Self {
        Self { energy }
    }

    /// Average a (height, width) grid over its rows
    pub fn from_grid(grid: ArrayView2<'_, f32>) -> Self {
        let rows = grid.nrows();
        if rows == 0 {
            return Self { energy: Vec::new() };
        }

        let energy = grid
            .columns()
            .into_iter()
            .map(|col| col.iter().map(|&v| v as f64).sum::<f64>() / rows as f64)
            .collect();

        Self { energy }
    }

    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.energy
    }

    /// Peak column energy, `None` for an empty profile
    pub fn max_energy(&self) -> Option<f64> {
        self.energy.iter().copied().reduce(f64::max)
    }

    /// Find the band spanning every column above `ratio * max_energy`
    ///
    /// Returns `None` for an all-black image or when nothing clears the
    /// threshold. Gaps between active columns are included in the band.
    pub fn extract_band(&self, ratio: f64) -> Option<BandParams> {
        let max_energy = self.max_energy()?;
        if max_energy <= 0.0 {
            return None;
        }

        let threshold = ratio * max_energy;
        let start = self.energy.iter().position(|&e| e > threshold)?;
        let end = self.energy.iter().rposition(|&e| e > threshold)?;

        let width = self.energy.len() as f64;
        let center_freq_norm = ((start + end) as f64 / 2.0) / width;
        let bandwidth_norm = (end - start + 1) as f64 / width;

        let band_energy = mean(&self.energy[start..=end]);
        let background: Vec<f64> = self.energy[..start]
            .iter()
            .chain(&self.energy[end + 1..])
            .copied()
            .collect();
        let bg_energy = if background.is_empty() {
            0.0
        } else {
            mean(&background)
        };

        Some(BandParams {
            center_freq_norm,
            bandwidth_norm,
            snr_like: band_energy - bg_energy,
            start_col: start,
            end_col: end,
        })
    }
}

/// Extract band statistics from a grayscale intensity grid of shape (h, w)
pub fn extract_frequency_band_params(
    grid: ArrayView2<'_, f32>,
    energy_threshold_ratio: f64,
) -> Option<BandParams> {
    let band = ColumnEnergyProfile::from_grid(grid).extract_band(energy_threshold_ratio);
    match &band {
        Some(b) => log::debug!(
            "Band columns {}..={} (center {:.3}, bandwidth {:.3})",
            b.start_col,
            b.end_col,
            b.center_freq_norm,
            b.bandwidth_norm
        ),
        None => log::debug!("No column above threshold ratio {}", energy_threshold_ratio),
    }
    band
}

/// Same as [`extract_frequency_band_params`] with the default 0.3 ratio
pub fn extract_with_default_ratio(grid: ArrayView2<'_, f32>) -> Option<BandParams> {
    extract_frequency_band_params(grid, DEFAULT_ENERGY_THRESHOLD_RATIO)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
