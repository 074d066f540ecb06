//! Prominence-based peak detection
//!
//! Finds bins of an averaged spectrum that stand out from their surroundings.
//!
//! # Algorithm
//!
//! 1. Threshold: `prominence_factor * max(spectrum)`
//! 2. Find all local maxima. A flat top counts once, at its middle sample;
//!    the first and last samples are never maxima
//! 3. Compute each maximum's topographic prominence: walk outwards on each
//!    side until a strictly higher sample or the edge, take the lowest sample
//!    seen on each side, and subtract the higher of the two from the peak height
//! 4. Keep maxima whose prominence reaches the threshold, in bin order
//!
//! # Example
//!
//! ```
//! use prominent_notes::features::peaks::{local_maxima, peak_prominence};
//!
//! let signal = vec![0.0, 2.0, 1.0, 3.0, 0.0];
//! assert_eq!(local_maxima(&signal), vec![1, 3]);
//! assert_eq!(peak_prominence(&signal, 1), 1.0);
//! assert_eq!(peak_prominence(&signal, 3), 3.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::features::spectrum::AveragedSpectrum;

/// A prominent bin of the averaged spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Index into the (band-filtered) spectrum
    pub bin: usize,
    /// Bin-center frequency in Hz
    pub frequency: f64,
    /// Averaged magnitude at the bin
    pub magnitude: f32,
    /// Height above the higher of the two surrounding bases
    pub prominence: f32,
}

/// Indices of local maxima, ascending
///
/// A sample is a maximum when its left neighbour is strictly lower and the
/// first differing sample to its right is also strictly lower. For a plateau
/// the middle index (rounded down) is reported.
pub fn local_maxima(signal: &[f32]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if signal.len() < 3 {
        return maxima;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    maxima
}

/// Topographic prominence of the sample at `peak`
///
/// Returns 0.0 for an out-of-range index.
pub fn peak_prominence(signal: &[f32], peak: usize) -> f32 {
    let Some(&height) = signal.get(peak) else {
        return 0.0;
    };

    let left_min = signal[..=peak]
        .iter()
        .rev()
        .take_while(|&&x| x <= height)
        .copied()
        .fold(height, f32::min);

    let right_min = signal[peak..]
        .iter()
        .take_while(|&&x| x <= height)
        .copied()
        .fold(height, f32::min);

    height - left_min.max(right_min)
}

/// Detect prominent peaks in an averaged spectrum
///
/// # Arguments
///
/// * `spectrum` - Time-averaged, band-filtered magnitudes
/// * `prominence_factor` - Minimum prominence as a fraction of the loudest bin
///
/// # Returns
///
/// Peaks ordered by bin index. Empty for an empty or all-zero spectrum.
pub fn detect_peaks(spectrum: &AveragedSpectrum, prominence_factor: f32) -> Vec<Peak> {
    let magnitudes = spectrum.magnitudes();

    let max_value = magnitudes.iter().copied().fold(0.0f32, f32::max);
    if max_value <= 0.0 {
        log::debug!("Spectrum is empty or silent, no peaks");
        return vec![];
    }

    let threshold = prominence_factor * max_value;

    let peaks: Vec<Peak> = local_maxima(magnitudes)
        .into_iter()
        .filter_map(|bin| {
            let prominence = peak_prominence(magnitudes, bin);
            (prominence >= threshold).then(|| Peak {
                bin,
                frequency: spectrum.frequencies()[bin],
                magnitude: magnitudes[bin],
                prominence,
            })
        })
        .collect();

    log::debug!(
        "Found {} peaks in {} bins (max={:.6}, prominence threshold={:.6})",
        peaks.len(),
        magnitudes.len(),
        max_value,
        threshold
    );

    peaks
}
