//! Band limiting of the frequency axis
//!
//! Bins whose center frequency lies outside the closed interval
//! `[freq_min, freq_max]` are dropped. The axis is strictly increasing, so the
//! retained bins always form a single contiguous range.

use super::stft::{FrequencyAxis, Spectrogram};

/// Half-open range of retained bin indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRange {
    /// First retained bin
    pub start: usize,
    /// One past the last retained bin
    pub end: usize,
}

impl BandRange {
    /// Number of retained bins
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when no bin falls inside the band
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate the bins of `axis` inside `[freq_min, freq_max]`
///
/// An inverted interval (`freq_min > freq_max`) or one that misses every bin
/// yields an empty range.
pub fn band_range(axis: &FrequencyAxis, freq_min: f64, freq_max: f64) -> BandRange {
    let frequencies = axis.frequencies();
    let start = frequencies.partition_point(|&f| f < freq_min);
    let end = frequencies.partition_point(|&f| f <= freq_max).max(start);
    BandRange { start, end }
}

/// Restrict an axis and its spectrogram to `[freq_min, freq_max]`
///
/// # Returns
///
/// The filtered axis and a spectrogram holding the same bins, in the same order
pub fn filter_band(
    axis: &FrequencyAxis,
    spectrogram: &Spectrogram,
    freq_min: f64,
    freq_max: f64,
) -> (FrequencyAxis, Spectrogram) {
    let range = band_range(axis, freq_min, freq_max);

    log::debug!(
        "Band filter [{:.1}, {:.1}] Hz keeps bins {}..{} ({} of {})",
        freq_min,
        freq_max,
        range.start,
        range.end,
        range.len(),
        axis.len()
    );

    let frames = spectrogram
        .frames()
        .iter()
        .map(|frame| frame[range.start..range.end].to_vec())
        .collect();

    (
        axis.slice(range.start, range.end),
        Spectrogram::from_frames(frames, range.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // 8 kHz, 16-point FFT: bins at 0, 500, 1000, ..., 4000 Hz
    fn axis() -> FrequencyAxis {
        FrequencyAxis::for_fft(8000, 16)
    }

    #[test]
    fn test_inclusive_bounds() {
        let range = band_range(&axis(), 500.0, 1500.0);
        assert_eq!(range, BandRange { start: 1, end: 4 });
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn test_bounds_between_bins() {
        let range = band_range(&axis(), 20.0, 1999.0);
        assert_eq!(range, BandRange { start: 1, end: 4 });
    }

    #[test]
    fn test_inverted_band_is_empty() {
        let range = band_range(&axis(), 3000.0, 1000.0);
        assert!(range.is_empty());
    }

    #[test]
    fn test_band_outside_axis_is_empty() {
        assert!(band_range(&axis(), 5000.0, 20000.0).is_empty());
        assert!(band_range(&axis(), -100.0, -1.0).is_empty());
    }

    #[test]
    fn test_filter_band_keeps_rows() {
        let axis = axis();
        let frames = vec![
            (0..9).map(|i| i as f32).collect::<Vec<_>>(),
            (0..9).map(|i| (i * 10) as f32).collect::<Vec<_>>(),
        ];
        let spec = Spectrogram::from_frames(frames, 9);

        let (band_axis, band_spec) = filter_band(&axis, &spec, 1000.0, 2000.0);
        assert_eq!(band_axis.frequencies(), &[1000.0, 1500.0, 2000.0]);
        assert_eq!(band_spec.bin_count(), 3);
        assert_eq!(band_spec.frame_count(), 2);
        assert_eq!(band_spec.frames()[0], vec![2.0, 3.0, 4.0]);
        assert_eq!(band_spec.frames()[1], vec![20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_filter_band_empty() {
        let axis = axis();
        let spec = Spectrogram::from_frames(vec![vec![1.0; 9]], 9);
        let (band_axis, band_spec) = filter_band(&axis, &spec, 4500.0, 9000.0);
        assert!(band_axis.is_empty());
        assert_eq!(band_spec.bin_count(), 0);
    }
}
