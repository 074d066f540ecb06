//! Short-time Fourier transform magnitudes
//!
//! Framing convention (fixed, not configurable):
//! 1. The signal is centered by zero-padding `frame_size / 2` samples on both ends
//! 2. Frames of `frame_size` samples start every `hop_length` samples of the padded signal
//! 3. Only frames that fit completely inside the padded signal are kept, so a
//!    trailing partial frame is dropped; the padding guarantees every input
//!    sample is still covered by at least one frame
//! 4. Each frame is weighted by a periodic Hann window and transformed with an
//!    unnormalized forward FFT; the magnitude of bins `0..=frame_size / 2` is kept
//!
//! # Example
//!
//! ```
//! use prominent_notes::features::spectrum::stft::compute_stft;
//! use prominent_notes::io::signal::Signal;
//!
//! let signal = Signal::new(vec![0.0f32; 4096], 8000)?;
//! let (spectrogram, axis) = compute_stft(&signal, 1024, 256, false)?;
//! assert_eq!(axis.len(), 513);
//! assert_eq!(spectrogram.frame_count(), 17);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::ExtractionError;
use crate::io::signal::Signal;

/// Bin-center frequencies in Hz, strictly increasing
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyAxis {
    frequencies: Vec<f64>,
}

impl FrequencyAxis {
    /// Frequencies of bins `0..=frame_size / 2` for a real FFT of `frame_size` points
    pub fn for_fft(sample_rate: u32, frame_size: usize) -> Self {
        let resolution = sample_rate as f64 / frame_size as f64;
        Self {
            frequencies: (0..=frame_size / 2).map(|k| k as f64 * resolution).collect(),
        }
    }

    /// Sub-axis of bins `start..end`; order and strictness carry over
    pub(crate) fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            frequencies: self.frequencies[start..end].to_vec(),
        }
    }

    /// Frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when no bins remain (e.g. after band filtering)
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Magnitude spectrogram, stored frame-major
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    frames: Vec<Vec<f32>>,
    bin_count: usize,
}

impl Spectrogram {
    pub(crate) fn from_frames(frames: Vec<Vec<f32>>, bin_count: usize) -> Self {
        debug_assert!(frames.iter().all(|f| f.len() == bin_count));
        Self { frames, bin_count }
    }

    /// Number of time frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// All frames, each holding `bin_count` magnitudes
    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    /// Magnitude at `(bin, frame)`, if in range
    pub fn magnitude(&self, bin: usize, frame: usize) -> Option<f32> {
        self.frames.get(frame).and_then(|f| f.get(bin)).copied()
    }
}

/// Periodic Hann window: `w[n] = 0.5 - 0.5 * cos(2 * pi * n / size)`
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|n| {
            let t = 2.0 * std::f64::consts::PI * n as f64 / size as f64;
            (0.5 - 0.5 * t.cos()) as f32
        })
        .collect()
}

/// Number of frames produced for `signal_len` samples under the centered convention
pub fn frame_count(signal_len: usize, frame_size: usize, hop_length: usize) -> usize {
    if frame_size == 0 || hop_length == 0 {
        return 0;
    }
    let padded_len = signal_len + 2 * (frame_size / 2);
    if padded_len < frame_size {
        return 0;
    }
    1 + (padded_len - frame_size) / hop_length
}

/// Compute the magnitude spectrogram of a signal
///
/// # Arguments
///
/// * `signal` - Mono signal
/// * `frame_size` - FFT window size in samples
/// * `hop_length` - Samples between successive frames (`0 < hop_length <= frame_size`)
/// * `parallel` - Transform frames on the rayon pool; output is identical either way
///
/// # Returns
///
/// The spectrogram and its frequency axis (`frame_size / 2 + 1` bins)
///
/// # Errors
///
/// Returns `ExtractionError::InvalidConfig` for a zero frame size or a hop
/// length outside `1..=frame_size`
pub fn compute_stft(
    signal: &Signal,
    frame_size: usize,
    hop_length: usize,
    parallel: bool,
) -> Result<(Spectrogram, FrequencyAxis), ExtractionError> {
    if frame_size == 0 {
        return Err(ExtractionError::InvalidConfig(
            "Frame size must be > 0".to_string(),
        ));
    }

    if hop_length == 0 || hop_length > frame_size {
        return Err(ExtractionError::InvalidConfig(format!(
            "Hop length must be in 1..={}, got {}",
            frame_size, hop_length
        )));
    }

    let pad = frame_size / 2;
    let mut padded = Vec::with_capacity(signal.len() + 2 * pad);
    padded.resize(pad, 0.0f32);
    padded.extend_from_slice(signal.samples());
    padded.resize(signal.len() + 2 * pad, 0.0);

    let n_frames = frame_count(signal.len(), frame_size, hop_length);
    let bin_count = frame_size / 2 + 1;

    log::debug!(
        "Computing STFT: {} samples at {} Hz, frame={}, hop={}, {} frames x {} bins{}",
        signal.len(),
        signal.sample_rate(),
        frame_size,
        hop_length,
        n_frames,
        bin_count,
        if parallel { " (parallel)" } else { "" }
    );

    let window = hann_window(frame_size);
    let fft: Arc<dyn Fft<f32>> = FftPlanner::<f32>::new().plan_fft_forward(frame_size);

    let transform = |t: usize| {
        let start = t * hop_length;
        frame_magnitudes(
            fft.as_ref(),
            &padded[start..start + frame_size],
            &window,
            bin_count,
        )
    };

    let frames: Vec<Vec<f32>> = if parallel {
        (0..n_frames).into_par_iter().map(transform).collect()
    } else {
        (0..n_frames).map(transform).collect()
    };

    Ok((
        Spectrogram::from_frames(frames, bin_count),
        FrequencyAxis::for_fft(signal.sample_rate(), frame_size),
    ))
}

/// Window one frame, transform it and keep the non-negative frequency magnitudes
fn frame_magnitudes(
    fft: &dyn Fft<f32>,
    frame: &[f32],
    window: &[f32],
    bin_count: usize,
) -> Vec<f32> {
    let mut buffer: Vec<Complex<f32>> = frame
        .iter()
        .zip(window)
        .map(|(&x, &w)| Complex::new(x * w, 0.0))
        .collect();
    let mut scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
    fft.process_with_scratch(&mut buffer, &mut scratch);

    buffer.iter().take(bin_count).map(|c| c.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, len: usize) -> Signal {
        let samples = (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_frequency_axis() {
        let axis = FrequencyAxis::for_fft(44100, 2048);
        assert_eq!(axis.len(), 1025);
        assert_eq!(axis.frequencies()[0], 0.0);
        assert!((axis.frequencies()[1024] - 22050.0).abs() < 1e-9);
        assert!(axis.frequencies().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_hann_window_is_periodic() {
        let w = hann_window(8);
        assert_eq!(w[0], 0.0);
        assert!((w[4] - 1.0).abs() < 1e-6);
        // Periodic: w[n] == w[size - n]
        assert!((w[1] - w[7]).abs() < 1e-6);
        assert!((w[3] - w[5]).abs() < 1e-6);
    }

    #[test]
    fn test_frame_count_centered() {
        // padded = 4096 + 1024 = 5120; 1 + (5120 - 1024) / 256 = 17
        assert_eq!(frame_count(4096, 1024, 256), 17);
        // Trailing partial frame is dropped: padded = 1000 + 2048 = 3048 -> 1 + 1000 / 512
        assert_eq!(frame_count(1000, 2048, 512), 2);
        // A single sample still yields one frame
        assert_eq!(frame_count(1, 2048, 512), 1);
        assert_eq!(frame_count(100, 0, 10), 0);
    }

    #[test]
    fn test_invalid_parameters() {
        let signal = sine(440.0, 8000, 1024);
        assert!(compute_stft(&signal, 0, 1, false).is_err());
        assert!(compute_stft(&signal, 512, 0, false).is_err());
        assert!(compute_stft(&signal, 512, 1024, false).is_err());
    }

    #[test]
    fn test_sine_peak_bin() {
        // 1000 Hz at 8 kHz with 1024-point frames: bin spacing 7.8125 Hz, exact bin 128
        let signal = sine(1000.0, 8000, 8000);
        let (spec, axis) = compute_stft(&signal, 1024, 256, false).unwrap();
        assert_eq!(spec.bin_count(), axis.len());

        let mid = spec.frame_count() / 2;
        let frame = &spec.frames()[mid];
        let (peak_bin, _) = frame
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
        assert_eq!(peak_bin, 128);
        assert!((axis.frequencies()[peak_bin] - 1000.0).abs() < 1e-9);
        // Hann-windowed full-scale sine: peak magnitude ~= frame_size / 4
        assert!((frame[128] - 256.0).abs() < 1.0, "got {}", frame[128]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let signal = sine(523.25, 22050, 22050);
        let sequential = compute_stft(&signal, 2048, 512, false).unwrap();
        let parallel = compute_stft(&signal, 2048, 512, true).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_magnitude_lookup() {
        let signal = sine(440.0, 8000, 2048);
        let (spec, _) = compute_stft(&signal, 512, 512, false).unwrap();
        assert!(spec.magnitude(0, 0).is_some());
        assert!(spec.magnitude(spec.bin_count(), 0).is_none());
        assert!(spec.magnitude(0, spec.frame_count()).is_none());
    }
}
