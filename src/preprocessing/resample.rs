//! Sample-rate conversion by band-limited interpolation
//!
//! Only used when the caller asks for a specific analysis sample rate.
//! Output sample `i` is read at source position `i * from_rate / to_rate` by
//! convolving the source with a Blackman-windowed sinc kernel.
//!
//! The kernel cutoff sits just below the lower of the two Nyquist
//! frequencies. When downsampling, content the target rate cannot represent
//! is therefore filtered out instead of folding back as a false tone.

use std::f64::consts::PI;

/// Kernel half-width, in zero crossings of the cutoff sinc
const ZERO_CROSSINGS: f64 = 32.0;

/// Cutoff as a fraction of the lower Nyquist frequency
const ROLLOFF: f64 = 0.95;

/// Resample mono audio from `from_rate` to `to_rate`
///
/// Returns the input unchanged when the rates match or either rate is zero.
/// The output holds `ceil(len * to_rate / from_rate)` samples. Samples beyond
/// either end of the input are treated as silence.
///
/// # Example
///
/// ```
/// use prominent_notes::preprocessing::resample::resample_sinc;
///
/// let out = resample_sinc(&vec![0.5f32; 4410], 44100, 22050);
/// assert_eq!(out.len(), 2205);
/// assert!((out[1000] - 0.5).abs() < 1e-3);
/// ```
pub fn resample_sinc(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == to_rate || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as u64 * to_rate as u64).div_ceil(from_rate as u64)) as usize;

    // Cutoff relative to the source Nyquist frequency
    let cutoff = ROLLOFF * ratio.recip().min(1.0);
    let half_width = ZERO_CROSSINGS / cutoff;
    let last = samples.len() - 1;

    log::debug!(
        "Resampling {} samples from {} Hz to {} Hz ({} output samples, cutoff {:.1} Hz)",
        samples.len(),
        from_rate,
        to_rate,
        out_len,
        cutoff * from_rate as f64 / 2.0
    );

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let first = (pos - half_width).ceil().max(0.0) as usize;
            let end = ((pos + half_width).floor() as usize).min(last);

            (first..=end)
                .map(|k| samples[k] as f64 * kernel(pos - k as f64, cutoff, half_width))
                .sum::<f64>() as f32
        })
        .collect()
}

/// Windowed-sinc low-pass kernel at offset `t` source samples
fn kernel(t: f64, cutoff: f64, half_width: f64) -> f64 {
    if t.abs() >= half_width {
        return 0.0;
    }

    // Blackman window over [-half_width, half_width]
    let x = PI * t / half_width;
    let window = 0.42 + 0.5 * x.cos() + 0.08 * (2.0 * x).cos();

    cutoff * sinc(cutoff * t) * window
}

/// Normalized sinc: `sin(pi x) / (pi x)`
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}
