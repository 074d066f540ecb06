//! Channel mixing utilities (multichannel to mono conversion)

/// Average interleaved multichannel samples down to mono
///
/// # Arguments
///
/// * `interleaved` - Samples laid out frame by frame (`L R L R ...` for stereo)
/// * `channels` - Number of channels per frame
///
/// # Returns
///
/// One sample per frame, the arithmetic mean of its channels. A trailing
/// incomplete frame is discarded.
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    log::debug!(
        "Downmixing {} interleaved samples from {} channels",
        interleaved.len(),
        channels
    );

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
