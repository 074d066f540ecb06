//! Audio decoding using Symphonia
//!
//! This is the loader in front of the pipeline: it turns a path into a mono
//! [`Signal`], optionally resampled to a requested analysis rate.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::LoadError;
use crate::io::signal::Signal;
use crate::preprocessing::channel_mixer::downmix_to_mono;
use crate::preprocessing::resample::resample_sinc;

/// Decode audio file to interleaved PCM samples
///
/// # Arguments
///
/// * `path` - Path to audio file (any container/codec Symphonia is built with)
///
/// # Returns
///
/// Tuple of (interleaved samples, sample_rate, channels)
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be opened, probed or decoded, or
/// holds no audio
pub fn decode_audio(path: &Path) -> Result<(Vec<f32>, u32, usize), LoadError> {
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(LoadError::NoAudioTrack)?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if decoded.frames() == 0 {
                    continue;
                }

                let spec = *decoded.spec();
                let packet_channels = spec.channels.count();
                match channels {
                    Some(expected) if expected != packet_channels => {
                        return Err(LoadError::UnsupportedFormat(format!(
                            "channel count changed mid-stream ({} -> {})",
                            expected, packet_channels
                        )));
                    }
                    _ => channels = Some(packet_channels),
                }
                sample_rate.get_or_insert(spec.rate);

                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buf.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                // Corrupted packets are skipped, the rest of the stream is still usable
                log::warn!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if interleaved.is_empty() {
        return Err(LoadError::Empty);
    }

    let sample_rate = sample_rate.ok_or(LoadError::InvalidSampleRate(0))?;
    let channels = channels.unwrap_or(1).max(1);

    log::debug!(
        "Decoded {} samples ({} channels) at {} Hz",
        interleaved.len(),
        channels,
        sample_rate
    );

    Ok((interleaved, sample_rate, channels))
}

/// Load an audio file as a mono [`Signal`]
///
/// Multichannel audio is averaged down to mono. When `sample_rate` is given
/// and differs from the file's native rate, the audio is resampled to it;
/// otherwise the native rate is kept.
///
/// # Errors
///
/// Returns `LoadError` if decoding fails, the audio is empty or contains
/// non-finite samples, or the requested rate is zero
pub fn load_signal(path: &Path, sample_rate: Option<u32>) -> Result<Signal, LoadError> {
    if sample_rate == Some(0) {
        return Err(LoadError::InvalidSampleRate(0));
    }

    let (interleaved, native_rate, channels) = decode_audio(path)?;
    let mono = downmix_to_mono(&interleaved, channels);

    let (samples, rate) = match sample_rate {
        Some(target) if target != native_rate => {
            (resample_sinc(&mono, native_rate, target), target)
        }
        _ => (mono, native_rate),
    };

    Signal::new(samples, rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: &[Vec<i16>]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in frame {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_signal(Path::new("/definitely/not/here.wav"), None);
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"this is not a riff file at all").unwrap();

        let result = load_signal(&path, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_stereo_downmix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let frames: Vec<Vec<i16>> = (0..1000).map(|_| vec![16384, 0]).collect();
        write_wav(&path, 2, 8000, &frames);

        let signal = load_signal(&path, None).unwrap();
        assert_eq!(signal.sample_rate(), 8000);
        assert_eq!(signal.len(), 1000);
        assert!(signal.samples().iter().all(|&s| (s - 0.25).abs() < 1e-3));
    }

    #[test]
    fn test_load_with_rate_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let frames: Vec<Vec<i16>> = (0..8000).map(|_| vec![1000]).collect();
        write_wav(&path, 1, 8000, &frames);

        let signal = load_signal(&path, Some(16000)).unwrap();
        assert_eq!(signal.sample_rate(), 16000);
        assert_eq!(signal.len(), 16000);

        let native = load_signal(&path, Some(8000)).unwrap();
        assert_eq!(native.len(), 8000);
    }

    #[test]
    fn test_zero_rate_override_rejected() {
        let result = load_signal(Path::new("whatever.wav"), Some(0));
        assert!(matches!(result, Err(LoadError::InvalidSampleRate(0))));
    }
}
