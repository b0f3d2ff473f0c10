//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

/// Decoded stereo audio: one f32 buffer per channel plus format metadata.
///
/// Mono files duplicate their single channel into both `left` and `right`,
/// so analysis callers can always take `left` without branching on channel
/// count. `channels` preserves the source layout for round-trip writes.
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Left channel samples in [-1, 1].
    pub left: Vec<f32>,
    /// Right channel samples in [-1, 1]. Equal to `left` for mono sources.
    pub right: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample of the source file.
    pub bit_depth: u16,
    /// Channel count of the source file (1 or 2).
    pub channels: u16,
}

impl AudioData {
    /// Number of sample frames per channel.
    pub fn num_frames(&self) -> usize {
        self.left.len()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.left.len() as f64 / self.sample_rate as f64
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = reader.len() as u64 / spec.channels as u64;

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / spec.sample_rate as f64,
    })
}

/// Read a WAV file into per-channel f32 buffers.
///
/// Integer PCM samples are normalized to [-1, 1]; float WAVs pass through
/// unscaled. Files with more than two channels keep the first two.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioData> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    if interleaved.is_empty() {
        return Err(Error::EmptyFile);
    }

    let num_frames = interleaved.len() / channels;
    let mut left = Vec::with_capacity(num_frames);
    let mut right = Vec::with_capacity(num_frames);
    for frame in interleaved.chunks_exact(channels) {
        left.push(frame[0]);
        right.push(if channels > 1 { frame[1] } else { frame[0] });
    }

    debug!(
        path = %path.display(),
        frames = num_frames,
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        "read wav"
    );

    Ok(AudioData {
        left,
        right,
        sample_rate: spec.sample_rate,
        bit_depth: spec.bits_per_sample,
        channels: spec.channels.min(2),
    })
}

/// Write audio to a WAV file as 16-bit integer PCM.
///
/// Writes one or two channels according to `audio.channels`. Samples are
/// clamped to [-1, 1] before quantization.
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &AudioData) -> Result<()> {
    let path = path.as_ref();
    let channels = audio.channels.clamp(1, 2);
    let spec = hound::WavSpec {
        channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for i in 0..audio.left.len() {
        writer.write_sample(quantize_i16(audio.left[i]))?;
        if channels == 2 {
            let r = audio.right.get(i).copied().unwrap_or(0.0);
            writer.write_sample(quantize_i16(r))?;
        }
    }
    writer.finalize()?;

    debug!(
        path = %path.display(),
        frames = audio.left.len(),
        sample_rate = audio.sample_rate,
        "wrote wav"
    );
    Ok(())
}

fn quantize_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16
}
