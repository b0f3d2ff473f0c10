//! Amplitude and dominant-frequency tracking.
//!
//! Produces a coarse loudness/pitch contour: the buffer is split into 40 ms
//! frames with 50% overlap, and each frame contributes one (timestamp, RMS
//! amplitude, dominant frequency) triple. The dominant frequency is the
//! strongest non-DC bin of the frame's spectrum — adequate for contour
//! visualization, not a substitute for the pitch estimators in
//! [`crate::pitch`].

use crate::dft::Dft;
use crate::error::{Error, Result};

/// One analysis frame of the amplitude/frequency track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmpFreqPoint {
    /// Frame start time in seconds.
    pub timestamp: f32,
    /// RMS amplitude of the frame.
    pub amplitude: f32,
    /// Dominant frequency of the frame in Hz; 0.0 for a near-silent frame.
    pub frequency: f32,
}

/// RMS below which a frame reports no dominant frequency.
const SILENCE_RMS: f32 = 1e-6;

/// Compute the amplitude/frequency track of a mono buffer.
///
/// Buffers shorter than one 40 ms frame are zero-padded to a single frame.
/// Timestamps are strictly increasing frame start times.
pub fn ampfreq(samples: &[f32], sample_rate: u32) -> Result<Vec<AmpFreqPoint>> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }

    let window = (sample_rate as usize / 25).max(2); // 40 ms per frame
    let hop = (window / 2).max(1); // 20 ms overlap

    let padded;
    let data = if samples.len() < window {
        padded = {
            let mut buf = samples.to_vec();
            buf.resize(window, 0.0);
            buf
        };
        padded.as_slice()
    } else {
        samples
    };

    let dft = Dft::new(window);
    let mut track = Vec::with_capacity(data.len() / hop + 1);

    let mut start = 0;
    while start + window <= data.len() {
        let frame = &data[start..start + window];
        let rms = (frame.iter().map(|&x| x * x).sum::<f32>() / window as f32).sqrt();

        let frequency = if rms < SILENCE_RMS {
            0.0
        } else {
            let mags = dft.forward(frame).magnitude();
            // Bins 1..=N/2 cover DC-exclusive up to Nyquist.
            let peak_bin = mags[1..=window / 2]
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
                .map(|(i, _)| i + 1)
                .unwrap_or(0);
            peak_bin as f32 * sample_rate as f32 / window as f32
        };

        track.push(AmpFreqPoint {
            timestamp: start as f32 / sample_rate as f32,
            amplitude: rms,
            frequency,
        });
        start += hop;
    }

    Ok(track)
}
