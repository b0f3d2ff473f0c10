//! Mel-frequency cepstral coefficient extraction.
//!
//! Per analysis frame: pre-emphasis → Hamming window → zero-pad to the FFT
//! size → power spectrum → triangular mel filterbank → log compression →
//! DCT-II truncated to the requested coefficient count.
//!
//! Framing policy: frame and hop lengths come from their millisecond
//! durations and the sample rate; the trailing partial frame (shorter than
//! one frame length) is dropped rather than zero-padded, so every returned
//! frame covers a full window of real signal.
//!
//! Reference: S. B. Davis and P. Mermelstein, "Comparison of parametric
//! representations for monosyllabic word recognition", IEEE TASSP 1980.

use crate::dft::{Dft, Window};
use crate::error::{Error, Result};
use std::f32::consts::PI;

/// MFCC extraction parameters.
#[derive(Debug, Clone)]
pub struct MfccConfig {
    /// Number of mel filters and of cepstral coefficients per frame.
    pub num_coefficients: usize,
    /// Lower edge of the filterbank in Hz.
    pub low_freq: f32,
    /// Upper edge of the filterbank in Hz. Must not exceed Nyquist.
    pub high_freq: f32,
    /// Analysis frame length in milliseconds.
    pub frame_length_ms: u32,
    /// Hop between consecutive frames in milliseconds.
    pub frame_hop_ms: u32,
    /// Pre-emphasis factor for `y[n] = x[n] - k·x[n-1]`.
    pub pre_emphasis: f32,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            num_coefficients: 40,
            low_freq: 300.0,
            high_freq: 3500.0,
            frame_length_ms: 40,
            frame_hop_ms: 20,
            pre_emphasis: 0.97,
        }
    }
}

/// Convert Hz to the HTK mel scale.
fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel back to Hz.
fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank over the non-redundant half of a power spectrum.
struct MelFilterbank {
    /// `filters[m][k]` — weight of FFT bin k in mel band m.
    filters: Vec<Vec<f32>>,
}

impl MelFilterbank {
    fn new(
        num_bins: usize,
        num_filters: usize,
        sample_rate: u32,
        low_freq: f32,
        high_freq: f32,
    ) -> Self {
        let fft_size = (num_bins - 1) * 2;

        // num_filters + 2 edge points, evenly spaced on the mel scale.
        let mel_low = hz_to_mel(low_freq);
        let mel_high = hz_to_mel(high_freq);
        let step = (mel_high - mel_low) / (num_filters + 1) as f32;
        let bin_points: Vec<usize> = (0..num_filters + 2)
            .map(|i| {
                let hz = mel_to_hz(mel_low + step * i as f32);
                ((fft_size as f32 + 1.0) * hz / sample_rate as f32).floor() as usize
            })
            .collect();

        let mut filters = vec![vec![0.0f32; num_bins]; num_filters];
        for (m, filter) in filters.iter_mut().enumerate() {
            let left = bin_points[m];
            let center = bin_points[m + 1];
            let right = bin_points[m + 2];

            if center > left {
                for k in left..center.min(num_bins) {
                    filter[k] = (k - left) as f32 / (center - left) as f32;
                }
            }
            if right > center {
                for k in center..=right.min(num_bins - 1) {
                    filter[k] = (right - k) as f32 / (right - center) as f32;
                }
            }
        }

        Self { filters }
    }

    /// Per-band energies of a power spectrum. Bin 0 (DC) is excluded.
    fn apply(&self, power: &[f32]) -> Vec<f32> {
        self.filters
            .iter()
            .map(|filter| {
                filter
                    .iter()
                    .zip(power.iter())
                    .skip(1)
                    .map(|(&w, &p)| w * p)
                    .sum()
            })
            .collect()
    }
}

/// DCT-II basis scaled by `sqrt(1 / (2M))`, flattened row-major.
fn dct_basis(num_filters: usize) -> Vec<f32> {
    let scale = (1.0 / (2.0 * num_filters as f32)).sqrt();
    let mut basis = Vec::with_capacity(num_filters * num_filters);
    for k in 0..num_filters {
        for n in 0..num_filters {
            basis.push(2.0 * scale * (PI / num_filters as f32 * (n as f32 + 0.5) * k as f32).cos());
        }
    }
    basis
}

/// Extract per-frame MFCCs from a mono buffer.
///
/// Returns one row of `config.num_coefficients` values per full frame, i.e.
/// `floor((len - frame_len) / hop) + 1` rows (zero rows when the buffer is
/// shorter than one frame).
pub fn mfcc(samples: &[f32], sample_rate: u32, config: &MfccConfig) -> Result<Vec<Vec<f32>>> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    let nyquist = sample_rate as f32 / 2.0;
    if config.high_freq > nyquist || config.low_freq >= config.high_freq || config.low_freq < 0.0 {
        return Err(Error::InvalidFrequencyRange {
            low: config.low_freq,
            high: config.high_freq,
            nyquist,
        });
    }

    let frame_len = (sample_rate as u64 * config.frame_length_ms as u64 / 1000) as usize;
    let hop = (sample_rate as u64 * config.frame_hop_ms as u64 / 1000) as usize;
    if frame_len == 0 || hop == 0 || samples.len() < frame_len {
        return Ok(Vec::new());
    }

    // 512-point floor keeps the filterbank resolution usable for short frames.
    let fft_size = frame_len.next_power_of_two().max(512);
    let num_bins = fft_size / 2 + 1;
    let num_filters = config.num_coefficients;

    let dft = Dft::new(fft_size);
    let window = Window::Hamming.coefficients(frame_len);
    let filterbank = MelFilterbank::new(
        num_bins,
        num_filters,
        sample_rate,
        config.low_freq,
        config.high_freq,
    );
    let dct = dct_basis(num_filters);

    let num_frames = (samples.len() - frame_len) / hop + 1;
    let mut frames = Vec::with_capacity(num_frames);
    let mut buffer = vec![0.0f32; fft_size];

    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        let frame = &samples[start..start + frame_len];

        // Pre-emphasis and windowing in one pass; the padding stays zero.
        buffer.fill(0.0);
        buffer[0] = frame[0] * window[0];
        for i in 1..frame_len {
            buffer[i] = (frame[i] - config.pre_emphasis * frame[i - 1]) * window[i];
        }

        let spectrum = dft.forward(&buffer);
        let power: Vec<f32> = (0..num_bins)
            .map(|k| {
                let re = spectrum.real[k];
                let im = spectrum.imag[k];
                (re * re + im * im) / fft_size as f32
            })
            .collect();

        let log_mel: Vec<f32> = filterbank
            .apply(&power)
            .iter()
            .map(|&e| 20.0 * e.max(1e-3).log10())
            .collect();

        let coeffs: Vec<f32> = (0..num_filters)
            .map(|k| {
                log_mel
                    .iter()
                    .enumerate()
                    .map(|(n, &v)| dct[k * num_filters + n] * v)
                    .sum()
            })
            .collect();
        frames.push(coeffs);
    }

    Ok(frames)
}
