//! Sample-rate conversion via polyphase windowed-sinc filtering.
//!
//! Converting between rates `src` and `dst` is done by the rational factor
//! P/Q = dst/src (reduced by their GCD): conceptually upsample by P, lowpass
//! at `min(1/P, 1/Q)` normalized frequency to suppress images and aliases,
//! then downsample by Q. The polyphase decomposition computes only the output
//! samples actually needed, skipping the explicit zero-insertion.
//!
//! The anti-aliasing lowpass is a Blackman-windowed sinc normalized to unity
//! DC gain.
//!
//! Reference: P. P. Vaidyanathan, *Multirate Systems and Filter Banks*,
//! Prentice Hall, 1993, Section 4.3.

use crate::error::{Error, Result};
use std::f32::consts::PI;

/// A resampled buffer with its new sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    /// Samples at the target rate.
    pub samples: Vec<f32>,
    /// The target sample rate in Hz.
    pub sample_rate: u32,
    /// Nominal bit depth for round-trip I/O. Informational only.
    pub bit_depth: u16,
}

/// Bit depth reported on resampled buffers; the conversion itself is float.
const OUTPUT_BIT_DEPTH: u16 = 16;

/// Design a windowed-sinc lowpass FIR, normalized to unity DC gain.
///
/// `cutoff` is normalized so 1.0 is Nyquist. Odd tap counts give a symmetric
/// Type I linear-phase filter.
fn design_lowpass(num_taps: usize, cutoff: f32) -> Vec<f32> {
    if num_taps == 0 {
        return Vec::new();
    }

    let m = num_taps - 1;
    let mut coeffs = Vec::with_capacity(num_taps);
    for n in 0..num_taps {
        let x = n as f32 - m as f32 / 2.0;
        let sinc = if x.abs() < 1e-7 {
            cutoff
        } else {
            (PI * cutoff * x).sin() / (PI * x)
        };
        let window = if m == 0 {
            1.0
        } else {
            let phase = 2.0 * PI * n as f32 / m as f32;
            0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
        };
        coeffs.push(sinc * window);
    }

    let sum: f32 = coeffs.iter().sum();
    if sum.abs() > 1e-10 {
        for c in coeffs.iter_mut() {
            *c /= sum;
        }
    }
    coeffs
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Polyphase rational resampling by P/Q producing exactly `out_len` samples.
///
/// Output sample m draws on input frame `n = floor(m·Q / P)` through
/// polyphase sub-filter `k = (m·Q) mod P` of the prototype lowpass.
fn resample_polyphase(signal: &[f32], p: u64, q: u64, out_len: usize) -> Vec<f32> {
    let num_taps = (4 * p.max(q) * 10 + 1) as usize;
    let cutoff = 0.9 / p.max(q) as f32;
    let prototype = design_lowpass(num_taps, cutoff);

    // Sub-filter k holds prototype taps k, k+P, k+2P, ...
    let taps_per_phase = num_taps.div_ceil(p as usize);
    let mut polyphase = vec![vec![0.0f32; taps_per_phase]; p as usize];
    for (tap_idx, &coeff) in prototype.iter().enumerate() {
        polyphase[tap_idx % p as usize][tap_idx / p as usize] = coeff;
    }

    let mut output = Vec::with_capacity(out_len);
    for m in 0..out_len as u64 {
        let full_idx = m * q; // position in the P-upsampled sequence
        let n = (full_idx / p) as usize;
        let sub_filter = &polyphase[(full_idx % p) as usize];

        let mut acc = 0.0f32;
        for (i, &coeff) in sub_filter.iter().enumerate() {
            if n >= i && n - i < signal.len() {
                acc += coeff * signal[n - i];
            }
        }
        // Scale by P to restore unity passband gain after zero-insertion.
        output.push(acc * p as f32);
    }
    output
}

/// Convert a mono buffer from `sample_rate` to `target_rate`.
///
/// The output length is `round(len · target_rate / sample_rate)`. When the
/// rates are equal the input is returned unchanged. Both rates must be
/// positive and the input non-empty.
pub fn resample(samples: &[f32], sample_rate: u32, target_rate: u32) -> Result<Resampled> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    if target_rate == 0 {
        return Err(Error::InvalidSampleRate(target_rate));
    }

    if sample_rate == target_rate {
        return Ok(Resampled {
            samples: samples.to_vec(),
            sample_rate: target_rate,
            bit_depth: OUTPUT_BIT_DEPTH,
        });
    }

    let g = gcd(target_rate as u64, sample_rate as u64);
    let p = target_rate as u64 / g;
    let q = sample_rate as u64 / g;
    let out_len =
        (samples.len() as f64 * target_rate as f64 / sample_rate as f64).round() as usize;

    Ok(Resampled {
        samples: resample_polyphase(samples, p, q, out_len),
        sample_rate: target_rate,
        bit_depth: OUTPUT_BIT_DEPTH,
    })
}
