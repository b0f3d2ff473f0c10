//! Fundamental-frequency estimation.
//!
//! Three independent estimators share one contract: given a mono sample
//! window and its sample rate, return the fundamental frequency of the
//! dominant periodic component, or [`PitchEstimate::Unvoiced`] when no
//! periodicity clears the algorithm's confidence threshold. Silence and
//! noise are expected inputs, so "unvoiced" is a normal value, never an
//! error.
//!
//! - [`pitch_autocorrelation`] — normalized autocorrelation peak picking.
//! - [`pitch_yin`] — cumulative mean normalized difference (de Cheveigné &
//!   Kawahara, "YIN, a fundamental frequency estimator for speech and
//!   music", JASA 2002). Absolute threshold 0.15.
//! - [`pitch_mpm`] — McLeod Pitch Method over the normalized square
//!   difference function (McLeod & Wyvill, "A smarter way to find pitch",
//!   ICMC 2005). Key maxima within 90% of the global maximum.
//!
//! All three search lags corresponding to 50..1000 Hz and refine the chosen
//! lag with parabolic interpolation. [`detect_pitch`] wraps any of them into
//! a whole-buffer estimate by averaging framed results.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Lowest fundamental considered plausible, in Hz. Sets the longest lag.
const MIN_PITCH_HZ: f32 = 50.0;
/// Highest fundamental considered plausible, in Hz. Sets the shortest lag.
const MAX_PITCH_HZ: f32 = 1000.0;
/// Minimum normalized autocorrelation a peak must reach to count as voiced.
const ACORR_MIN_PEAK: f32 = 0.5;
/// YIN absolute threshold on the cumulative mean normalized difference.
const YIN_THRESHOLD: f32 = 0.15;
/// MPM: accept the first key maximum within this fraction of the global max.
const MPM_KEY_MAX_FRACTION: f32 = 0.9;
/// MPM: minimum NSDF clarity for a window to count as voiced.
const MPM_MIN_CLARITY: f32 = 0.3;
/// Energy below which a window is treated as silent.
const SILENCE_ENERGY: f32 = 1e-10;

/// Result of a single pitch estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchEstimate {
    /// A reliable fundamental frequency in Hz.
    Voiced(f32),
    /// No periodicity cleared the confidence threshold.
    Unvoiced,
}

impl PitchEstimate {
    /// The estimated frequency, or `None` when unvoiced.
    pub fn frequency(&self) -> Option<f32> {
        match self {
            PitchEstimate::Voiced(hz) => Some(*hz),
            PitchEstimate::Unvoiced => None,
        }
    }

    /// Whether a reliable periodicity was found.
    pub fn is_voiced(&self) -> bool {
        matches!(self, PitchEstimate::Voiced(_))
    }
}

impl fmt::Display for PitchEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchEstimate::Voiced(hz) => write!(f, "{hz:.2} Hz"),
            PitchEstimate::Unvoiced => write!(f, "unvoiced"),
        }
    }
}

/// Pitch detection algorithm selector.
///
/// Tagged-variant dispatch: each variant maps to one estimator function with
/// the shared `(samples, sample_rate) -> PitchEstimate` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Normalized autocorrelation ("acorr").
    Autocorrelation,
    /// Cumulative mean normalized difference ("yin").
    Yin,
    /// McLeod Pitch Method ("mpm").
    Mpm,
}

impl Algorithm {
    /// Canonical lowercase name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Autocorrelation => "acorr",
            Algorithm::Yin => "yin",
            Algorithm::Mpm => "mpm",
        }
    }

    /// Run this algorithm on a single analysis window.
    pub fn estimate(&self, samples: &[f32], sample_rate: u32) -> Result<PitchEstimate> {
        match self {
            Algorithm::Autocorrelation => pitch_autocorrelation(samples, sample_rate),
            Algorithm::Yin => pitch_yin(samples, sample_rate),
            Algorithm::Mpm => pitch_mpm(samples, sample_rate),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "acorr" => Ok(Algorithm::Autocorrelation),
            "yin" => Ok(Algorithm::Yin),
            "mpm" => Ok(Algorithm::Mpm),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn validate(samples: &[f32], sample_rate: u32) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    Ok(())
}

/// Lag search range `[min_lag, max_lag]` for the plausible pitch band, or
/// `None` when the window is too short to cover it.
fn lag_range(len: usize, sample_rate: u32) -> Option<(usize, usize)> {
    let min_lag = ((sample_rate as f32 / MAX_PITCH_HZ) as usize).max(2);
    let max_lag = ((sample_rate as f32 / MIN_PITCH_HZ).ceil() as usize).min(len.saturating_sub(1));
    (min_lag < max_lag).then_some((min_lag, max_lag))
}

fn energy(samples: &[f32]) -> f32 {
    samples.iter().map(|&x| x * x).sum()
}

/// Refine a peak (or valley) position with parabolic interpolation over the
/// three values around `idx`. Returns the fractional index.
fn parabolic_refine(values: &[f32], idx: usize) -> f32 {
    if idx == 0 || idx + 1 >= values.len() {
        return idx as f32;
    }
    let a = values[idx - 1];
    let b = values[idx];
    let c = values[idx + 1];
    let denom = a - 2.0 * b + c;
    if denom.abs() < 1e-12 {
        return idx as f32;
    }
    idx as f32 + 0.5 * (a - c) / denom
}

/// Estimate pitch via normalized autocorrelation.
///
/// Computes `r[lag] = Σ x[i]·x[i+lag]` normalized by the window energy,
/// skips the descending slope of the zero-lag lobe, and picks the strongest
/// peak in the plausible lag band. Peaks below 0.5 of the zero-lag value are
/// treated as unvoiced.
pub fn pitch_autocorrelation(samples: &[f32], sample_rate: u32) -> Result<PitchEstimate> {
    validate(samples, sample_rate)?;

    let Some((min_lag, max_lag)) = lag_range(samples.len(), sample_rate) else {
        return Ok(PitchEstimate::Unvoiced);
    };
    let r0 = energy(samples);
    if r0 <= SILENCE_ENERGY {
        return Ok(PitchEstimate::Unvoiced);
    }

    let acf: Vec<f32> = (0..=max_lag)
        .map(|lag| {
            let mut sum = 0.0f32;
            for i in 0..samples.len() - lag {
                sum += samples[i] * samples[i + lag];
            }
            sum / r0
        })
        .collect();

    // Skip the initial descending slope so the zero-lag lobe cannot win.
    let mut start = 1;
    while start < max_lag && acf[start + 1] <= acf[start] {
        start += 1;
    }
    let start = start.max(min_lag);

    let mut best_lag = 0;
    let mut best_val = f32::MIN;
    for lag in start..=max_lag {
        if acf[lag] > best_val {
            best_val = acf[lag];
            best_lag = lag;
        }
    }
    if best_lag == 0 || best_val < ACORR_MIN_PEAK {
        return Ok(PitchEstimate::Unvoiced);
    }

    let refined = parabolic_refine(&acf, best_lag);
    Ok(PitchEstimate::Voiced(sample_rate as f32 / refined))
}

/// Estimate pitch with the YIN algorithm.
///
/// Builds the cumulative mean normalized difference function and accepts the
/// first lag that drops below the 0.15 threshold, descending to the local
/// minimum and refining it with parabolic interpolation. When no lag passes
/// the threshold the window is reported unvoiced — the global minimum is
/// deliberately not used as a fallback.
pub fn pitch_yin(samples: &[f32], sample_rate: u32) -> Result<PitchEstimate> {
    validate(samples, sample_rate)?;

    let len = samples.len();
    let Some((min_lag, band_max)) = lag_range(len, sample_rate) else {
        return Ok(PitchEstimate::Unvoiced);
    };
    // Every lag compares the same number of sample pairs.
    let tau_max = band_max.min(len / 2);
    if tau_max <= min_lag {
        return Ok(PitchEstimate::Unvoiced);
    }
    if energy(samples) <= SILENCE_ENERGY {
        return Ok(PitchEstimate::Unvoiced);
    }
    let window = len - tau_max;

    let mut diff = vec![0.0f32; tau_max + 1];
    for (tau, d) in diff.iter_mut().enumerate().skip(1) {
        let mut sum = 0.0f32;
        for i in 0..window {
            let delta = samples[i] - samples[i + tau];
            sum += delta * delta;
        }
        *d = sum;
    }

    // Cumulative mean normalized difference: cmnd[0] = 1 by definition.
    let mut cmnd = vec![1.0f32; tau_max + 1];
    let mut running = 0.0f32;
    for tau in 1..=tau_max {
        running += diff[tau];
        cmnd[tau] = if running > 1e-12 {
            diff[tau] * tau as f32 / running
        } else {
            1.0
        };
    }

    let mut tau = min_lag;
    loop {
        if tau > tau_max {
            return Ok(PitchEstimate::Unvoiced);
        }
        if cmnd[tau] < YIN_THRESHOLD {
            break;
        }
        tau += 1;
    }
    // Walk down to the bottom of this dip before interpolating.
    while tau + 1 <= tau_max && cmnd[tau + 1] < cmnd[tau] {
        tau += 1;
    }

    let refined = parabolic_refine(&cmnd, tau);
    Ok(PitchEstimate::Voiced(sample_rate as f32 / refined))
}

/// Estimate pitch with the McLeod Pitch Method.
///
/// Computes the normalized square difference function
/// `nsdf[τ] = 2·r[τ] / (m[τ])`, collects one key maximum per positive region
/// after the first negative-going zero crossing, and accepts the first key
/// maximum within 90% of the global maximum. NSDF clarity below 0.3 is
/// reported unvoiced.
pub fn pitch_mpm(samples: &[f32], sample_rate: u32) -> Result<PitchEstimate> {
    validate(samples, sample_rate)?;

    let len = samples.len();
    let Some((min_lag, max_lag)) = lag_range(len, sample_rate) else {
        return Ok(PitchEstimate::Unvoiced);
    };
    if energy(samples) <= SILENCE_ENERGY {
        return Ok(PitchEstimate::Unvoiced);
    }

    let mut nsdf = vec![0.0f32; max_lag + 1];
    for (tau, out) in nsdf.iter_mut().enumerate() {
        let mut r = 0.0f32;
        let mut m = 0.0f32;
        for i in 0..len - tau {
            r += samples[i] * samples[i + tau];
            m += samples[i] * samples[i] + samples[i + tau] * samples[i + tau];
        }
        *out = if m > 1e-12 { 2.0 * r / m } else { 0.0 };
    }

    // First negative-going zero crossing ends the zero-lag lobe.
    let mut tau = 1;
    while tau <= max_lag && nsdf[tau] > 0.0 {
        tau += 1;
    }

    // One key maximum per positive region.
    let mut key_maxima: Vec<(usize, f32)> = Vec::new();
    let mut peak: Option<(usize, f32)> = None;
    while tau <= max_lag {
        if nsdf[tau] > 0.0 {
            match peak {
                Some((_, val)) if nsdf[tau] <= val => {}
                _ => peak = Some((tau, nsdf[tau])),
            }
        } else if let Some(p) = peak.take() {
            key_maxima.push(p);
        }
        tau += 1;
    }
    if let Some(p) = peak {
        key_maxima.push(p);
    }
    key_maxima.retain(|&(lag, _)| lag >= min_lag);
    if key_maxima.is_empty() {
        return Ok(PitchEstimate::Unvoiced);
    }

    let global_max = key_maxima
        .iter()
        .map(|&(_, v)| v)
        .fold(f32::MIN, f32::max);
    let threshold = MPM_KEY_MAX_FRACTION * global_max;
    let &(chosen_lag, clarity) = key_maxima
        .iter()
        .find(|&&(_, v)| v >= threshold)
        .unwrap_or(&key_maxima[0]);

    if clarity < MPM_MIN_CLARITY {
        return Ok(PitchEstimate::Unvoiced);
    }

    let refined = parabolic_refine(&nsdf, chosen_lag);
    Ok(PitchEstimate::Voiced(sample_rate as f32 / refined))
}

/// Whole-buffer pitch estimate.
///
/// Frames the buffer into 40 ms windows with 50% overlap, runs the selected
/// per-window estimator, discards estimates outside the plausible (0, 1000)
/// Hz band, and averages the survivors. A buffer where every frame is
/// unvoiced (silence, noise) yields [`PitchEstimate::Unvoiced`].
pub fn detect_pitch(
    samples: &[f32],
    sample_rate: u32,
    algorithm: Algorithm,
) -> Result<PitchEstimate> {
    validate(samples, sample_rate)?;

    let window = (sample_rate as usize / 25).max(1); // 40 ms per frame
    let hop = (window / 2).max(1); // 20 ms overlap

    let mut sum = 0.0f32;
    let mut count = 0u32;
    if samples.len() <= window {
        if let Some(hz) = algorithm.estimate(samples, sample_rate)?.frequency() {
            sum += hz;
            count += 1;
        }
    } else {
        let mut start = 0;
        while start + window <= samples.len() {
            let frame = &samples[start..start + window];
            if let Some(hz) = algorithm.estimate(frame, sample_rate)?.frequency()
                && hz > 0.0
                && hz < MAX_PITCH_HZ
            {
                sum += hz;
                count += 1;
            }
            start += hop;
        }
    }

    if count == 0 {
        Ok(PitchEstimate::Unvoiced)
    } else {
        Ok(PitchEstimate::Voiced(sum / count as f32))
    }
}
