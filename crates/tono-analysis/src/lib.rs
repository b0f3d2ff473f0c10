//! Tono Analysis - spectral, pitch and resampling analysis for audio buffers.
//!
//! Every function here is a pure, synchronous computation over a mono sample
//! buffer: no I/O, no shared state, no caches. Results are freshly allocated
//! per call, so any number of analyses may run concurrently on independent
//! inputs without coordination. Decoding audio containers into sample
//! buffers is the job of `tono-io`.
//!
//! - [`dft`] - forward/inverse discrete Fourier transform for arbitrary N
//! - [`pitch`] - autocorrelation, YIN and MPM fundamental-frequency estimators
//! - [`resample`] - polyphase windowed-sinc sample-rate conversion
//! - [`mfcc`] - mel-frequency cepstral coefficient extraction
//! - [`ampfreq`] - per-frame amplitude and dominant-frequency tracking
//!
//! ## Example
//!
//! ```rust
//! use tono_analysis::{Algorithm, detect_pitch};
//!
//! let sample_rate = 16000;
//! let signal: Vec<f32> = (0..16000)
//!     .map(|i| (2.0 * std::f32::consts::PI * 220.0 * i as f32 / sample_rate as f32).sin())
//!     .collect();
//!
//! let estimate = detect_pitch(&signal, sample_rate, Algorithm::Yin)?;
//! assert!(estimate.is_voiced());
//! # Ok::<(), tono_analysis::Error>(())
//! ```

pub mod ampfreq;
pub mod dft;
pub mod error;
pub mod mfcc;
pub mod pitch;
pub mod resample;

// Re-export main types
pub use ampfreq::{AmpFreqPoint, ampfreq};
pub use dft::{Dft, Spectrum, Window, fft, ifft};
pub use error::{Error, Result};
pub use mfcc::{MfccConfig, mfcc};
pub use pitch::{
    Algorithm, PitchEstimate, detect_pitch, pitch_autocorrelation, pitch_mpm, pitch_yin,
};
pub use resample::{Resampled, resample};
