//! Error types for analysis operations.
//!
//! Validation errors are raised before any computation begins; an analysis
//! function never returns a partial result. An undetermined pitch is not an
//! error — see [`crate::pitch::PitchEstimate::Unvoiced`].

use thiserror::Error;

/// Errors raised by analysis operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input buffer contained no samples.
    #[error("input buffer is empty")]
    EmptyInput,

    /// The sample rate was zero or otherwise unusable.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// A filterbank frequency range was inconsistent or exceeded Nyquist.
    #[error("invalid frequency range {low}..{high} Hz (Nyquist is {nyquist} Hz)")]
    InvalidFrequencyRange {
        /// Lower edge of the requested range in Hz.
        low: f32,
        /// Upper edge of the requested range in Hz.
        high: f32,
        /// Nyquist frequency of the input in Hz.
        nyquist: f32,
    },

    /// The pitch detection algorithm name was not recognized.
    #[error("unsupported pitch algorithm: '{0}' (expected acorr, yin or mpm)")]
    UnsupportedAlgorithm(String),

    /// Real and imaginary parts of a spectrum must have equal length.
    #[error("spectrum length mismatch: {real} real vs {imag} imaginary values")]
    LengthMismatch {
        /// Length of the real part.
        real: usize,
        /// Length of the imaginary part.
        imag: usize,
    },
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
