//! Discrete Fourier transform over arbitrary-length buffers.
//!
//! The transform length N is **not** restricted to powers of two: `rustfft`
//! selects a mixed-radix decomposition, falling back to Bluestein's algorithm
//! for prime sizes, so `forward`/`inverse` are exact inverses (to f32
//! tolerance) for every N ≥ 1.
//!
//! Conventions:
//! - [`Dft::forward`] treats its input as real-valued and returns the full
//!   N-bin complex spectrum (bin k is the k-th frequency bin; bins above N/2
//!   mirror the conjugate-symmetric half).
//! - [`Dft::inverse`] normalizes by 1/N and returns the real part, so
//!   `inverse(forward(x)) == x` within numerical tolerance.

use crate::error::{Error, Result};
use rustfft::num_complex::Complex;
use rustfft::{Fft as RustFft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window function types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular (no windowing).
    Rectangular,
    /// Hann window (raised cosine).
    Hann,
    /// Hamming window.
    Hamming,
    /// Blackman window.
    Blackman,
}

impl Window {
    /// Apply the window to a buffer in place.
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        if n < 2 {
            return;
        }
        let m = (n - 1) as f32;
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    *sample *= 0.5 * (1.0 - (2.0 * PI * i as f32 / m).cos());
                }
            }
            Window::Hamming => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    *sample *= 0.54 - 0.46 * (2.0 * PI * i as f32 / m).cos();
                }
            }
            Window::Blackman => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let phase = 2.0 * PI * i as f32 / m;
                    *sample *= 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos();
                }
            }
        }
    }

    /// Get the window coefficients for a given size.
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Complex spectrum split into real and imaginary parts.
///
/// Invariant: `real.len() == imag.len()`. Both sequences have the length N of
/// the transform that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Real part, one value per frequency bin.
    pub real: Vec<f32>,
    /// Imaginary part, one value per frequency bin.
    pub imag: Vec<f32>,
}

impl Spectrum {
    /// Number of frequency bins (the transform length N).
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Whether the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Magnitude per bin: `sqrt(re² + im²)`.
    pub fn magnitude(&self) -> Vec<f32> {
        self.real
            .iter()
            .zip(self.imag.iter())
            .map(|(&re, &im)| (re * re + im * im).sqrt())
            .collect()
    }

    /// Magnitude per bin in dB, floored at -200 dB.
    pub fn magnitude_db(&self) -> Vec<f32> {
        self.magnitude()
            .iter()
            .map(|&m| 20.0 * m.max(1e-10).log10())
            .collect()
    }
}

/// DFT processor with cached forward and inverse plans for one size.
///
/// Planning is the expensive part of `rustfft`; callers that transform many
/// buffers of the same length should reuse one `Dft`. Each instance owns its
/// plans and scratch state, so independent instances may run concurrently.
pub struct Dft {
    forward: Arc<dyn RustFft<f32>>,
    inverse: Arc<dyn RustFft<f32>>,
    size: usize,
}

impl Dft {
    /// Create a DFT processor for transforms of length `size`.
    ///
    /// `size` may be any value ≥ 1, including primes and other
    /// non-powers-of-two.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        Self {
            forward,
            inverse,
            size,
        }
    }

    /// Transform length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform of a real-valued buffer.
    ///
    /// The input is padded or truncated to the plan size; the imaginary part
    /// is initialized to zero. Returns the full N-bin spectrum.
    pub fn forward(&self, input: &[f32]) -> Spectrum {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.forward.process(&mut buffer);

        let real = buffer.iter().map(|c| c.re).collect();
        let imag = buffer.iter().map(|c| c.im).collect();
        Spectrum { real, imag }
    }

    /// Forward transform of a complex buffer, in place.
    pub fn forward_complex(&self, buffer: &mut [Complex<f32>]) {
        self.forward.process(buffer);
    }

    /// Inverse transform, returning the real part normalized by 1/N.
    pub fn inverse(&self, spectrum: &Spectrum) -> Vec<f32> {
        let mut buffer: Vec<Complex<f32>> = spectrum
            .real
            .iter()
            .zip(spectrum.imag.iter())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.inverse.process(&mut buffer);

        let scale = 1.0 / self.size as f32;
        buffer.iter().map(|c| c.re * scale).collect()
    }
}

/// One-shot forward DFT of a real-valued buffer.
///
/// Plans a transform for `samples.len()` and runs it once. Fails with
/// [`Error::EmptyInput`] for a zero-length buffer.
pub fn fft(samples: &[f32]) -> Result<Spectrum> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(Dft::new(samples.len()).forward(samples))
}

/// One-shot inverse DFT.
///
/// Fails with [`Error::EmptyInput`] for a zero-bin spectrum and
/// [`Error::LengthMismatch`] when the real and imaginary parts differ in
/// length.
pub fn ifft(spectrum: &Spectrum) -> Result<Vec<f32>> {
    if spectrum.real.len() != spectrum.imag.len() {
        return Err(Error::LengthMismatch {
            real: spectrum.real.len(),
            imag: spectrum.imag.len(),
        });
    }
    if spectrum.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(Dft::new(spectrum.len()).inverse(spectrum))
}
