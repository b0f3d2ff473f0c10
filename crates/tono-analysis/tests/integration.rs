//! Integration tests for tono-analysis.
//!
//! Exercises the public API end to end with synthetic signals of known
//! properties: transform round trips for awkward lengths, cross-algorithm
//! pitch agreement, resampling length/content contracts, MFCC framing and
//! the amplitude/frequency track.

use std::f32::consts::PI;

use tono_analysis::{
    Algorithm, Error, MfccConfig, ampfreq, detect_pitch, fft, ifft, mfcc, resample,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sine(freq_hz: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Single-frequency DFT magnitude normalized by length.
fn tone_level(signal: &[f32], freq_hz: f32, sample_rate: f32) -> f32 {
    let mut re = 0.0f32;
    let mut im = 0.0f32;
    for (i, &s) in signal.iter().enumerate() {
        let phase = 2.0 * PI * freq_hz * i as f32 / sample_rate;
        re += s * phase.cos();
        im += s * phase.sin();
    }
    (re * re + im * im).sqrt() / signal.len() as f32
}

// ===========================================================================
// 1. Transform round trips
// ===========================================================================

#[test]
fn roundtrip_reconstructs_for_awkward_lengths() {
    for n in [1usize, 2, 17, 20, 97, 256, 1000] {
        let input: Vec<f32> = (0..n).map(|i| ((i * 7 + 3) as f32 * 0.31).sin()).collect();
        let spectrum = fft(&input).unwrap();
        assert_eq!(spectrum.real.len(), n);
        assert_eq!(spectrum.imag.len(), n);

        let reconstructed = ifft(&spectrum).unwrap();
        assert_eq!(reconstructed.len(), n);
        for (i, (a, b)) in input.iter().zip(reconstructed.iter()).enumerate() {
            assert!(
                (a - b).abs() < 1e-4 * a.abs().max(1.0),
                "N={n}, sample {i}: {a} vs {b}"
            );
        }
    }
}

#[test]
fn ramp_roundtrip_matches_reference_harness() {
    // The reference harness feeds a 20-sample ramp 0..19 through fft/ifft.
    let input: Vec<f32> = (0..20).map(|i| i as f32).collect();
    let back = ifft(&fft(&input).unwrap()).unwrap();
    for (a, b) in input.iter().zip(back.iter()) {
        assert!((a - b).abs() < 1e-3, "{a} vs {b}");
    }
}

// ===========================================================================
// 2. Pitch estimation
// ===========================================================================

#[test]
fn all_algorithms_agree_on_220_hz() {
    // 50 ms window at 16 kHz, per-window estimators.
    let signal = sine(220.0, 16000, 800);
    for algorithm in [Algorithm::Autocorrelation, Algorithm::Yin, Algorithm::Mpm] {
        let hz = algorithm
            .estimate(&signal, 16000)
            .unwrap()
            .frequency()
            .expect("220 Hz sine must be voiced");
        assert!(
            (hz - 220.0).abs() / 220.0 < 0.02,
            "{algorithm}: got {hz} Hz"
        );
    }
}

#[test]
fn whole_buffer_detection_agrees_across_algorithms() {
    let signal = sine(330.0, 16000, 16000);
    let mut estimates = Vec::new();
    for algorithm in [Algorithm::Autocorrelation, Algorithm::Yin, Algorithm::Mpm] {
        let hz = detect_pitch(&signal, 16000, algorithm)
            .unwrap()
            .frequency()
            .expect("330 Hz sine must be voiced");
        assert!((hz - 330.0).abs() / 330.0 < 0.02, "{algorithm}: {hz} Hz");
        estimates.push(hz);
    }
    // Cross-algorithm agreement within a few percent of each other.
    let spread = estimates.iter().fold(f32::MIN, |a, &b| a.max(b))
        - estimates.iter().fold(f32::MAX, |a, &b| a.min(b));
    assert!(spread / 330.0 < 0.04, "spread {spread} Hz");
}

#[test]
fn silence_never_yields_a_frequency() {
    for len in [1usize, 100, 800, 16000] {
        let silence = vec![0.0f32; len];
        for algorithm in [Algorithm::Autocorrelation, Algorithm::Yin, Algorithm::Mpm] {
            let estimate = detect_pitch(&silence, 16000, algorithm).unwrap();
            assert!(!estimate.is_voiced(), "{algorithm} on {len} zero samples");
        }
    }
}

#[test]
fn algorithm_is_selected_by_name() {
    let signal = sine(220.0, 16000, 16000);
    for name in ["acorr", "yin", "mpm"] {
        let algorithm: Algorithm = name.parse().unwrap();
        assert!(
            detect_pitch(&signal, 16000, algorithm).unwrap().is_voiced(),
            "{name}"
        );
    }
    assert!(matches!(
        "dtw".parse::<Algorithm>(),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}

// ===========================================================================
// 3. Resampling
// ===========================================================================

#[test]
fn resample_16k_to_8k_length_and_content() {
    let signal = sine(440.0, 16000, 16000);
    let down = resample(&signal, 16000, 8000).unwrap();
    assert_eq!(down.samples.len(), 8000);
    assert_eq!(down.sample_rate, 8000);

    // Low-frequency content must survive the round trip back to 16 kHz.
    let back = resample(&down.samples, 8000, 16000).unwrap();
    assert_eq!(back.samples.len(), 16000);
    let level = tone_level(&back.samples[800..15200], 440.0, 16000.0);
    assert!(level > 0.3, "440 Hz tone lost in round trip, level={level}");
}

#[test]
fn resample_validates_rates() {
    assert!(matches!(
        resample(&[0.0; 16], 16000, 0),
        Err(Error::InvalidSampleRate(0))
    ));
    assert!(matches!(
        resample(&[0.0; 16], 0, 8000),
        Err(Error::InvalidSampleRate(0))
    ));
}

// ===========================================================================
// 4. MFCC
// ===========================================================================

#[test]
fn mfcc_shape_for_one_second_at_16k() {
    let signal = sine(440.0, 16000, 16000);
    let config = MfccConfig {
        num_coefficients: 13,
        low_freq: 0.0,
        high_freq: 8000.0,
        frame_length_ms: 25,
        frame_hop_ms: 10,
        pre_emphasis: 0.97,
    };
    let frames = mfcc(&signal, 16000, &config).unwrap();
    // frame_len = 400, hop = 160: floor((16000 - 400) / 160) + 1 = 98.
    assert_eq!(frames.len(), 98);
    assert!(frames.iter().all(|f| f.len() == 13));
}

#[test]
fn mfcc_rejects_high_freq_above_nyquist() {
    let signal = sine(440.0, 16000, 16000);
    let config = MfccConfig {
        high_freq: 8001.0,
        ..MfccConfig::default()
    };
    assert!(matches!(
        mfcc(&signal, 16000, &config),
        Err(Error::InvalidFrequencyRange { .. })
    ));
}

// ===========================================================================
// 5. Amplitude/frequency track
// ===========================================================================

#[test]
fn ampfreq_tracks_a_tone() {
    let signal = sine(500.0, 16000, 16000);
    let track = ampfreq(&signal, 16000).unwrap();
    assert!(!track.is_empty());

    for pair in track.windows(2) {
        assert!(pair[1].timestamp > pair[0].timestamp);
    }
    for point in &track {
        assert!((point.frequency - 500.0).abs() <= 25.0, "{point:?}");
        assert!(point.amplitude > 0.5);
    }
}

#[test]
fn ampfreq_amplitude_follows_envelope() {
    // First half loud, second half quiet.
    let mut signal = sine(500.0, 16000, 16000);
    for s in &mut signal[8000..] {
        *s *= 0.1;
    }
    let track = ampfreq(&signal, 16000).unwrap();
    let first = &track[0];
    let last = &track[track.len() - 1];
    assert!(first.amplitude > 5.0 * last.amplitude);
}
