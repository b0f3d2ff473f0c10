//! Integration tests for tono-cli.
//!
//! Tests invoke the `tono` binary on synthetic WAV files and check the
//! printed output and produced files.

use std::f32::consts::PI;
use std::path::Path;
use std::process::Command;

use tono_io::{AudioData, read_wav, write_wav};

/// Helper to get the path to the `tono` binary built by cargo.
fn tono_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tono"))
}

/// Write a mono 440 Hz test tone to `path`.
fn write_test_tone(path: &Path, sample_rate: u32, num_samples: usize) {
    let samples: Vec<f32> = (0..num_samples)
        .map(|i| 0.8 * (2.0 * PI * 440.0 * i as f32 / sample_rate as f32).sin())
        .collect();
    let audio = AudioData {
        left: samples.clone(),
        right: samples,
        sample_rate,
        bit_depth: 16,
        channels: 1,
    };
    write_wav(path, &audio).expect("failed to write test tone");
}

#[test]
fn cli_info_reports_format() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    write_test_tone(&wav, 16000, 16000);

    let output = tono_bin().arg("info").arg(&wav).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("16000 Hz"), "got: {stdout}");
    assert!(stdout.contains("16000 frames"), "got: {stdout}");
}

#[test]
fn cli_pitch_all_reports_440() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    write_test_tone(&wav, 16000, 16000);

    let output = tono_bin()
        .arg("pitch")
        .arg(&wav)
        .arg("--all")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["acorr", "yin", "mpm"] {
        let line = stdout
            .lines()
            .find(|l| l.contains(name))
            .unwrap_or_else(|| panic!("no line for {name} in: {stdout}"));
        // All three should land near 440 Hz.
        assert!(line.contains("4"), "suspicious estimate: {line}");
        assert!(!line.contains("unvoiced"), "{name} reported unvoiced");
    }
}

#[test]
fn cli_pitch_rejects_unknown_algorithm() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    write_test_tone(&wav, 16000, 8000);

    let output = tono_bin()
        .arg("pitch")
        .arg(&wav)
        .arg("--algorithm")
        .arg("cepstrum")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cepstrum"), "got: {stderr}");
}

#[test]
fn cli_resample_halves_the_frame_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_test_tone(&input, 16000, 16000);

    let output = tono_bin()
        .arg("resample")
        .arg(&input)
        .arg(&output_path)
        .arg("--rate")
        .arg("8000")
        .output()
        .unwrap();
    assert!(output.status.success());

    let resampled = read_wav(&output_path).unwrap();
    assert_eq!(resampled.sample_rate, 8000);
    assert_eq!(resampled.num_frames(), 8000);
}

#[test]
fn cli_mfcc_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    let csv = dir.path().join("mfcc.csv");
    write_test_tone(&wav, 16000, 16000);

    let output = tono_bin()
        .arg("mfcc")
        .arg(&wav)
        .arg("--coefficients")
        .arg("13")
        .arg("-o")
        .arg(&csv)
        .output()
        .unwrap();
    assert!(output.status.success());

    let content = std::fs::read_to_string(&csv).unwrap();
    let data_lines: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
    // 40 ms frames with 20 ms hop over one second: (16000-640)/320 + 1 = 49.
    assert_eq!(data_lines.len(), 49);
    // frame index + 13 coefficients per row
    assert_eq!(data_lines[0].split(',').count(), 14);
}

#[test]
fn cli_ampfreq_prints_track() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    write_test_tone(&wav, 16000, 8000);

    let output = tono_bin().arg("ampfreq").arg(&wav).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().count() > 5, "got: {stdout}");
}
