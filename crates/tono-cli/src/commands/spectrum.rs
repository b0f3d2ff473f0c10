//! Magnitude spectrum of a centered chunk of a recording.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tono_analysis::{Dft, Window};
use tono_io::read_wav;

/// Compute the magnitude spectrum of a recording.
#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file
    pub file: PathBuf,

    /// Transform size (any length, not just powers of two)
    #[arg(long, default_value = "4096")]
    pub size: usize,

    /// Window function: hann, hamming, blackman or rect
    #[arg(long, default_value = "hann")]
    pub window: String,

    /// Show the top N peaks
    #[arg(long, default_value = "10")]
    pub peaks: usize,

    /// Write the full spectrum to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the spectrum command.
pub fn run(args: SpectrumArgs) -> anyhow::Result<()> {
    let audio = read_wav(&args.file)?;
    let sample_rate = audio.sample_rate as f32;

    let window = match args.window.to_lowercase().as_str() {
        "hamming" => Window::Hamming,
        "blackman" => Window::Blackman,
        "hann" => Window::Hann,
        "rectangular" | "rect" | "none" => Window::Rectangular,
        other => anyhow::bail!("unknown window '{other}'"),
    };

    // Take a chunk from the middle of the file, zero-padded if short.
    let start = audio.left.len().saturating_sub(args.size) / 2;
    let mut chunk: Vec<f32> = audio
        .left
        .iter()
        .skip(start)
        .take(args.size)
        .copied()
        .collect();
    chunk.resize(args.size, 0.0);
    window.apply(&mut chunk);

    let dft = Dft::new(args.size);
    let db = dft.forward(&chunk).magnitude_db();
    let half = &db[..args.size / 2 + 1];
    let bin_hz = sample_rate / args.size as f32;

    if let Some(path) = &args.output {
        let mut file = std::fs::File::create(path)?;
        writeln!(file, "# frequency_hz, magnitude_db")?;
        for (k, &mag) in half.iter().enumerate() {
            writeln!(file, "{:.2},{:.3}", k as f32 * bin_hz, mag)?;
        }
        println!("Wrote {} bins to {}", half.len(), path.display());
        return Ok(());
    }

    // Local maxima, strongest first.
    let mut peaks: Vec<(usize, f32)> = (1..half.len() - 1)
        .filter(|&k| half[k] > half[k - 1] && half[k] >= half[k + 1])
        .map(|k| (k, half[k]))
        .collect();
    peaks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    println!("Top peaks of {}:", args.file.display());
    for (k, mag) in peaks.into_iter().take(args.peaks) {
        println!("  {:>9.1} Hz  {:>7.2} dB", k as f32 * bin_hz, mag);
    }

    Ok(())
}
