//! Per-frame amplitude/frequency track of a WAV file.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tono_analysis::ampfreq;
use tono_io::read_wav;

/// Compute the per-frame amplitude/frequency track.
#[derive(Args)]
pub struct AmpfreqArgs {
    /// Input WAV file
    pub file: PathBuf,

    /// Write the track to a CSV file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the ampfreq command.
pub fn run(args: AmpfreqArgs) -> anyhow::Result<()> {
    let audio = read_wav(&args.file)?;
    let track = ampfreq(&audio.left, audio.sample_rate)?;

    match args.output {
        Some(path) => {
            let mut file = std::fs::File::create(&path)?;
            writeln!(file, "# time_s, rms, frequency_hz")?;
            for point in &track {
                writeln!(
                    file,
                    "{:.4},{:.6},{:.2}",
                    point.timestamp, point.amplitude, point.frequency
                )?;
            }
            println!("Wrote {} frames to {}", track.len(), path.display());
        }
        None => {
            println!("{:>8}  {:>10}  {:>10}", "time", "rms", "freq");
            for point in &track {
                println!(
                    "{:>7.3}s  {:>10.5}  {:>8.1}Hz",
                    point.timestamp, point.amplitude, point.frequency
                );
            }
        }
    }

    Ok(())
}
