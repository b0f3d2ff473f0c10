//! Whole-file pitch estimation.

use clap::Args;
use std::path::PathBuf;
use tono_analysis::{Algorithm, detect_pitch};
use tono_io::read_wav;

/// Estimate the fundamental frequency of a recording.
#[derive(Args)]
pub struct PitchArgs {
    /// Input WAV file
    pub file: PathBuf,

    /// Detection algorithm: acorr, yin or mpm
    #[arg(short, long, default_value = "yin")]
    pub algorithm: String,

    /// Run all three algorithms and print one line each
    #[arg(long)]
    pub all: bool,
}

/// Run the pitch command.
pub fn run(args: PitchArgs) -> anyhow::Result<()> {
    let audio = read_wav(&args.file)?;

    let algorithms: Vec<Algorithm> = if args.all {
        vec![Algorithm::Autocorrelation, Algorithm::Yin, Algorithm::Mpm]
    } else {
        vec![args.algorithm.parse()?]
    };

    for algorithm in algorithms {
        let estimate = detect_pitch(&audio.left, audio.sample_rate, algorithm)?;
        println!("{:5}: {estimate}", algorithm.name());
    }

    Ok(())
}
