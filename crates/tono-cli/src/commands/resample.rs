//! Sample-rate conversion of WAV files.

use clap::Args;
use std::path::PathBuf;
use tono_analysis::resample;
use tono_io::{AudioData, read_wav, write_wav};

/// Convert a recording to another sample rate.
#[derive(Args)]
pub struct ResampleArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Output WAV file
    pub output: PathBuf,

    /// Target sample rate in Hz
    #[arg(short, long)]
    pub rate: u32,
}

/// Run the resample command.
pub fn run(args: ResampleArgs) -> anyhow::Result<()> {
    let audio = read_wav(&args.input)?;
    println!(
        "Resampling {} from {} Hz to {} Hz...",
        args.input.display(),
        audio.sample_rate,
        args.rate
    );

    let left = resample(&audio.left, audio.sample_rate, args.rate)?;
    let right = if audio.channels > 1 {
        resample(&audio.right, audio.sample_rate, args.rate)?.samples
    } else {
        left.samples.clone()
    };

    let out = AudioData {
        left: left.samples,
        right,
        sample_rate: left.sample_rate,
        bit_depth: left.bit_depth,
        channels: audio.channels,
    };
    write_wav(&args.output, &out)?;

    println!(
        "Wrote {} ({} frames at {} Hz)",
        args.output.display(),
        out.left.len(),
        out.sample_rate
    );
    Ok(())
}
