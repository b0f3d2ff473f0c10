//! MFCC extraction over a WAV file.

use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tono_analysis::{MfccConfig, mfcc};
use tono_io::read_wav;

/// Extract mel-frequency cepstral coefficients.
#[derive(Args)]
pub struct MfccArgs {
    /// Input WAV file
    pub file: PathBuf,

    /// Number of mel filters / cepstral coefficients per frame
    #[arg(short, long, default_value = "40")]
    pub coefficients: usize,

    /// Lower filterbank edge in Hz
    #[arg(long, default_value = "300")]
    pub low: f32,

    /// Upper filterbank edge in Hz
    #[arg(long, default_value = "3500")]
    pub high: f32,

    /// Frame length in milliseconds
    #[arg(long, default_value = "40")]
    pub frame: u32,

    /// Frame hop in milliseconds
    #[arg(long, default_value = "20")]
    pub hop: u32,

    /// Pre-emphasis factor
    #[arg(long, default_value = "0.97")]
    pub pre_emphasis: f32,

    /// Write frames to a CSV file instead of printing a summary
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the mfcc command.
pub fn run(args: MfccArgs) -> anyhow::Result<()> {
    let audio = read_wav(&args.file)?;
    let config = MfccConfig {
        num_coefficients: args.coefficients,
        low_freq: args.low,
        high_freq: args.high,
        frame_length_ms: args.frame,
        frame_hop_ms: args.hop,
        pre_emphasis: args.pre_emphasis,
    };

    let frames = mfcc(&audio.left, audio.sample_rate, &config)?;
    println!(
        "{}: {} frames x {} coefficients",
        args.file.display(),
        frames.len(),
        args.coefficients
    );

    if let Some(path) = args.output {
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "# frame, c0..c{}", args.coefficients.saturating_sub(1))?;
        for (i, frame) in frames.iter().enumerate() {
            write!(file, "{i}")?;
            for value in frame {
                write!(file, ",{value:.6}")?;
            }
            writeln!(file)?;
        }
        println!("Wrote {}", path.display());
    } else if let Some(first) = frames.first() {
        let preview: Vec<String> = first.iter().take(8).map(|v| format!("{v:.2}")).collect();
        println!("frame 0: [{} ...]", preview.join(", "));
    }

    Ok(())
}
