//! Tono CLI - command-line interface for the Tono audio analysis engine.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tono")]
#[command(author, version, about = "Audio analysis engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display WAV file information
    Info(commands::info::InfoArgs),

    /// Estimate the fundamental frequency of a recording
    Pitch(commands::pitch::PitchArgs),

    /// Extract mel-frequency cepstral coefficients
    Mfcc(commands::mfcc::MfccArgs),

    /// Convert a recording to another sample rate
    Resample(commands::resample::ResampleArgs),

    /// Compute the per-frame amplitude/frequency track
    Ampfreq(commands::ampfreq::AmpfreqArgs),

    /// Compute the magnitude spectrum of a recording
    Spectrum(commands::spectrum::SpectrumArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Pitch(args) => commands::pitch::run(args),
        Commands::Mfcc(args) => commands::mfcc::run(args),
        Commands::Resample(args) => commands::resample::run(args),
        Commands::Ampfreq(args) => commands::ampfreq::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
    }
}
