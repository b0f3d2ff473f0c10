//! CLI subcommand implementations.

pub mod ampfreq;
pub mod info;
pub mod mfcc;
pub mod pitch;
pub mod resample;
pub mod spectrum;
