//! WAV decode/encode boundary for the Tono analysis engine.
//!
//! The analysis crate operates purely on sample buffers; this crate is the
//! collaborator that produces and consumes them. It reads WAV containers
//! into per-channel f32 buffers (integer PCM normalized to [-1, 1]) and
//! writes them back out. Compressed codecs (AMR, MP3) are out of scope.
//!
//! ```rust,ignore
//! use tono_io::{read_wav, write_wav};
//!
//! let audio = read_wav("voice.wav")?;
//! println!("{} Hz, {} channels", audio.sample_rate, audio.channels);
//! write_wav("copy.wav", &audio)?;
//! ```

mod wav;

pub use wav::{AudioData, WavInfo, read_wav, wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file contained no audio frames.
    #[error("no audio frames in file")]
    EmptyFile,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
