//! Encoder strategy selection.
//!
//! Two conversion paths exist and deliberately stay separate:
//! - the streaming MP3 path ([`crate::mp3::Mp3Encoder`]), which consumes PCM
//!   incrementally and writes encoded chunks as they are produced
//! - the opaque ffmpeg path ([`crate::export`]), which hands the whole input
//!   file to an external exporter and offers no mid-file progress
//!
//! [`Encoding`] is the tagged selector between them; callers pick a strategy
//! per job instead of calling two unrelated functions.

use crate::error::Result;

/// Incremental PCM-to-bytes encoder used by the streaming pipeline.
pub trait StreamingEncoder {
    /// Encode a chunk of interleaved s16 PCM.
    ///
    /// May return an empty buffer while the codec accumulates enough samples
    /// for a full frame.
    fn encode(&mut self, pcm: &[i16]) -> Result<Vec<u8>>;

    /// Emit any buffered trailing frames.
    ///
    /// Called exactly once, at end of stream, even if every prior `encode`
    /// returned empty.
    fn flush(&mut self) -> Result<Vec<u8>>;
}

/// The target encoding strategy for a conversion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Constant-bit-rate MP3 through the streaming pipeline.
    StreamingMp3,
    /// Any ffmpeg-supported format, converted as one opaque whole-file run.
    /// The string is the format identifier, e.g. `"wav"` or `"flac"`.
    Ffmpeg { format: String },
}

impl Encoding {
    /// The output file extension for this strategy.
    pub fn extension(&self) -> &str {
        match self {
            Encoding::StreamingMp3 => "mp3",
            Encoding::Ffmpeg { format } => format,
        }
    }
}
