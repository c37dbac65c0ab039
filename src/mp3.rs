//! Constant-bit-rate MP3 encoding via LAME.
//!
//! One [`Mp3Encoder`] lives for one conversion job. It is configured once,
//! from the stream's native rate and channel count, and fed interleaved s16
//! PCM incrementally; output chunks come back as LAME fills whole MP3 frames.

use std::path::{Path, PathBuf};

use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};

use crate::encoder::StreamingEncoder;
use crate::error::{Error, Result};

/// Fixed output bit rate.
pub const MP3_BITRATE: Bitrate = Bitrate::Kbps192;

/// Fixed LAME quality level 4 on the 0 (best) to 9 (worst) scale.
pub const MP3_QUALITY: Quality = Quality::Nice;

/// Streaming CBR MP3 encoder for a single input file.
pub struct Mp3Encoder {
    inner: mp3lame_encoder::Encoder,
    channels: u8,
    // Input path, kept for error messages only.
    input: PathBuf,
}

impl std::fmt::Debug for Mp3Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mp3Encoder")
            .field("channels", &self.channels)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

impl Mp3Encoder {
    /// Build a LAME encoder pinned to the stream's rate and channel count.
    ///
    /// LAME encodes mono and stereo; anything wider is rejected here rather
    /// than silently downmixed.
    pub fn new(input: &Path, sample_rate: u32, channels: usize) -> Result<Self> {
        let channels: u8 = match channels {
            1 | 2 => channels as u8,
            n => {
                return Err(encode_error(
                    input,
                    format!("unsupported channel count {n} (LAME encodes 1 or 2)"),
                ));
            }
        };

        let mut builder = Builder::new()
            .ok_or_else(|| encode_error(input, "failed to create LAME encoder".to_string()))?;

        builder
            .set_num_channels(channels)
            .map_err(|e| encode_error(input, format!("set_num_channels: {e}")))?;
        builder
            .set_sample_rate(sample_rate)
            .map_err(|e| encode_error(input, format!("set_sample_rate: {e}")))?;
        builder
            .set_brate(MP3_BITRATE)
            .map_err(|e| encode_error(input, format!("set_brate: {e}")))?;
        builder
            .set_quality(MP3_QUALITY)
            .map_err(|e| encode_error(input, format!("set_quality: {e}")))?;

        let inner = builder
            .build()
            .map_err(|e| encode_error(input, format!("failed to initialize LAME: {e}")))?;

        Ok(Self {
            inner,
            channels,
            input: input.to_path_buf(),
        })
    }
}

impl StreamingEncoder for Mp3Encoder {
    fn encode(&mut self, pcm: &[i16]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.reserve(mp3lame_encoder::max_required_buffer_size(pcm.len()));

        // LAME's interleaved input is strictly two-channel; a mono stream
        // must go through the mono entry point.
        match self.channels {
            1 => self.inner.encode_to_vec(MonoPcm(pcm), &mut out),
            _ => self.inner.encode_to_vec(InterleavedPcm(pcm), &mut out),
        }
        .map_err(|e| encode_error(&self.input, format!("encode: {e}")))?;

        Ok(out)
    }

    fn flush(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        // flush_to_vec writes into spare capacity without allocating; LAME
        // needs headroom for its trailing frames.
        out.reserve(mp3lame_encoder::max_required_buffer_size(0));

        self.inner
            .flush_to_vec::<FlushNoGap>(&mut out)
            .map_err(|e| encode_error(&self.input, format!("flush: {e}")))?;

        Ok(out)
    }
}

fn encode_error(input: &Path, message: String) -> Error {
    Error::Encode {
        path: input.to_path_buf(),
        message,
    }
}
