// src/decode.rs

//! Decoder helpers built on top of Symphonia.
//!
//! This module isolates codec-level concerns:
//! - constructing a decoder for the selected audio track
//! - decoding packets into PCM buffers
//!
//! Error handling policy: any decode failure is fatal to the job. A corrupted
//! frame in a dictation recording means the output would be silently missing
//! audio, so there is no skip-and-continue here; the job aborts and remaining
//! frames are never decoded.

use std::path::Path;

use symphonia::core::audio::AudioBufferRef;
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::formats::{Packet, Track};

use crate::error::{Error, Result};

/// Create a decoder for the given audio track, using Symphonia's default
/// codec registry.
///
/// Fails with [`Error::Decode`] if the codec is unsupported or the codec
/// parameters are invalid.
pub fn make_decoder_for_track(track: &Track, path: &Path) -> Result<Box<dyn Decoder>> {
    let decoder_opts: DecoderOptions = Default::default();

    symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode a packet and immediately hand the decoded buffer to a callback.
///
/// The decoded buffer borrows from the decoder, so it is consumed in place
/// rather than returned; one resampling step later it is gone.
pub fn decode_packet_and_then(
    decoder: &mut Box<dyn Decoder>,
    packet: &Packet,
    path: &Path,
    mut on_decoded: impl FnMut(AudioBufferRef<'_>) -> Result<()>,
) -> Result<()> {
    match decoder.decode(packet) {
        Ok(buf) => on_decoded(buf),
        Err(source) => Err(Error::Decode {
            path: path.to_path_buf(),
            source,
        }),
    }
}
