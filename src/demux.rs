// src/demux.rs

//! Container probing and audio-stream selection, built on Symphonia.
//!
//! This module keeps container-level concerns isolated from the rest of the
//! conversion pipeline:
//! - open an input file and probe it as an audio container
//! - select the one audio stream the pipeline transcodes
//! - provide a `next_packet` helper that treats IO errors as end-of-stream
//!
//! An [`OpenedContainer`] is exclusively owned by a single conversion job and
//! is released when dropped, on success and failure alike. Decoding it is not
//! restartable: converting the same file again means opening it again.

use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet, Track};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Error, Result};

/// Immutable description of the selected audio stream.
///
/// Rate and channel count are what the resampler and encoder get pinned to;
/// no rate conversion happens downstream.
#[derive(Debug, Clone, Copy)]
pub struct StreamSpec {
    /// Sample rate in Hz. Always positive.
    pub rate: u32,
    /// Channel layout as reported by the container.
    pub channels: symphonia::core::audio::Channels,
}

impl StreamSpec {
    pub fn channel_count(&self) -> usize {
        self.channels.count()
    }
}

/// An opened input file: format reader plus the selected audio track.
pub struct OpenedContainer {
    pub format: Box<dyn FormatReader>,
    pub track: Track,
    pub spec: StreamSpec,
}

impl std::fmt::Debug for OpenedContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedContainer")
            .field("track_id", &self.track.id)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Open `path` and probe it as an audio container, selecting its audio stream.
///
/// Stream selection policy:
/// - the first track with a decodable codec (codec != NULL)
/// - that reports a sample rate and a non-empty channel layout
///
/// Fails with [`Error::ContainerOpen`] when the file cannot be parsed as a
/// container, and with [`Error::NoAudioStream`] when no track qualifies. Both
/// are hard stops for the job; nothing is decoded on either path.
pub fn open_container(path: &Path) -> Result<OpenedContainer> {
    let file = File::open(path).map_err(|source| Error::ContainerOpen {
        path: path.to_path_buf(),
        source: SymphoniaError::IoError(source),
    })?;

    let mss_opts = MediaSourceStreamOptions {
        // Symphonia expects a power-of-two buffer > 32KiB for good probing behavior.
        buffer_len: 256 * 1024,
    };
    let mss = MediaSourceStream::new(Box::new(file), mss_opts);

    // The real extension is the best probe hint we have; dictation devices
    // write `.dss`/`.DSS`, but the probe still inspects content markers.
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(&ext.to_ascii_lowercase());
    }

    let format_opts: FormatOptions = Default::default();
    let metadata_opts: MetadataOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|source| Error::ContainerOpen {
            path: path.to_path_buf(),
            source,
        })?;

    let format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| {
            t.codec_params.codec != CODEC_TYPE_NULL
                && t.codec_params.sample_rate.is_some()
                && t.codec_params.channels.is_some_and(|c| c.count() > 0)
        })
        .cloned()
        .ok_or_else(|| Error::NoAudioStream {
            path: path.to_path_buf(),
        })?;

    // Both are guaranteed present by the selection filter above.
    let (Some(rate), Some(channels)) = (track.codec_params.sample_rate, track.codec_params.channels)
    else {
        return Err(Error::NoAudioStream {
            path: path.to_path_buf(),
        });
    };
    let spec = StreamSpec { rate, channels };

    Ok(OpenedContainer {
        format,
        track,
        spec,
    })
}

/// Read the next packet, treating IO errors as "end of stream".
///
/// `Ok(None)` means the stream is exhausted; any other error is fatal to the
/// job and surfaces as [`Error::Decode`] with the input path attached.
pub fn next_packet(format: &mut Box<dyn FormatReader>, path: &Path) -> Result<Option<Packet>> {
    match format.next_packet() {
        Ok(p) => Ok(Some(p)),
        Err(SymphoniaError::IoError(_)) => Ok(None),
        Err(source) => Err(Error::Decode {
            path: path.to_path_buf(),
            source,
        }),
    }
}
