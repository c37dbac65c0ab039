//! Per-file conversion pipeline.
//!
//! One [`ConversionJob`] in, one [`ConversionResult`] out. For the streaming
//! MP3 target the flow is demux → decode → s16 interleave → encode → write,
//! frame by frame, with no full-file buffering. For the generic target the
//! whole job is delegated to the ffmpeg exporter.
//!
//! Resource discipline: the container and the output file handle are scoped
//! to this function and dropped on every exit path. On failure, bytes already
//! written stay on disk; there is no rollback of partial output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::decode::{decode_packet_and_then, make_decoder_for_track};
use crate::demux::{next_packet, open_container};
use crate::encoder::{Encoding, StreamingEncoder};
use crate::error::{Error, Result};
use crate::export;
use crate::mp3::Mp3Encoder;
use crate::resample::S16Interleaver;

/// One unit of batch work: where to read, where to write, and how to encode.
/// Immutable once created.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: Encoding,
}

/// Success marker for one finished job. Used for reporting, not retry.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Convert a single file according to its job description.
pub fn convert_file(job: &ConversionJob) -> Result<ConversionResult> {
    match &job.encoding {
        Encoding::StreamingMp3 => convert_streaming_mp3(job)?,
        Encoding::Ffmpeg { format } => export::export(&job.input, &job.output, format)?,
    }

    Ok(ConversionResult {
        input: job.input.clone(),
        output: job.output.clone(),
    })
}

fn convert_streaming_mp3(job: &ConversionJob) -> Result<()> {
    // Open the container and select its audio stream; both fail fast, before
    // the output file is created.
    let mut container = open_container(&job.input)?;
    let spec = container.spec;

    let mut decoder = make_decoder_for_track(&container.track, &job.input)?;

    // Pinned to the stream's native rate and channel count; only bit-depth
    // and interleaving are normalized.
    let mut interleaver = S16Interleaver::new();
    let mut encoder = Mp3Encoder::new(&job.input, spec.rate, spec.channel_count())?;

    // Direct write, overwriting any existing file. No temp-file + rename.
    let file = File::create(&job.output).map_err(|source| Error::OutputWrite {
        path: job.output.clone(),
        source,
    })?;
    let mut sink = BufWriter::new(file);

    let track_id = container.track.id;
    while let Some(packet) = next_packet(&mut container.format, &job.input)? {
        if packet.track_id() != track_id {
            continue;
        }

        decode_packet_and_then(&mut decoder, &packet, &job.input, |decoded| {
            let pcm = interleaver.push(&decoded);
            let chunk = encoder.encode(pcm)?;
            if !chunk.is_empty() {
                write_chunk(&mut sink, &chunk, &job.output)?;
            }
            Ok(())
        })?;
    }

    // Mandatory final flush; LAME holds trailing frames until here.
    let tail = encoder.flush()?;
    if !tail.is_empty() {
        write_chunk(&mut sink, &tail, &job.output)?;
    }

    sink.flush().map_err(|source| Error::OutputWrite {
        path: job.output.clone(),
        source,
    })?;

    Ok(())
}

fn write_chunk(sink: &mut BufWriter<File>, chunk: &[u8], output: &std::path::Path) -> Result<()> {
    sink.write_all(chunk).map_err(|source| Error::OutputWrite {
        path: output.to_path_buf(),
        source,
    })
}
