//! `dssify` — batch conversion of DSS dictation recordings into MP3 or any
//! ffmpeg-supported audio format.
//!
//! This crate provides:
//! - Container demuxing and audio-stream decoding (Symphonia)
//! - PCM normalization to interleaved signed 16-bit at the source rate
//! - A streaming CBR MP3 encoder (LAME) and an opaque ffmpeg exporter
//! - A per-file conversion pipeline and a directory batch driver
//!
//! The library is designed to be used by both CLI tools and batch jobs, with
//! an emphasis on predictable failure behavior: directory problems surface
//! before any file is touched, and a failing file either aborts the batch or
//! is collected into the report, depending on configuration.

// High-level API (most consumers should start here).
pub mod batch;
pub mod opts;

// Per-file conversion pipeline.
pub mod pipeline;

// Container demuxing and codec decoding.
pub mod decode;
pub mod demux;

// PCM normalization.
pub mod resample;

// Encoding strategies: streaming MP3 and the whole-file ffmpeg exporter.
pub mod encoder;
pub mod export;
pub mod mp3;

// Input discovery.
pub mod scan;

// Crate-wide error type.
pub mod error;

// Logging configuration for the CLI binaries.
#[cfg(feature = "logging")]
pub mod logging;
