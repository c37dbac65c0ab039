use std::io;
use std::path::PathBuf;

use symphonia::core::errors::Error as SymphoniaError;
use thiserror::Error;

/// Dssify's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Dssify's crate-wide error type.
///
/// Each variant corresponds to one failure the batch driver or the per-file
/// pipeline can surface. Variants carry the paths involved so a batch-level
/// message always identifies the offending file without extra context plumbing.
#[derive(Debug, Error)]
pub enum Error {
    /// The input folder is missing or is not a directory. Raised before any
    /// file is touched.
    #[error("input folder {} doesn't exist or is not a directory", .path.display())]
    InputFolderNotExist { path: PathBuf },

    /// The input folder exists but contains no `.dss` files.
    #[error("no .dss files in {}", .path.display())]
    DssFilesNotFound { path: PathBuf },

    /// A path handed to the directory scanner is not a directory.
    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// Directory enumeration failed partway through.
    #[error("failed to scan {}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file could not be parsed as an audio container.
    #[error("failed to open {} as an audio container", .path.display())]
    ContainerOpen {
        path: PathBuf,
        #[source]
        source: SymphoniaError,
    },

    /// The container parsed, but holds no decodable audio stream.
    #[error("no audio stream in {}", .path.display())]
    NoAudioStream { path: PathBuf },

    /// Decoding failed on some frame. Fatal to the job; no skip-and-continue.
    #[error("failed to decode audio from {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: SymphoniaError,
    },

    /// The MP3 encoder rejected its configuration or some PCM input.
    #[error("mp3 encoding failed for {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    /// Writing to the output file failed.
    #[error("failed to write {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The whole-file ffmpeg export failed. Carries both endpoints and the
    /// underlying cause, since the subprocess is opaque to the pipeline.
    #[error("failed to convert {} to {}: {message}", .input.display(), .output.display())]
    Export {
        input: PathBuf,
        output: PathBuf,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
