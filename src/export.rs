//! Whole-file conversion through an external `ffmpeg` subprocess.
//!
//! This is the generic counterpart to the streaming MP3 path: the entire
//! conversion is one opaque operation keyed by a target format identifier
//! (e.g. `"wav"`, `"flac"`). There is no mid-file progress and no chunked
//! decode/resample/encode; ffmpeg reads the input file directly and writes
//! the output file itself.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Convert `input` to `output` in the given format.
///
/// Runs `ffmpeg -y -i <input> -vn -f <format> <output>`. Any failure, from
/// spawning the process to a non-zero exit, is wrapped as [`Error::Export`]
/// with both paths and the underlying cause.
pub fn export(input: &Path, output: &Path, format: &str) -> Result<()> {
    let mut cmd = build_command(input, output, format);

    tracing::debug!("running {:?}", cmd);

    let result = cmd.output().map_err(|e| Error::Export {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        message: format!("failed to run ffmpeg: {e}"),
    })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::Export {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            message: format!(
                "ffmpeg exited with {}: {}",
                result.status,
                last_line(&stderr)
            ),
        });
    }

    Ok(())
}

fn build_command(input: &Path, output: &Path, format: &str) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-y") // overwrite existing output, matching the streaming path
        .arg("-i")
        .arg(input)
        .arg("-vn")
        .arg("-f")
        .arg(format)
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    cmd
}

// ffmpeg's stderr is verbose; the last non-empty line carries the actual error.
fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("")
}
