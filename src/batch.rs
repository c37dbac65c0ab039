//! Batch driver: applies the per-file pipeline across a directory.
//!
//! The driver validates both directories eagerly, before any file is touched,
//! so a bad invocation does no partial work. Jobs then run sequentially in
//! scanner order; whether a failing job aborts the batch or is collected into
//! the report is decided by [`FailureMode`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::opts::{BatchOpts, FailureMode};
use crate::pipeline::{ConversionJob, ConversionResult, convert_file};
use crate::scan::list_dss_files;

/// Summary of one batch run, serializable for machine-readable reports.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Number of `.dss` files the scanner found.
    pub found: usize,
    /// Jobs that completed, in the order they ran.
    pub converted: Vec<ConversionResult>,
    /// Jobs that failed, only ever non-empty with [`FailureMode::Continue`].
    pub failed: Vec<FailedJob>,
    /// The resolved output directory.
    pub output_dir: PathBuf,
}

/// A failed job as it appears in the report.
#[derive(Debug, Serialize)]
pub struct FailedJob {
    pub input: PathBuf,
    pub error: String,
}

/// Converts every `.dss` file in an input directory.
///
/// Construct once with [`BatchOpts`], then call [`run`](Self::run) per batch.
/// Each job exclusively owns its container, encoder and output handle, so
/// nothing is shared between jobs.
pub struct BatchConverter {
    opts: BatchOpts,
}

impl BatchConverter {
    pub fn new(opts: BatchOpts) -> Self {
        Self { opts }
    }

    /// Convert every `.dss` file in `input_dir` into `output_dir`.
    ///
    /// Steps, in order:
    /// 1. Resolve `input_dir`; fail with [`Error::InputFolderNotExist`] if it
    ///    is missing or not a directory.
    /// 2. Create `output_dir` (and parents) if absent.
    /// 3. Scan for `.dss` files; fail with [`Error::DssFilesNotFound`] if none.
    /// 4. Convert each file, naming the output `<stem>.<target extension>`
    ///    directly under `output_dir` (no subdirectory mirroring).
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<Report> {
        let input_dir = fs::canonicalize(input_dir).map_err(|_| Error::InputFolderNotExist {
            path: input_dir.to_path_buf(),
        })?;
        if !input_dir.is_dir() {
            return Err(Error::InputFolderNotExist { path: input_dir });
        }

        fs::create_dir_all(output_dir)?;
        let output_dir = fs::canonicalize(output_dir)?;

        let files = list_dss_files(&input_dir, self.opts.recurse)?;
        if files.is_empty() {
            return Err(Error::DssFilesNotFound { path: input_dir });
        }

        info!(
            "found {} files with .dss format in {}",
            files.len(),
            input_dir.display()
        );

        let extension = self.opts.encoding.extension().to_string();
        let mut report = Report {
            found: files.len(),
            converted: Vec::new(),
            failed: Vec::new(),
            output_dir: output_dir.clone(),
        };

        for input in files {
            let stem = input.file_stem().unwrap_or(input.as_os_str());
            let output = output_dir.join(format!("{}.{extension}", stem.to_string_lossy()));

            debug!("converting {} to {}", input.display(), output.display());

            let job = ConversionJob {
                input: input.clone(),
                output: output.clone(),
                encoding: self.opts.encoding.clone(),
            };

            match convert_file(&job) {
                Ok(result) => {
                    debug!("converted file saved to {}", output.display());
                    report.converted.push(result);
                }
                Err(e) if self.opts.on_error == FailureMode::Abort => return Err(e),
                Err(e) => {
                    warn!("skipping {}: {e}", input.display());
                    report.failed.push(FailedJob {
                        input,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!("done, output saved to {}", output_dir.display());
        Ok(report)
    }
}
