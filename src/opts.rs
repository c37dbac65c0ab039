use crate::encoder::Encoding;

/// What the batch driver does when one file's conversion fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Stop the batch at the first failing job. Files converted before it
    /// stay on disk; files after it are never attempted.
    #[default]
    Abort,

    /// Record the failure and keep converting the remaining files. Failures
    /// end up in the batch report instead of aborting the run.
    Continue,
}

/// Options that control how a batch conversion is performed.
///
/// One `BatchOpts` describes a whole batch: the target encoding, how the
/// input folder is scanned, and what a failing file does to the rest of the
/// run. The binaries translate their flags into this type; tests and other
/// callers build it directly.
#[derive(Debug, Clone)]
pub struct BatchOpts {
    /// Target encoding strategy for every job in the batch.
    pub encoding: Encoding,

    /// Whether the scanner descends into subdirectories of the input folder.
    pub recurse: bool,

    /// Whether a failing job aborts the batch or is recorded and skipped.
    pub on_error: FailureMode,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            encoding: Encoding::StreamingMp3,
            recurse: false,
            on_error: FailureMode::Abort,
        }
    }
}
