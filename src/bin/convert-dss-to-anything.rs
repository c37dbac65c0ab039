use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use dssify::batch::BatchConverter;
use dssify::encoder::Encoding;
use dssify::logging;
use dssify::opts::{BatchOpts, FailureMode};

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let opts = BatchOpts {
        encoding: Encoding::Ffmpeg {
            format: params.format,
        },
        recurse: params.recurse,
        on_error: if params.keep_going {
            FailureMode::Continue
        } else {
            FailureMode::Abort
        },
    };

    let report = BatchConverter::new(opts).run(&params.input, &params.output)?;

    if params.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &report)?;
        println!();
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "convert-dss-to-anything")]
#[command(about = "Convert each .dss file in the input folder to another audio format via ffmpeg")]
struct Params {
    /// Folder containing the .dss files to convert.
    input: PathBuf,

    /// Folder to save the converted audio files to.
    output: PathBuf,

    /// Desired output audio format (e.g. 'mp3', 'wav').
    #[arg(long, default_value = "wav")]
    format: String,

    /// Also convert .dss files found in subdirectories of the input folder.
    #[arg(long, default_value_t = false)]
    recurse: bool,

    /// Keep converting remaining files when a file fails, instead of aborting.
    #[arg(long = "keep-going", default_value_t = false)]
    keep_going: bool,

    /// Print a JSON report to stdout when the batch finishes.
    #[arg(long, default_value_t = false)]
    json: bool,
}
