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
        encoding: Encoding::StreamingMp3,
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
#[command(name = "convert-dss-to-mp3")]
#[command(about = "Convert each .dss file in the input folder to CBR MP3")]
struct Params {
    /// Folder containing the .dss files to convert.
    input: PathBuf,

    /// Folder to save the converted .mp3 files to.
    output: PathBuf,

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
