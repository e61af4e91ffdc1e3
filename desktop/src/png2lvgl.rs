use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use log::error;

use crate::convert::Converter;

mod convert;
mod error;
mod walker;

#[derive(FromArgs)]
/// Convert a tree of PNGs to LVGL RGB565 C assets
struct Args {
    /// root directory to scan for PNG files
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// root directory for the generated sources, mirrors the input tree
    #[argh(option, short = 'o')]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let converter = match Converter::new(&args.input, &args.output) {
        Ok(converter) => converter,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(1);
        }
    };

    let summary = converter.run();
    if summary.failed > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
