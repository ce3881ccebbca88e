use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mixlink_assets::icon::{write_iconset, ICON_SIZES};
use mixlink_assets::logger;

/// Render the waveform app icon at every macOS icon size.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Target `.appiconset` directory; its parent gets the catalog Contents.json
    #[arg(default_value = "Assets.xcassets/AppIcon.appiconset")]
    output_dir: PathBuf,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    match write_iconset(&args.output_dir, &ICON_SIZES) {
        Ok(written) => {
            println!("{} icons generated in {}", written.len(), args.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}: {}", args.output_dir.display(), e);
            ExitCode::FAILURE
        }
    }
}
