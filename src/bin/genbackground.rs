use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mixlink_assets::background::{generate_background, DmgLayout};
use mixlink_assets::config::read_style;
use mixlink_assets::logger::{self, log_error};

/// Generate the DMG installer background: app on top, arrow, Applications below.
#[derive(Debug, Parser)]
#[command(version, about, allow_negative_numbers = true)]
struct Args {
    /// Output PNG path
    output: PathBuf,
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
    app_x: i32,
    app_y: i32,
    apps_x: i32,
    apps_y: i32,
    win_width: i32,
    win_height: i32,
    /// Style overrides as `key = value` lines
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    let style = match read_style(args.config.as_deref()) {
        Ok(style) => style,
        Err(e) => {
            log_error("Could not read config", &e);
            return ExitCode::FAILURE;
        }
    };
    let layout = DmgLayout {
        width: args.width,
        height: args.height,
        app_x: args.app_x,
        app_y: args.app_y,
        apps_x: args.apps_x,
        apps_y: args.apps_y,
        window_width: args.win_width,
        window_height: args.win_height,
    };

    match generate_background(&args.output, &layout, &style).await {
        Ok(_) => {
            println!("Generated background: {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}: {}", args.output.display(), e);
            ExitCode::FAILURE
        }
    }
}
