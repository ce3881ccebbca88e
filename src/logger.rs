use env_logger::Env;

/// Install the stderr logger. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_target(false)
        .try_init();
}

pub fn log_line(line: &str) {
    log::info!("{}", line);
}

pub fn log_error(prefix: &str, e: &dyn std::error::Error) {
    log::warn!("{}: {}", prefix, e);
}

pub fn log_command(program: &str, args: &[String]) {
    let joined = args.join(" ");
    log::debug!("RUN: {} {}", program, joined);
}
