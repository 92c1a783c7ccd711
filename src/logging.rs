use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::path::{Path, PathBuf};

/// Directory holding `runs.log`, under `$HOME`.
const LOG_DIR: &str = ".local/share/policy-check";

/// Path of the run log, if `$HOME` is set.
fn log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(LOG_DIR).join("runs.log"))
}

/// Install the global logger.
///
/// Records at info and above are appended to ~/.local/share/policy-check/runs.log.
/// With `verbose`, debug records are also written to stderr.
/// Best-effort: an unwritable log file just drops that sink.
pub fn init(verbose: bool) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Debug,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(file) = open_log_file() {
        loggers.push(WriteLogger::new(LevelFilter::Info, config, file));
    }

    // Fails only if a logger is already installed.
    let _ = CombinedLogger::init(loggers);
}

fn open_log_file() -> Option<std::fs::File> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
}
