use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use tracing::info as log_info;

/// Handle the `init` command
///
/// Writes the default configuration file (unless `--test` is given) and
/// reports where it lives.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = Config::resolve_path(cli.config.as_deref());
    let cfg = Config::init_file(&path, cli.test)?;
    log_info!(path = %path.display(), test = cli.test, "configuration initialized");

    info("Initializing tapfeed…");
    if cli.test {
        info(format!("Test mode: {} left untouched", path.display()));
    } else {
        success(format!("Config file : {}", path.display()));
    }
    info(format!(
        "Lecture     : {} - {}",
        cfg.lecture_start, cfg.lecture_end
    ));
    info(format!("Interval    : {}s", cfg.interval_secs));
    success("tapfeed initialization completed!");
    Ok(())
}
