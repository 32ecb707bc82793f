//! Student records console entry point.
//!
//! # Responsibility
//! - Parse command-line/environment settings into a `StoreConfig`.
//! - Start optional file logging and run the interactive menu on stdio.

mod menu;
mod table;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use menu::Menu;
use std::io;
use std::path::PathBuf;
use student_records_core::{
    core_version, default_log_level, init_from_config, StoreConfig, DEFAULT_DATA_FILE,
};

/// Menu-driven student record manager
#[derive(Parser, Debug)]
#[command(name = "student-records")]
#[command(about = "Register, list, find, modify and remove student records")]
#[command(version)]
struct Args {
    /// CSV file holding the student records
    #[arg(short, long, env = "STUDENT_RECORDS_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "STUDENT_RECORDS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "STUDENT_RECORDS_LOG_LEVEL", default_value = default_log_level())]
    log_level: String,
}

impl Args {
    fn into_config(self) -> StoreConfig {
        let builder = StoreConfig::builder()
            .data_file(self.data_file)
            .log_level(self.log_level);
        match self.log_dir {
            Some(dir) => builder.log_dir(dir).build(),
            None => builder.build(),
        }
    }
}

fn main() -> Result<()> {
    let config = Args::parse().into_config();

    init_from_config(&config).map_err(|err| anyhow!("failed to start logging: {err}"))?;
    info!(
        "event=cli_start module=cli status=ok core_version={} data_file={}",
        core_version(),
        config.data_file.display()
    );

    let service = config.open_service();
    Menu::new(&service, io::stdin().lock(), io::stdout().lock())
        .run()
        .context("console I/O failed")?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_map_onto_store_config() {
        let config = Args::try_parse_from([
            "student-records",
            "--data-file",
            "/tmp/roster.csv",
            "--log-dir",
            "/tmp/logs",
            "--log-level",
            "warn",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.data_file, PathBuf::from("/tmp/roster.csv"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn arguments_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
