//! tabload CLI entrypoint.

use anyhow::{Result, bail};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use tabload_cli::logging::{LogConfig, LogFormat, init_logging};
use tabload_cli::pipeline::{self, PipelineOptions};
use tabload_cli::summary::print_summary;
use tabload_ingest::ReadOptions;
use tabload_load::LoadMode;

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg, ModeArg};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let options = pipeline_options_from_cli(&cli)?;
    let summary = pipeline::run(&options).await?;
    print_summary(&summary);
    Ok(())
}

/// Translate CLI arguments into pipeline options.
fn pipeline_options_from_cli(cli: &Cli) -> Result<PipelineOptions> {
    let separator = parse_separator(&cli.separator)?;

    let read = ReadOptions {
        separator,
        encoding: cli.encoding.clone(),
        ..ReadOptions::default()
    };

    let table = cli.table.clone().unwrap_or_else(default_table_name);

    Ok(PipelineOptions {
        files: cli.files.clone(),
        dirs: cli.dirs.clone(),
        read,
        database_url: cli.database_url.clone(),
        table,
        mode: match cli.mode {
            ModeArg::Fail => LoadMode::Fail,
            ModeArg::Replace => LoadMode::Replace,
            ModeArg::Append => LoadMode::Append,
        },
        batch_size: cli.batch_size,
        dry_run: cli.dry_run,
    })
}

/// A separator must be a single ASCII character; `\t` is accepted for tabs.
fn parse_separator(raw: &str) -> Result<u8> {
    if raw == "\\t" {
        return Ok(b'\t');
    }
    let bytes = raw.as_bytes();
    if bytes.len() != 1 {
        bail!("--separator must be a single ASCII character, got '{raw}'");
    }
    Ok(bytes[0])
}

/// Timestamped default destination table name.
fn default_table_name() -> String {
    format!(
        "tabload_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
