//! Semantic bridge CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use bridge_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod output;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Session, run_analyze, run_batch, run_core_set, run_doctor, run_generate, run_interventions,
    run_map, run_map_all, run_reverse_bbic, run_search, run_stats, run_summary, run_survey,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs the selected command. `Ok(false)` signals a completed run that should
/// still exit non-zero.
fn run(cli: &Cli) -> Result<bool> {
    if matches!(cli.command, Command::Stats) {
        run_stats(cli.json)?;
        return Ok(true);
    }
    let session = Session::open(cli)?;
    match &cli.command {
        Command::Map(args) => run_map(&session, args)?,
        Command::MapAll { code } => run_map_all(&session, code)?,
        Command::Generate(args) => run_generate(&session, args)?,
        Command::ReverseBbic { dimension } => run_reverse_bbic(&session, dimension)?,
        Command::Interventions(args) => run_interventions(&session, args)?,
        Command::Analyze(args) => run_analyze(&session, args)?,
        Command::Batch(args) => run_batch(&session, args)?,
        Command::Summary(args) => run_summary(&session, args)?,
        Command::Survey(args) => run_survey(&session, args)?,
        Command::CoreSet { condition } => run_core_set(&session, condition.as_deref())?,
        Command::Search(args) => run_search(&session, args)?,
        Command::Doctor => return run_doctor(&session),
        Command::Stats => run_stats(cli.json)?,
    }
    Ok(true)
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
