mod config;
mod elements;
mod kml;
mod runner;
mod shutdown;
mod tracker;
mod viewer;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;
use crate::runner::{Runner, RunnerError};

#[derive(Parser)]
#[command(name = "orbit-kml")]
#[command(about = "Live satellite ground track as KML")]
struct Cli {
    /// YAML config file; built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track the satellite until Ctrl+C, then write tour and path (default)
    Track,
    /// Fetch, validate and print the satellite's elements
    Elements,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Track) {
        Commands::Track => track(config).await,
        Commands::Elements => show_elements(&config).await,
    }
}

async fn track(config: Config) -> ExitCode {
    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Unable to listen for Ctrl+C: {}", e);
        }
    };

    match Runner::new(config).run(stop).await {
        Ok(report) => {
            println!("Run completed ({} samples)", report.samples);
            ExitCode::SUCCESS
        }
        Err(RunnerError::Shutdown(report)) => {
            for (step, error) in &report.failures {
                eprintln!("{} failed: {}", step, error);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn show_elements(config: &Config) -> ExitCode {
    let source = config.elements.source();

    let pair = match elements::fetch_elements(&source, &config.satellite.name).await {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match tracker::Sgp4Resolver::new(&pair) {
        Ok(_) => {
            println!("{}", pair.name);
            println!("{}", pair.line1);
            println!("{}", pair.line2);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
