#![warn(clippy::pedantic)]
mod build;
mod config;
mod links;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use crate::build::run_build;
use crate::config::run_check;

#[derive(Parser)]
#[command(name = "linkdeck", about = "Static link-in-bio page generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    /// Build the page
    Build {
        /// Minify the html output
        #[arg(short, long)]
        minify: bool,
        /// The root directory to build
        #[arg(short, long, default_value = "./")]
        dir: PathBuf
    },

    /// Validate the link configuration without building
    Check {
        /// The root directory containing linkdeck.toml
        #[arg(short, long, default_value = "./")]
        dir: PathBuf
    },

    /// Cleans the directory, ie deletes the dist folder
    Clean {
        /// The root directory of the build to clean
        #[arg(short, long, default_value = "./")]
        dir: PathBuf
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { minify, dir } => {
            if let Err(e) = run_build(dir, minify) {
                error!("Build failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Commands::Check { dir } => {
            if let Err(e) = run_check(dir) {
                error!("Check failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Commands::Clean { dir } => {
            let output_path = dir.join("dist");
            info!("Removing directory: {}", output_path.display());
            if let Err(e) = fs::remove_dir_all(&output_path) {
                error!("Failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
