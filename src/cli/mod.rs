//! Command-line interface for the session timing pipeline.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::processors::pipeline::run_session_pipeline;

#[derive(Parser)]
#[command(name = "trial-pipeline")]
#[command(about = "Behavioral session timing pipeline", version)]
pub struct Cli {
    /// Session base filename (without .csv extension)
    session: String,

    /// Directory containing the session CSV (outputs are written here too)
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Path to YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    let start = Instant::now();
    let spinner = create_spinner("Processing session...");

    match run_session_pipeline(&cli.dir, &cli.session, &config) {
        Ok(summary) => {
            spinner.finish_and_clear();

            let mut items = vec![
                ("Session", cli.session.clone()),
                ("Trials", summary.num_trials.to_string()),
                ("Augmented CSV", summary.augmented_path.display().to_string()),
            ];
            for (category, rows, _path) in &summary.timing_outputs {
                items.push((category.name(), format!("{} timing rows", rows)));
            }
            items.push(("Duration", format!("{:.2?}", start.elapsed())));

            print_summary("Session Pipeline Complete", &items);
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Pipeline failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
