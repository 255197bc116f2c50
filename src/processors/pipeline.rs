//! Full session pipeline: load, derive, and write all output artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::config::PipelineConfig;
use crate::core::loaders::load_session_csv;
use crate::core::transforms::{derive_columns, TrialCategory};
use crate::core::writers::{write_augmented_csv, write_timing_file};
use super::timing::build_timing_table;

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct SessionSummary {
    /// Number of trials in the input session.
    pub num_trials: usize,
    /// Path of the augmented CSV.
    pub augmented_path: PathBuf,
    /// Per-category timing outputs: (category, rows written, path).
    pub timing_outputs: Vec<(TrialCategory, usize, PathBuf)>,
}

/// Path of the session input CSV for a base name.
pub fn session_input_path(dir: &Path, base: &str) -> PathBuf {
    dir.join(format!("{}.csv", base))
}

/// Run the full pipeline for one session.
///
/// Reads `<base>.csv` from `dir`, writes `<base><suffix>.csv` and one
/// `<base>_<category>.txt` per configured category back into `dir`.
pub fn run_session_pipeline(
    dir: &Path,
    base: &str,
    config: &PipelineConfig,
) -> Result<SessionSummary> {
    let input = session_input_path(dir, base);
    let table = load_session_csv(&input)
        .with_context(|| format!("Failed to load session CSV: {}", input.display()))?;
    info!("Loaded {} trials from {}", table.num_trials(), input.display());

    let derived = derive_columns(&table, &config.session);

    let augmented_path = dir.join(format!("{}{}.csv", base, config.output.augmented_suffix));
    write_augmented_csv(&augmented_path, &table, &derived)
        .with_context(|| format!("Failed to write augmented CSV: {}", augmented_path.display()))?;
    info!("Wrote augmented table to {}", augmented_path.display());

    let mut timing_outputs = Vec::with_capacity(config.output.categories.len());
    for &category in &config.output.categories {
        let timing = build_timing_table(&derived, category);
        let path = dir.join(format!("{}_{}.txt", base, category.name()));
        write_timing_file(&path, &timing.time_s, &timing.length_s)
            .with_context(|| format!("Failed to write timing file: {}", path.display()))?;
        info!(
            "Wrote {} timing rows for '{}' to {}",
            timing.len(),
            category,
            path.display()
        );
        timing_outputs.push((category, timing.len(), path));
    }

    Ok(SessionSummary {
        num_trials: table.num_trials(),
        augmented_path,
        timing_outputs,
    })
}
