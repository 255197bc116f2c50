//! Loader for behavioral session CSV logs.
//!
//! A session CSV has one row per game trial with raw millisecond timestamps
//! plus the `bridge` (stay/switch) and `reward` outcome columns. Any extra
//! columns present in the file are carried along untouched so the augmented
//! output preserves them verbatim.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

/// Column names the pipeline requires in every session CSV.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "trialStart",
    "goCueTime",
    "choiceTime",
    "postChoiceTimeMin",
    "trialEnd",
    "bridge",
    "reward",
];

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Container for one session's trial data.
///
/// Column-oriented: the parsed vectors below all share the same length and
/// row order as the input file. `headers` and `rows` keep the original cell
/// text so the writer can reproduce unknown columns exactly.
#[derive(Debug, Clone)]
pub struct SessionTable {
    /// Original header row, in file order.
    pub headers: Vec<String>,
    /// Raw cell text for every row, in file order.
    pub rows: Vec<Vec<String>>,
    /// Trial start timestamps in milliseconds.
    pub trial_start_ms: Vec<f64>,
    /// Go-cue timestamps in milliseconds.
    pub go_cue_time_ms: Vec<f64>,
    /// Choice timestamps in milliseconds.
    pub choice_time_ms: Vec<f64>,
    /// Post-choice minimum timestamps in milliseconds.
    pub post_choice_time_min_ms: Vec<f64>,
    /// Trial end timestamps in milliseconds.
    pub trial_end_ms: Vec<f64>,
    /// Stay/switch flag: 0 = stay, nonzero = switch.
    pub bridge: Vec<f64>,
    /// Reward outcome: 0 = miss, nonzero = hit.
    pub reward: Vec<f64>,
    /// Source file path.
    pub source_path: Option<PathBuf>,
}

impl SessionTable {
    /// Returns the number of trials in this session.
    #[inline]
    pub fn num_trials(&self) -> usize {
        self.trial_start_ms.len()
    }

    /// Returns true if the session has no trials.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trial_start_ms.is_empty()
    }
}

/// Parse one required cell as f64, reporting row and column on failure.
fn parse_cell(record: &csv::StringRecord, idx: usize, name: &str, row: usize) -> Result<f64> {
    let raw = record.get(idx).ok_or_else(|| {
        LoaderError::ParseError(format!("row {}: missing value for column '{}'", row, name))
    })?;
    raw.trim().parse().map_err(|_| {
        LoaderError::ParseError(format!(
            "row {}: invalid value '{}' for column '{}'",
            row, raw, name
        ))
    })
}

/// Load a session CSV into a [`SessionTable`].
///
/// The file must have a header row containing all of [`REQUIRED_COLUMNS`]
/// (exact, case-sensitive names). Extra columns are preserved as raw text.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// missing, a required cell fails to parse as a number, or the file has no
/// data rows.
pub fn load_session_csv<P: AsRef<Path>>(path: P) -> Result<SessionTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    // Resolve required column indices up front
    let mut missing = Vec::new();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == name) {
            Some(idx) => indices[slot] = idx,
            None => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        return Err(LoaderError::MissingColumns(missing.join(", ")));
    }

    let mut rows = Vec::new();
    let mut trial_start_ms = Vec::new();
    let mut go_cue_time_ms = Vec::new();
    let mut choice_time_ms = Vec::new();
    let mut post_choice_time_min_ms = Vec::new();
    let mut trial_end_ms = Vec::new();
    let mut bridge = Vec::new();
    let mut reward = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;

        trial_start_ms.push(parse_cell(&record, indices[0], REQUIRED_COLUMNS[0], row_idx)?);
        go_cue_time_ms.push(parse_cell(&record, indices[1], REQUIRED_COLUMNS[1], row_idx)?);
        choice_time_ms.push(parse_cell(&record, indices[2], REQUIRED_COLUMNS[2], row_idx)?);
        post_choice_time_min_ms.push(parse_cell(
            &record,
            indices[3],
            REQUIRED_COLUMNS[3],
            row_idx,
        )?);
        trial_end_ms.push(parse_cell(&record, indices[4], REQUIRED_COLUMNS[4], row_idx)?);
        bridge.push(parse_cell(&record, indices[5], REQUIRED_COLUMNS[5], row_idx)?);
        reward.push(parse_cell(&record, indices[6], REQUIRED_COLUMNS[6], row_idx)?);

        rows.push(record.iter().map(String::from).collect());
    }

    if rows.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    Ok(SessionTable {
        headers,
        rows,
        trial_start_ms,
        go_cue_time_ms,
        choice_time_ms,
        post_choice_time_min_ms,
        trial_end_ms,
        bridge,
        reward,
        source_path: Some(path.to_path_buf()),
    })
}
