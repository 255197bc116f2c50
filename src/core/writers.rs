//! Writers for the augmented session CSV and category timing files.
//!
//! The augmented CSV keeps every original column verbatim, prepends a
//! zero-based integer row index (with an empty header cell), and appends the
//! derived columns. Timing files are three space-separated numeric columns
//! with no header and no index.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::loaders::SessionTable;
use super::transforms::{DerivedColumns, DERIVED_HEADERS};

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Mismatched column lengths.
    #[error("column length mismatch: {left} has {left_len} rows, {right} has {right_len} rows")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Creates a buffered writer for the given path.
fn create_buffered_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Format a numeric cell with the shortest round-trippable representation.
fn fmt_num(value: f64) -> String {
    format!("{}", value)
}

/// Write the augmented session table to CSV.
///
/// Layout per row: integer row index, original cells verbatim, then the
/// derived columns in [`DERIVED_HEADERS`] order. The index column's header
/// cell is empty.
///
/// # Errors
///
/// Returns an error if the table and derived columns disagree on row count,
/// or if the file cannot be created or written to.
pub fn write_augmented_csv(
    path: &Path,
    table: &SessionTable,
    derived: &DerivedColumns,
) -> Result<()> {
    if table.num_trials() != derived.num_trials() {
        return Err(WriteError::LengthMismatch {
            left: "session table",
            left_len: table.num_trials(),
            right: "derived columns",
            right_len: derived.num_trials(),
        });
    }

    ensure_parent_dirs(path)?;

    let buf_writer = create_buffered_writer(path)?;
    let mut csv_writer = csv::Writer::from_writer(buf_writer);
    let path_str = path.display().to_string();

    // Header: empty index cell, original headers, derived headers
    let mut header: Vec<&str> = Vec::with_capacity(1 + table.headers.len() + DERIVED_HEADERS.len());
    header.push("");
    header.extend(table.headers.iter().map(String::as_str));
    header.extend(DERIVED_HEADERS);
    csv_writer
        .write_record(&header)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for i in 0..table.num_trials() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(i.to_string());
        record.extend(table.rows[i].iter().cloned());
        record.push(fmt_num(derived.trial_start_s[i]));
        record.push(fmt_num(derived.go_cue_time_s[i]));
        record.push(fmt_num(derived.choice_time_s[i]));
        record.push(fmt_num(derived.post_choice_time_min_s[i]));
        record.push(fmt_num(derived.trial_end_s[i]));
        record.push(fmt_num(derived.reward_cue_s[i]));
        record.push(fmt_num(derived.len_begin_choice_s[i]));
        record.push(fmt_num(derived.len_choice_reward_s[i]));
        record.push(fmt_num(derived.len_reward_end_s[i]));
        record.push(derived.stay_hit[i].to_string());
        record.push(derived.stay_miss[i].to_string());
        record.push(fmt_num(derived.switch[i]));
        record.push(derived.stay_hit_prior[i].to_string());
        record.push(derived.stay_miss_prior[i].to_string());
        record.push(fmt_num(derived.switch_prior[i]));

        csv_writer
            .write_record(&record)
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

/// Write a category timing table as space-separated `time length 1` lines.
///
/// No header, no index. An empty table produces an existing, empty file.
///
/// # Errors
///
/// Returns an error if `time_s` and `length_s` differ in length, or if the
/// file cannot be created or written to.
pub fn write_timing_file(path: &Path, time_s: &[f64], length_s: &[f64]) -> Result<()> {
    if time_s.len() != length_s.len() {
        return Err(WriteError::LengthMismatch {
            left: "time",
            left_len: time_s.len(),
            right: "length",
            right_len: length_s.len(),
        });
    }

    ensure_parent_dirs(path)?;
    let mut writer = create_buffered_writer(path)?;
    let path_str = path.display().to_string();

    for (time, length) in time_s.iter().zip(length_s.iter()) {
        writeln!(writer, "{} {} 1", fmt_num(*time), fmt_num(*length)).map_err(|e| {
            WriteError::WriteFile {
                path: path_str.clone(),
                source: e,
            }
        })?;
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::core::loaders::load_session_csv;
    use crate::core::transforms::derive_columns;
    use std::io::Write as IoWrite;
    use tempfile::tempdir;

    fn write_input_csv(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("session.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            "trialStart,goCueTime,choiceTime,postChoiceTimeMin,trialEnd,bridge,reward"
        )
        .unwrap();
        writeln!(file, "0,100,500,600,1000,0,5").unwrap();
        writeln!(file, "1000,1100,1500,1600,2000,1,0").unwrap();
        path
    }

    #[test]
    fn test_write_augmented_csv_layout() {
        let dir = tempdir().unwrap();
        let input = write_input_csv(dir.path());
        let table = load_session_csv(&input).unwrap();
        let derived = derive_columns(&table, &SessionConfig::default());

        let out = dir.path().join("session_mod.csv");
        write_augmented_csv(&out, &table, &derived).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 rows
        assert!(lines[0].starts_with(",trialStart,"));
        assert!(lines[0].ends_with("switch_prior"));
        assert!(lines[1].starts_with("0,0,100,500,"));
        assert!(lines[2].starts_with("1,1000,"));
        // rewardCue_s for row 0: 0.5 + 2.7 = 3.2
        assert!(lines[1].contains(",3.2,"));
    }

    #[test]
    fn test_augmented_csv_round_trip() {
        let dir = tempdir().unwrap();
        let input = write_input_csv(dir.path());
        let table = load_session_csv(&input).unwrap();
        let config = SessionConfig::default();
        let derived = derive_columns(&table, &config);

        let out = dir.path().join("session_mod.csv");
        write_augmented_csv(&out, &table, &derived).unwrap();

        // Re-deriving from the written ms columns reproduces the same values
        let reloaded = load_session_csv(&out).unwrap();
        let rederived = derive_columns(&reloaded, &config);

        assert_eq!(rederived.trial_start_s, derived.trial_start_s);
        assert_eq!(rederived.reward_cue_s, derived.reward_cue_s);
        assert_eq!(rederived.len_reward_end_s, derived.len_reward_end_s);
        assert_eq!(rederived.stay_hit, derived.stay_hit);
        assert_eq!(rederived.switch_prior, derived.switch_prior);
    }

    #[test]
    fn test_write_timing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session_stay_hit.txt");

        write_timing_file(&path, &[3.2, 7.5], &[1.0, 2.5]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["3.2 1 1", "7.5 2.5 1"]);
    }

    #[test]
    fn test_write_timing_file_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session_switch.txt");

        write_timing_file(&path, &[], &[]).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_write_timing_file_length_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");

        let result = write_timing_file(&path, &[1.0], &[1.0, 2.0]);
        assert!(matches!(
            result.unwrap_err(),
            WriteError::LengthMismatch { .. }
        ));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("t.txt");

        write_timing_file(&path, &[1.0], &[2.0]).unwrap();
        assert!(path.exists());
    }
}
