//! Behavioral session timing pipeline.
//!
//! This crate provides tools for:
//! - Loading behavioral-game session CSV logs (one row per trial)
//! - Deriving second-unit timestamps, sub-trial interval lengths, and
//!   trial-category labels (`stay_hit`, `stay_miss`, `switch`)
//! - Writing the augmented table and per-category timing files
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use trial_pipeline::config::PipelineConfig;
//! use trial_pipeline::processors::run_session_pipeline;
//!
//! let config = PipelineConfig::default();
//! let summary = run_session_pipeline(Path::new("."), "IBN001_game_1", &config).unwrap();
//! println!("{} trials processed", summary.num_trials);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{OutputConfig, PipelineConfig, SessionConfig};
pub use core::loaders::SessionTable;
pub use core::transforms::{DerivedColumns, TrialCategory};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
