//! Core data types and I/O operations.

pub mod loaders;
pub mod transforms;
pub mod writers;

pub use loaders::{load_session_csv, LoaderError, SessionTable};
pub use transforms::{derive_columns, DerivedColumns, TrialCategory};
pub use writers::{write_augmented_csv, write_timing_file, WriteError};
