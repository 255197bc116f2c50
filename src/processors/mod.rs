//! Data processing modules.

pub mod pipeline;
pub mod timing;

// Re-export key types for convenience
pub use pipeline::{run_session_pipeline, session_input_path, SessionSummary};
pub use timing::{build_timing_table, TimingTable};
