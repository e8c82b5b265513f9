//! DFM Staging
//!
//! Per-request isolated storage for uploaded models and drawings. Every
//! request gets its own directory under the staging root, and the
//! [`StagedFiles`] guard removes it exactly once when the request ends,
//! whether it completed, failed or was cancelled.

pub mod fs_stage;
pub mod guard;

pub use fs_stage::FsStagingArea;
pub use guard::StagedFiles;
