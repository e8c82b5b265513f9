//! Global limits and defaults for configuration and runtime

/// Minimum allowed analysis deadline in milliseconds
pub const MIN_ANALYSIS_TIMEOUT_MS: u64 = 1_000; // 1s

/// Maximum allowed analysis deadline in milliseconds
pub const MAX_ANALYSIS_TIMEOUT_MS: u64 = 600_000; // 10min

/// Default analysis deadline in milliseconds
pub const DEFAULT_ANALYSIS_TIMEOUT_MS: u64 = 60_000; // 60s

/// Default number of analyses allowed to run at once
pub const DEFAULT_MAX_CONCURRENT_ANALYSES: usize = 4;

/// Lead time used when the engine does not report one
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// Default billing currency of the platform
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default maximum request body (model + drawing + fields)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024; // 50 MiB

/// Engine stderr kept in diagnostics
pub const MAX_ENGINE_DIAGNOSTIC_BYTES: usize = 4 * 1024;

/// Largest engine stdout accepted as a report
pub const MAX_ENGINE_OUTPUT_BYTES: usize = 1024 * 1024; // 1 MiB
