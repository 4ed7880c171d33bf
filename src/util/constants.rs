// snapsift - util/constants.rs
//
// Single source of truth for all named constants, markers, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "snapsift";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Report formats
// =============================================================================

/// File extensions accepted for analysis. Anything else is rejected before
/// any file content is read.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "out", "snap", "log"];

/// Extension identifying a snap system-information capture.
pub const SNAP_EXTENSION: &str = "snap";

/// Block headers that open a noisy detail/sense section in errpt-style
/// reports. Compared case-insensitively against the trimmed line.
pub const GENERIC_BLOCK_HEADERS: &[&str] = &["detail data", "sense data"];

/// Header that opens a hex block in Power platform dumps.
/// Compared case-insensitively against the trimmed line.
pub const POWER_HEX_HEADER: &str = "additional hex data";

/// Prefix that opens a hex-dump section in hardware event logs.
/// Compared against the trimmed line, case-sensitive.
pub const EVENT_HEX_DUMP_PREFIX: &str = "Log Hex Dump";

// =============================================================================
// Discovery limits
// =============================================================================

/// Maximum directory recursion depth when discovering reports.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Maximum number of report files collected in a single discovery pass.
pub const DEFAULT_MAX_FILES: usize = 500;

/// Hard upper bound on max files (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILES: usize = 10_000;

/// Hard upper bound on max depth (prevents runaway traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 50;

// =============================================================================
// Output
// =============================================================================

/// Suffix inserted before the extension of a cleaned report file
/// (`errpt.txt` -> `errpt.clean.txt`).
pub const CLEANED_FILE_TAG: &str = "clean";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "snapsift.toml";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
