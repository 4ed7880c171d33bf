// snapsift - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// Every record here is transient: constructed inside a single transformer
// call, returned to the caller, and never retained by this layer.

use serde::Serialize;
use std::path::Path;

use crate::util::constants;

// =============================================================================
// Extraction records
// =============================================================================

/// One distinct error label and its occurrence count.
///
/// Labels are unique within a result set; counts equal the number of
/// matching lines in the source text. Result sets are ordered by count
/// descending with stable first-seen tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    pub label: String,
    pub count: u64,
}

/// One distinct (field-replaceable unit, location) pair and its
/// occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FruRecord {
    pub fru: String,
    pub location: String,
    pub count: u64,
}

/// One extracted metadata fact from a snap capture.
///
/// Categories are not guaranteed unique: component-enumeration patterns
/// emit one record per hardware device under the same category label,
/// while single-value patterns (firmware version, model name, system id)
/// emit at most one record each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub category: String,
    pub value: String,
}

// =============================================================================
// Tabular rendering support
// =============================================================================

/// A record that can be rendered as one row of a result table.
///
/// Implemented by all extraction record types so export and display code
/// is written once (header row first, then one record per row).
pub trait TableRecord {
    /// Column headers for this record type.
    fn headers() -> &'static [&'static str];

    /// Cell values for this record, in header order.
    fn cells(&self) -> Vec<String>;
}

impl TableRecord for LabelRecord {
    fn headers() -> &'static [&'static str] {
        &["label", "count"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.label.clone(), self.count.to_string()]
    }
}

impl TableRecord for FruRecord {
    fn headers() -> &'static [&'static str] {
        &["possible_fru", "location", "count"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.fru.clone(),
            self.location.clone(),
            self.count.to_string(),
        ]
    }
}

impl TableRecord for MetadataRecord {
    fn headers() -> &'static [&'static str] {
        &["category", "value"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.category.clone(), self.value.clone()]
    }
}

/// A fully-rendered result table: title, column headers, and string rows.
///
/// This is the shape handed to export and terminal display once the typed
/// records have been produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from typed records.
    pub fn from_records<R: TableRecord>(title: &str, records: &[R]) -> Self {
        Self {
            title: title.to_string(),
            headers: R::headers().iter().map(|h| (*h).to_string()).collect(),
            rows: records.iter().map(TableRecord::cells).collect(),
        }
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Report kind
// =============================================================================

/// The dump format a report file is treated as.
///
/// Detection is extension-driven: `.snap` files are system-information
/// captures, everything else in the allowed set defaults to an
/// errpt-style error report. The Power-dump and event-log kinds are only
/// ever selected explicitly via a cleaning action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// AIX-style error report (errpt output).
    Errpt,

    /// Snap system-information capture.
    Snap,

    /// Power platform dump with ADDITIONAL HEX DATA blocks.
    PowerDump,

    /// Hardware event log with Log Hex Dump sections.
    EventLog,
}

impl ReportKind {
    /// Classify a report file by its extension.
    ///
    /// Returns `None` for extensions outside the allowed set. Matching is
    /// case-insensitive, mirroring the upload validation this replaces.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if !constants::ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }
        if ext == constants::SNAP_EXTENSION {
            Some(Self::Snap)
        } else {
            Some(Self::Errpt)
        }
    }

    /// Human-readable label for display and logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Errpt => "error report",
            Self::Snap => "snap capture",
            Self::PowerDump => "Power dump",
            Self::EventLog => "event log",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Analysis output
// =============================================================================

/// The result of running one analysis action over one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutput {
    /// Extraction actions produce one or more result tables.
    Tables(Vec<Table>),

    /// Cleaning actions produce the de-noised report text.
    Cleaned(String),
}
