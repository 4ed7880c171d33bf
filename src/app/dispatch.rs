// snapsift - app/dispatch.rs
//
// Selects which core transformers run for a given report and action,
// and reads the report text on their behalf. This is the boundary the
// old upload handler occupied: extension validation happens here, before
// any content is read.

use crate::core::clean::{clean_event_log, clean_generic, clean_power_variant};
use crate::core::extract::{extract_fru_locations, extract_labels, extract_metadata};
use crate::core::model::{AnalysisOutput, ReportKind, Table};
use crate::util::error::{DispatchError, Result};
use std::path::Path;

/// Title of the error-label result table.
pub const LABELS_TABLE_TITLE: &str = "Error Labels";

/// Title of the FRU/location result table.
pub const FRU_TABLE_TITLE: &str = "Possible FRUs";

/// Title of the snap metadata result table.
pub const METADATA_TABLE_TITLE: &str = "Snap Metadata";

/// An analysis action requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pick the extraction suite by report kind: snap captures get
    /// metadata, everything else gets labels + FRUs.
    Auto,

    /// Error-label frequency table only.
    Labels,

    /// FRU/location frequency table only.
    Fru,

    /// Snap metadata table only.
    Metadata,

    /// Strip detail/sense-data hex blocks (errpt-style reports).
    CleanErrpt,

    /// Strip ADDITIONAL HEX DATA blocks (Power dumps).
    CleanPower,

    /// Strip Log Hex Dump sections and collapse blanks (event logs).
    CleanEvent,
}

impl Action {
    /// True for actions that produce cleaned text rather than tables.
    pub fn is_cleaning(&self) -> bool {
        matches!(self, Self::CleanErrpt | Self::CleanPower | Self::CleanEvent)
    }
}

/// Validate, read, and analyse a single report file.
///
/// The extension check runs before the file is opened so an oversized
/// unsupported file is never read into memory.
pub fn analyze_file(path: &Path, action: Action) -> Result<AnalysisOutput> {
    let kind = ReportKind::from_path(path).ok_or_else(|| DispatchError::UnsupportedExtension {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string),
    })?;

    let text = crate::app::fs::read_report_lossy(path)?;

    tracing::info!(
        path = %path.display(),
        kind = %kind,
        action = ?action,
        bytes = text.len(),
        "Analysing report"
    );

    Ok(run_action(&text, kind, action))
}

/// Run an action over already-loaded report text.
///
/// Never fails: pattern-free input produces empty tables or pass-through
/// text (the caller decides how to present an empty result).
pub fn run_action(text: &str, kind: ReportKind, action: Action) -> AnalysisOutput {
    match action {
        Action::Auto => match kind {
            ReportKind::Snap => AnalysisOutput::Tables(vec![metadata_table(text)]),
            _ => AnalysisOutput::Tables(vec![labels_table(text), fru_table(text)]),
        },
        Action::Labels => AnalysisOutput::Tables(vec![labels_table(text)]),
        Action::Fru => AnalysisOutput::Tables(vec![fru_table(text)]),
        Action::Metadata => AnalysisOutput::Tables(vec![metadata_table(text)]),
        Action::CleanErrpt => AnalysisOutput::Cleaned(clean_generic(text)),
        Action::CleanPower => AnalysisOutput::Cleaned(clean_power_variant(text)),
        Action::CleanEvent => AnalysisOutput::Cleaned(clean_event_log(text)),
    }
}

fn labels_table(text: &str) -> Table {
    Table::from_records(LABELS_TABLE_TITLE, &extract_labels(text))
}

fn fru_table(text: &str) -> Table {
    Table::from_records(FRU_TABLE_TITLE, &extract_fru_locations(text))
}

fn metadata_table(text: &str) -> Table {
    Table::from_records(METADATA_TABLE_TITLE, &extract_metadata(text))
}
