// snapsift - core/export.rs
//
// CSV and JSON export plus terminal rendering of result tables.
// Core layer: writes to any Write trait object, never opens files itself.

use crate::core::model::Table;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export one table to CSV format.
///
/// Writes the header row followed by one record per row. Returns the
/// number of data rows written.
pub fn export_csv<W: Write>(
    table: &Table,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(&table.headers)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for row in &table.rows {
        csv_writer.write_record(row).map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export tables to JSON format (array of table objects).
pub fn export_json<W: Write>(
    tables: &[Table],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, tables).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(tables.iter().map(|t| t.rows.len()).sum())
}

/// Render a table as column-aligned plain text for terminal display.
///
/// An empty table renders as its title plus a "(no matches)" marker so
/// callers never have to special-case pattern-free input.
pub fn render_text(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');

    if table.is_empty() {
        out.push_str("(no matches)\n");
        return out;
    }

    // Column widths from the wider of header and cells.
    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    push_row(&mut out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &table.rows {
        push_row(&mut out, row, &widths);
    }

    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // No padding after the last column.
        if i + 1 < cells.len() {
            let width = widths.get(i).copied().unwrap_or(0);
            for _ in cell.len()..width {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}
