//! Tabular export of converted statements.

mod xlsx;

pub use xlsx::XlsxExporter;

use crate::error::ExportError;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Deterministic download filename for a converted statement.
pub fn download_filename(source_id: &str) -> String {
    format!("{}_statement.xlsx", source_id)
}
