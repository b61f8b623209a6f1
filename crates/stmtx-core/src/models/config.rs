//! Configuration structures for the statement pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StmtxError};
use crate::models::statement::StatementFormat;
use crate::source::GridDetector;

/// Main configuration for the stmtx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtxConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Statement parsing configuration.
    pub statement: StatementConfig,

    /// Spreadsheet export configuration.
    pub export: ExportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Minimum text length to consider the PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 50,
        }
    }
}

/// Statement parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    /// Format used when the caller does not choose one.
    pub default_format: StatementFormat,

    /// Minimum number of cells for a text line to count as a grid row.
    pub min_grid_columns: usize,

    /// Minimum number of consecutive grid rows to form a table.
    pub min_grid_rows: usize,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            default_format: StatementFormat::Hdfc,
            min_grid_columns: 2,
            min_grid_rows: 2,
        }
    }
}

impl StatementConfig {
    /// Grid detector for the generic format.
    pub fn grid_detector(&self) -> GridDetector {
        GridDetector::new(self.min_grid_columns, self.min_grid_rows)
    }
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Worksheet name.
    pub sheet_name: String,

    /// Render the header row in bold.
    pub bold_header: bool,

    /// Directory for written spreadsheets (None = current directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Statement".to_string(),
            bold_header: true,
            output_dir: None,
        }
    }
}

impl StmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| StmtxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| StmtxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory spreadsheets are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
