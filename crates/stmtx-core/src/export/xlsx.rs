//! Spreadsheet serialization using rust_xlsxwriter.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::statement::StatementTable;

use super::Result;

/// Worksheet limits of the xlsx format.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Writes a [`StatementTable`] as a single-sheet workbook: header row first,
/// no index column, every cell a string.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    sheet_name: String,
    bold_header: bool,
}

impl XlsxExporter {
    pub fn new() -> Self {
        Self::from_config(&ExportConfig::default())
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            bold_header: config.bold_header,
        }
    }

    /// Serialize the table to xlsx bytes.
    pub fn to_bytes(&self, table: &StatementTable) -> Result<Vec<u8>> {
        let rows = table.rows.len() + 1;
        let cols = table
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(table.width()))
            .max()
            .unwrap_or(0);
        if rows > MAX_ROWS || cols > MAX_COLS {
            return Err(ExportError::TooLarge { rows, cols });
        }

        let mut workbook = Workbook::new();
        let header_format = if self.bold_header {
            Format::new().set_bold()
        } else {
            Format::new()
        };

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name.as_str())?;

        for (col, name) in table.header.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name.as_str(), &header_format)?;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row_num, col as u16, value.as_str())?;
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        debug!("Wrote workbook: {} rows, {} bytes", table.rows.len(), bytes.len());
        Ok(bytes)
    }

    /// Serialize the table and write it to `path`.
    pub fn write_to(&self, table: &StatementTable, path: &Path) -> crate::Result<()> {
        let bytes = self.to_bytes(table)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}
