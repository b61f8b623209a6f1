//! Page-level text sources consumed by the statement parsers.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{PdfError, Result};
use crate::statement::rules::CELL_GAP;

/// One detected table: rows of optional cells, as a layout extractor
/// reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    pub rows: Vec<Vec<Option<String>>>,
}

impl TableGrid {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Ordered access to the text of a document, page by page.
///
/// Pages are 1-indexed.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Raw text lines of one page, top to bottom.
    fn extract_lines(&self, page: u32) -> Result<Vec<String>>;

    /// Table grids detected on one page.
    fn extract_tables(&self, page: u32) -> Result<Vec<TableGrid>> {
        let lines = self.extract_lines(page)?;
        Ok(GridDetector::default().detect(&lines))
    }
}

/// Finds tables in plain text by looking for runs of lines that split into
/// several cells on wide gaps.
#[derive(Debug, Clone, Copy)]
pub struct GridDetector {
    /// Minimum cells per line for the line to count as a table row.
    pub min_columns: usize,
    /// Minimum consecutive table rows to form a grid.
    pub min_rows: usize,
}

impl Default for GridDetector {
    fn default() -> Self {
        Self {
            min_columns: 2,
            min_rows: 2,
        }
    }
}

impl GridDetector {
    pub fn new(min_columns: usize, min_rows: usize) -> Self {
        Self {
            min_columns: min_columns.max(2),
            min_rows: min_rows.max(1),
        }
    }

    /// Split a line into cells on tabs or runs of two or more spaces.
    pub fn split_cells(line: &str) -> Vec<String> {
        CELL_GAP
            .split(line.trim())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Detect grids in a page's lines.
    pub fn detect<S: AsRef<str>>(&self, lines: &[S]) -> Vec<TableGrid> {
        let mut grids = Vec::new();
        let mut current: Vec<Vec<Option<String>>> = Vec::new();

        for line in lines {
            let cells = Self::split_cells(line.as_ref());
            if cells.len() >= self.min_columns {
                current.push(cells.into_iter().map(Some).collect());
            } else {
                self.flush(&mut current, &mut grids);
            }
        }
        self.flush(&mut current, &mut grids);

        trace!("Detected {} grids in {} lines", grids.len(), lines.len());
        grids
    }

    fn flush(&self, current: &mut Vec<Vec<Option<String>>>, grids: &mut Vec<TableGrid>) {
        if current.len() >= self.min_rows {
            grids.push(TableGrid::new(std::mem::take(current)));
        } else {
            current.clear();
        }
    }
}

/// In-memory document, one string per page.
///
/// Used for plain-text statements and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<String>,
    grids: GridDetector,
}

impl MemorySource {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
            grids: GridDetector::default(),
        }
    }

    /// Split text into pages on form feeds.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split('\u{000C}'))
    }

    pub fn with_grid_detector(mut self, grids: GridDetector) -> Self {
        self.grids = grids;
        self
    }

    fn page(&self, page: u32) -> Result<&str> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .map(String::as_str)
            .ok_or_else(|| PdfError::InvalidPage(page).into())
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_lines(&self, page: u32) -> Result<Vec<String>> {
        Ok(self.page(page)?.lines().map(str::to_string).collect())
    }

    fn extract_tables(&self, page: u32) -> Result<Vec<TableGrid>> {
        let lines = self.extract_lines(page)?;
        Ok(self.grids.detect(&lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StmtxError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_cells() {
        assert_eq!(
            GridDetector::split_cells("  Date   Description\tAmount  "),
            vec!["Date", "Description", "Amount"]
        );
        assert_eq!(
            GridDetector::split_cells("single spaced words only"),
            vec!["single spaced words only"]
        );
    }

    #[test]
    fn test_detect_grids_separated_by_prose() {
        let lines = [
            "ACCOUNT STATEMENT",
            "Date    Particulars    Amount",
            "01-04-2024    Salary    50,000.00",
            "Opening balance carried forward",
            "Txn   Note",
            "only one row here",
            "A   B",
            "C   D",
        ];
        let grids = GridDetector::default().detect(&lines);

        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].rows.len(), 2);
        assert_eq!(grids[0].rows[1][1].as_deref(), Some("Salary"));
        assert_eq!(grids[1].rows[0][0].as_deref(), Some("A"));
    }

    #[test]
    fn test_memory_source_pages() {
        let source = MemorySource::from_text("line one\nline two\u{000C}page two");
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.extract_lines(1).unwrap(), vec!["line one", "line two"]);
        assert_eq!(source.extract_lines(2).unwrap(), vec!["page two"]);
    }

    #[test]
    fn test_memory_source_invalid_page() {
        let source = MemorySource::new(["only"]);
        assert!(matches!(
            source.extract_lines(0),
            Err(StmtxError::Pdf(PdfError::InvalidPage(0)))
        ));
        assert!(matches!(
            source.extract_lines(2),
            Err(StmtxError::Pdf(PdfError::InvalidPage(2)))
        ));
    }
}
