//! Table-grid passthrough for statements that are already tabular.

use tracing::{debug, warn};

use crate::models::statement::{Notice, StatementFormat, StatementTable};
use crate::source::{PageSource, TableGrid};

use super::{page_limit, ParsedStatement, StatementParser};

/// Notice raised when no grid on any page had content.
pub const NO_TABLES_NOTICE: &str = "No tables found in the PDF.";

/// Reshapes detected grids into one table; the first non-empty row is the
/// header.
#[derive(Debug, Clone, Default)]
pub struct GridStatementParser {
    max_pages: usize,
}

impl GridStatementParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Build the table from grids in document order.
    pub fn reshape<'a, I>(grids: I) -> (StatementTable, Vec<Notice>)
    where
        I: IntoIterator<Item = &'a TableGrid>,
    {
        let mut cleaned: Vec<Vec<String>> = grids
            .into_iter()
            .flat_map(|grid| grid.rows.iter())
            .filter(|row| row.iter().flatten().any(|cell| !cell.trim().is_empty()))
            .map(|row| row.iter().map(clean_cell).collect())
            .collect();

        if cleaned.is_empty() {
            return (StatementTable::default(), vec![Notice::warning(NO_TABLES_NOTICE)]);
        }

        let header = cleaned.remove(0);
        let width = header.len();
        let mut resized = 0;
        let rows = cleaned
            .into_iter()
            .map(|mut row| {
                if row.len() != width {
                    debug!("Resizing grid row from {} to {} cells", row.len(), width);
                    row.resize(width, String::new());
                    resized += 1;
                }
                row
            })
            .collect();

        let mut notices = Vec::new();
        if resized > 0 {
            notices.push(Notice::info(format!(
                "{} rows resized to the {}-column header.",
                resized, width
            )));
        }

        (StatementTable { header, rows }, notices)
    }
}

fn clean_cell(cell: &Option<String>) -> String {
    cell.as_deref()
        .map(|c| c.replace('\n', " ").trim().to_string())
        .unwrap_or_default()
}

impl StatementParser for GridStatementParser {
    fn format(&self) -> StatementFormat {
        StatementFormat::Generic
    }

    fn parse(&self, source: &dyn PageSource) -> ParsedStatement {
        let pages = page_limit(source.page_count(), self.max_pages);
        let mut grids = Vec::new();
        let mut notices = Vec::new();

        for page in 1..=pages {
            match source.extract_tables(page) {
                Ok(found) => grids.extend(found),
                Err(e) => {
                    warn!("Failed to extract tables from page {}: {}", page, e);
                    notices.push(Notice::warning(format!("Page {} skipped: {}", page, e)));
                }
            }
        }

        let (table, reshape_notices) = Self::reshape(&grids);
        notices.extend(reshape_notices);

        ParsedStatement {
            table,
            notices,
            pages,
        }
    }
}
