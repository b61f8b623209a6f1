//! Line-parsing engine for date-anchored statements (HDFC layout).

use tracing::{debug, info, warn};

use crate::models::statement::{Notice, StatementFormat, StatementTable};
use crate::source::PageSource;

use super::assembler::RowAssembler;
use super::{page_limit, ParsedStatement, StatementParser};

/// Notice raised when a statement yields no transactions.
pub const NO_TRANSACTIONS_NOTICE: &str = "No transactions found in the statement.";

/// Parses statements where every transaction starts with a `dd/mm/yy` token
/// and wrapped narration continues on the following lines.
#[derive(Debug, Clone, Default)]
pub struct LineStatementParser {
    max_pages: usize,
}

impl LineStatementParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Parse an already split sequence of lines as one document.
    pub fn parse_lines<I, S>(&self, lines: I) -> ParsedStatement
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assembler = RowAssembler::new();
        for line in lines {
            assembler.push_line(line.as_ref());
        }
        finish(assembler, Vec::new(), 1)
    }
}

impl StatementParser for LineStatementParser {
    fn format(&self) -> StatementFormat {
        StatementFormat::Hdfc
    }

    fn parse(&self, source: &dyn PageSource) -> ParsedStatement {
        let pages = page_limit(source.page_count(), self.max_pages);
        let mut assembler = RowAssembler::new();
        let mut notices = Vec::new();

        // Pages feed one continuous line stream; state carries across.
        for page in 1..=pages {
            match source.extract_lines(page) {
                Ok(lines) => {
                    debug!("Page {}: {} lines", page, lines.len());
                    for line in &lines {
                        assembler.push_line(line);
                    }
                }
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page, e);
                    notices.push(Notice::warning(format!("Page {} skipped: {}", page, e)));
                }
            }
        }

        finish(assembler, notices, pages)
    }
}

fn finish(assembler: RowAssembler, mut notices: Vec<Notice>, pages: u32) -> ParsedStatement {
    let assembled = assembler.finish();

    notices.extend(
        assembled
            .skipped
            .iter()
            .map(|e| Notice::warning(format!("Skipped line: {}", e))),
    );

    if assembled.rows.is_empty() {
        warn!("{}", NO_TRANSACTIONS_NOTICE);
        notices.push(Notice::warning(NO_TRANSACTIONS_NOTICE));
    } else {
        info!(
            "Extracted {} transactions ({} lines skipped)",
            assembled.rows.len(),
            assembled.skipped.len()
        );
    }

    ParsedStatement {
        table: StatementTable::from_rows(&assembled.rows),
        notices,
        pages,
    }
}
