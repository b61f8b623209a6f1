//! Statement parsing: turns page text into a normalized transaction table.

pub mod assembler;
mod grid;
mod lines;
pub mod rules;

pub use assembler::{AssembledRows, RowAssembler};
pub use grid::{GridStatementParser, NO_TABLES_NOTICE};
pub use lines::{LineStatementParser, NO_TRANSACTIONS_NOTICE};

use std::time::Instant;

use tracing::debug;

use crate::models::config::StmtxConfig;
use crate::models::statement::{ConversionResult, Notice, StatementFormat, StatementTable};
use crate::source::PageSource;

/// Output of a single parser run.
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    pub table: StatementTable,
    pub notices: Vec<Notice>,
    pub pages: u32,
}

/// Trait for statement layouts.
///
/// Parsing never fails a document: problems surface as notices on an
/// otherwise valid, possibly empty, table.
pub trait StatementParser {
    /// The layout this parser handles.
    fn format(&self) -> StatementFormat;

    /// Parse every page of `source` in order.
    fn parse(&self, source: &dyn PageSource) -> ParsedStatement;
}

/// Build the parser for `format` from configuration.
pub fn parser_for(format: StatementFormat, config: &StmtxConfig) -> Box<dyn StatementParser> {
    match format {
        StatementFormat::Hdfc => {
            Box::new(LineStatementParser::new().with_max_pages(config.pdf.max_pages))
        }
        StatementFormat::Generic => {
            Box::new(GridStatementParser::new().with_max_pages(config.pdf.max_pages))
        }
    }
}

/// Convert one document with the parser for `format`.
pub fn convert(
    source: &dyn PageSource,
    format: StatementFormat,
    config: &StmtxConfig,
) -> ConversionResult {
    let start = Instant::now();
    let parsed = parser_for(format, config).parse(source);
    let processing_time_ms = start.elapsed().as_millis() as u64;

    debug!(
        "{} statement: {} pages, {} rows, {} notices in {}ms",
        format,
        parsed.pages,
        parsed.table.len(),
        parsed.notices.len(),
        processing_time_ms
    );

    ConversionResult {
        format,
        table: parsed.table,
        notices: parsed.notices,
        pages: parsed.pages,
        processing_time_ms: Some(processing_time_ms),
    }
}

pub(crate) fn page_limit(page_count: u32, max_pages: usize) -> u32 {
    if max_pages == 0 {
        page_count
    } else {
        page_count.min(u32::try_from(max_pages).unwrap_or(u32::MAX))
    }
}
