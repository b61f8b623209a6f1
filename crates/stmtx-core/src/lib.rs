//! Core library for bank statement extraction.
//!
//! This crate provides:
//! - PDF processing (per-page text extraction)
//! - A line-parsing engine for date-anchored statements, with balance-delta
//!   reconciliation of missing withdrawal/deposit amounts
//! - Table-grid passthrough for already tabular statements
//! - Spreadsheet export of the normalized table

pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod source;
pub mod statement;

pub use error::{ExportError, ParseError, PdfError, Result, StmtxError};
pub use export::{download_filename, XlsxExporter};
pub use models::config::StmtxConfig;
pub use models::statement::{
    ConversionResult, Notice, NoticeLevel, StatementFormat, StatementRow, StatementTable,
    STATEMENT_COLUMNS,
};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use source::{GridDetector, MemorySource, PageSource, TableGrid};
pub use statement::{
    convert, parser_for, GridStatementParser, LineStatementParser, RowAssembler, StatementParser,
};
