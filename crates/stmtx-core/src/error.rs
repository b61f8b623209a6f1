//! Error types for the stmtx-core library.

use thiserror::Error;

/// Main error type for the stmtx library.
#[derive(Error, Debug)]
pub enum StmtxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Spreadsheet or table export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while turning statement lines into rows.
///
/// None of these abort a document: the parser logs them, records a notice
/// and moves on to the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A date-anchored line has too few tokens for the positional fields.
    #[error("line has {found} tokens, at least {required} required: {line:?}")]
    LineDecomposition {
        line: String,
        found: usize,
        required: usize,
    },

    /// Unknown statement format name.
    #[error("unknown statement format: {0}")]
    UnknownFormat(String),
}

/// Errors related to writing the output table.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The spreadsheet writer rejected the workbook.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The table has more rows or columns than a worksheet can hold.
    #[error("table too large for a worksheet: {rows} rows x {cols} columns")]
    TooLarge { rows: usize, cols: usize },
}

/// Result type for the stmtx library.
pub type Result<T> = std::result::Result<T, StmtxError>;
