//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;
use crate::source::{GridDetector, PageSource, TableGrid};

/// Minimum extracted characters for a PDF to count as text-based.
const DEFAULT_MIN_TEXT_LENGTH: usize = 50;

/// PDF text extractor.
///
/// lopdf validates and decrypts the document; pdf-extract produces the
/// per-page text, which is extracted once at load time.
pub struct PdfExtractor {
    document: Option<Document>,
    pages: Vec<String>,
    grids: GridDetector,
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            pages: Vec::new(),
            grids: GridDetector::default(),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Set the grid detector used for table extraction.
    pub fn with_grid_detector(mut self, grids: GridDetector) -> Self {
        self.grids = grids;
        self
    }

    /// Set the minimum text length for [`PdfType::Text`].
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Total characters of extracted text across all pages.
    pub fn text_len(&self) -> usize {
        self.pages.iter().map(|p| p.trim().len()).sum()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted_data
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let pages = pdf_extract::extract_text_from_mem_by_pages(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        if pages.len() != page_count {
            debug!(
                "pdf-extract returned {} pages, document has {}",
                pages.len(),
                page_count
            );
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.pages = pages;
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|_| self.pages.len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text_len = self.text_len();
        let pdf_type = if self.document.is_none() || text_len == 0 {
            PdfType::Empty
        } else if text_len < self.min_text_length {
            PdfType::Image
        } else {
            PdfType::Text
        };

        debug!("PDF analysis: {} chars text -> {:?}", text_len, pdf_type);
        pdf_type
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(PdfError::InvalidPage(page))
    }
}

impl PageSource for PdfExtractor {
    fn page_count(&self) -> u32 {
        PdfProcessor::page_count(self)
    }

    fn extract_lines(&self, page: u32) -> crate::Result<Vec<String>> {
        let text = self.extract_page_text(page)?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        trace!("Page {}: {} lines", page, lines.len());
        Ok(lines)
    }

    fn extract_tables(&self, page: u32) -> crate::Result<Vec<TableGrid>> {
        let lines = self.extract_lines(page)?;
        Ok(self.grids.detect(&lines))
    }
}
