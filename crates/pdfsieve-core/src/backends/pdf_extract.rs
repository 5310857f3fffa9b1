use crate::backend::{BackendError, ExtractionBackend};
use crate::progress::ProgressSink;
use crate::validate::PdfDocument;
use crate::{Method, PageLabel, PageSegment};

/// Characters accumulated per synthesized page break.
pub const DEFAULT_CHARS_PER_PAGE: usize = 2000;

/// Layout-analysis backend built on `pdf-extract`.
///
/// The underlying extractor walks the whole document and provides no page
/// boundaries, so this backend synthesizes approximate breaks: lines are
/// accumulated until the running character count reaches a threshold,
/// then emitted as a segment labelled "estimated". Deliberately
/// approximate; the backend has nothing better to offer.
#[derive(Debug)]
pub struct PdfExtractBackend {
    chars_per_page: usize,
}

impl Default for PdfExtractBackend {
    fn default() -> Self {
        Self {
            chars_per_page: DEFAULT_CHARS_PER_PAGE,
        }
    }
}

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the estimated-page character threshold.
    pub fn with_chars_per_page(mut self, chars: usize) -> Self {
        self.chars_per_page = chars;
        self
    }
}

impl ExtractionBackend for PdfExtractBackend {
    fn method(&self) -> Method {
        Method::PdfExtract
    }

    fn extract(
        &self,
        doc: &PdfDocument,
        _progress: &dyn ProgressSink,
    ) -> Result<Vec<PageSegment>, BackendError> {
        let text = pdf_extract::extract_text(doc.path())
            .map_err(|e| BackendError::Extraction(e.to_string()))?;

        Ok(chunk_into_estimated_pages(&text, self.chars_per_page))
    }
}

/// Split whole-document text into estimated page segments.
///
/// Accumulates lines until their combined length reaches `chars_per_page`,
/// then closes the segment; the remainder becomes a final segment.
/// Empty or whitespace-only input yields no segments.
fn chunk_into_estimated_pages(text: &str, chars_per_page: usize) -> Vec<PageSegment> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for line in text.lines() {
        current.push(line);
        current_len += line.len();
        if current_len >= chars_per_page {
            segments.push(PageSegment::with_text(
                PageLabel::Estimated,
                &current.join("\n"),
            ));
            current.clear();
            current_len = 0;
        }
    }

    if !current.is_empty() {
        let remainder = current.join("\n");
        if !remainder.trim().is_empty() {
            segments.push(PageSegment::with_text(PageLabel::Estimated, &remainder));
        }
    }

    segments
}
