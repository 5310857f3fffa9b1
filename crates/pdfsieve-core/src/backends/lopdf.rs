use lopdf::Document;

use crate::backend::{BackendError, ExtractionBackend};
use crate::progress::{ProgressEvent, ProgressSink, page_milestone};
use crate::validate::PdfDocument;
use crate::{Method, PageLabel, PageSegment};

/// Page-oriented backend built on `lopdf`.
///
/// Pure Rust and statically linked, so it is never unavailable; a
/// document that fails to load or a page whose content streams cannot be
/// decoded surfaces as an extraction failure.
#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionBackend for LopdfBackend {
    fn method(&self) -> Method {
        Method::Lopdf
    }

    fn extract(
        &self,
        doc: &PdfDocument,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<PageSegment>, BackendError> {
        let document = Document::load(doc.path())
            .map_err(|e| BackendError::Extraction(format!("failed to open PDF: {}", e)))?;

        let pages = document.get_pages();
        let total = pages.len();
        let mut segments = Vec::with_capacity(total);

        // get_pages() keys are 1-based page numbers in document order
        for (i, page_number) in pages.keys().enumerate() {
            let text = document.extract_text(&[*page_number]).map_err(|e| {
                BackendError::Extraction(format!("failed to extract page {}: {}", page_number, e))
            })?;
            segments.push(PageSegment::with_text(
                PageLabel::Number(*page_number as usize),
                &text,
            ));

            let page = i + 1;
            if page_milestone(page, total) {
                progress.emit(ProgressEvent::PageProcessed {
                    method: Method::Lopdf,
                    page,
                    total,
                });
            }
        }

        Ok(segments)
    }
}
