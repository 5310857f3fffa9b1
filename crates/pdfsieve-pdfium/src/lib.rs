use pdfium_render::prelude::*;

use pdfsieve_core::progress::{ProgressEvent, ProgressSink, page_milestone};
use pdfsieve_core::{
    BackendError, ExtractionBackend, Method, PageLabel, PageSegment, PdfDocument,
};

/// Pdfium-based implementation of [`ExtractionBackend`].
///
/// This crate isolates the pdfium-render dependency: libpdfium is a
/// native library bound at runtime, so this is the one backend that can
/// be genuinely unavailable rather than merely failing. The binding is
/// attempted per extraction request, first next to the executable and
/// then in the system library path. A bind failure is reported as
/// [`BackendError::Unavailable`] with install guidance, which the
/// orchestrator records separately from parse errors.
#[derive(Debug, Default)]
pub struct PdfiumBackend {
    /// Directory to probe for the pdfium library before the system path.
    /// Default: the current directory.
    library_dir: Option<String>,
}

impl PdfiumBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `dir` for the platform's pdfium library before falling back
    /// to the system library path.
    pub fn with_library_dir(mut self, dir: impl Into<String>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }

    fn bind(&self) -> Result<Pdfium, BackendError> {
        let dir = self.library_dir.as_deref().unwrap_or("./");
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| {
                BackendError::Unavailable(format!(
                    "pdfium library could not be loaded ({}); install libpdfium or place the \
                     platform library next to the executable",
                    e
                ))
            })?;
        Ok(Pdfium::new(bindings))
    }
}

impl ExtractionBackend for PdfiumBackend {
    fn method(&self) -> Method {
        Method::Pdfium
    }

    fn extract(
        &self,
        doc: &PdfDocument,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<PageSegment>, BackendError> {
        let pdfium = self.bind()?;

        let document = pdfium
            .load_pdf_from_file(doc.path(), None)
            .map_err(|e| BackendError::Extraction(format!("failed to open PDF: {:?}", e)))?;

        let total = document.pages().len() as usize;
        let mut segments = Vec::with_capacity(total);

        for (i, page) in document.pages().iter().enumerate() {
            let text = page
                .text()
                .map(|t| t.all())
                .map_err(|e| {
                    BackendError::Extraction(format!(
                        "failed to extract page {}: {:?}",
                        i + 1,
                        e
                    ))
                })?;
            segments.push(PageSegment::with_text(PageLabel::Number(i + 1), &text));

            let page_no = i + 1;
            if page_milestone(page_no, total) {
                progress.emit(ProgressEvent::PageProcessed {
                    method: Method::Pdfium,
                    page: page_no,
                    total,
                });
            }
        }

        Ok(segments)
    }
}
