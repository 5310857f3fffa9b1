use thiserror::Error;

use crate::progress::ProgressSink;
use crate::validate::PdfDocument;
use crate::{Method, PageSegment};

/// How a backend attempt failed.
///
/// `Unavailable` means the underlying capability is missing from the
/// runtime environment (the user can fix it by installing something);
/// `Extraction` means the capability is present but parsing failed.
/// The orchestrator records the two differently in its aggregate report.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend not available: {0}")]
    Unavailable(String),
    #[error("extraction failed: {0}")]
    Extraction(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors wrap one underlying parsing capability behind a uniform
/// contract: given a validated document, produce one [`PageSegment`] per
/// page in document order (marking pages without recoverable text rather
/// than omitting them), or report a tagged failure. Selection between
/// backends lives in [`crate::orchestrator::Extractor`].
pub trait ExtractionBackend: Send + Sync {
    /// Which method this backend implements.
    fn method(&self) -> Method;

    /// Extract the per-page text of `doc`.
    ///
    /// Page-oriented implementations emit a progress observation through
    /// `progress` at page milestones (every 10th page and the final page).
    fn extract(
        &self,
        doc: &PdfDocument,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<PageSegment>, BackendError>;
}
