use std::fmt;
use std::path::Path;

use thiserror::Error;

pub mod backend;
pub mod backends;
pub mod orchestrator;
pub mod progress;
pub mod quality;
pub mod validate;

// Re-export for convenience
pub use backend::{BackendError, ExtractionBackend};
pub use orchestrator::{AggregateFailure, AttemptFailure, Extractor, FailureReason, MethodSelector};
pub use progress::{ProgressEvent, ProgressSink, TracingSink};
pub use quality::{QualityPolicy, RejectReason, Verdict};
pub use validate::{PdfDocument, ValidationError};

/// An extraction method, in fallback priority order.
///
/// Declaration order is priority order: pdfium gives the highest-fidelity
/// text when the native library is present, lopdf is the pure-Rust
/// page-oriented fallback, and pdf-extract is the layout-analysis last
/// resort without native page boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Pdfium,
    Lopdf,
    PdfExtract,
}

impl Method {
    /// The full fixed priority list used by automatic selection.
    pub fn priority_order() -> &'static [Method] {
        &[Method::Pdfium, Method::Lopdf, Method::PdfExtract]
    }

    /// User-facing name, as accepted by the CLI `-m` flag.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Pdfium => "pdfium",
            Method::Lopdf => "lopdf",
            Method::PdfExtract => "pdf-extract",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which page a segment belongs to.
///
/// `Estimated` is used by the layout-analysis backend, which has no native
/// page boundaries and synthesizes approximate breaks instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    /// 1-based page number in document order.
    Number(usize),
    /// Approximate boundary; no reliable page number exists.
    Estimated,
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Number(n) => write!(f, "{}", n),
            PageLabel::Estimated => f.write_str("estimated"),
        }
    }
}

/// The text attributed to one page (or estimated page boundary).
///
/// `text: None` means the page exists but had no recoverable text. Pages
/// are never omitted, so consumers can distinguish "no text on this page"
/// from "page missing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSegment {
    pub label: PageLabel,
    pub text: Option<String>,
}

impl PageSegment {
    /// A page with recoverable text. Trailing whitespace is trimmed so the
    /// rendered output carries exactly one terminating newline per page;
    /// text that is empty after trimming becomes a no-text segment.
    pub fn with_text(label: PageLabel, text: &str) -> Self {
        let trimmed = text.trim_end();
        if trimmed.trim().is_empty() {
            Self::no_text(label)
        } else {
            Self {
                label,
                text: Some(trimmed.to_string()),
            }
        }
    }

    /// A page with no recoverable text.
    pub fn no_text(label: PageLabel) -> Self {
        Self { label, text: None }
    }
}

/// An accepted or candidate extraction: ordered page segments plus the
/// method that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub method: Method,
    pub segments: Vec<PageSegment>,
}

impl Extraction {
    pub fn new(method: Method, segments: Vec<PageSegment>) -> Self {
        Self { method, segments }
    }

    /// Render the output text layout:
    ///
    /// ```text
    /// === Page 1 ===
    /// <text>
    /// === Page 2 === [no text]
    /// === Page estimated ===
    /// <text>
    /// ```
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match &segment.text {
                Some(text) => {
                    out.push_str(&format!("=== Page {} ===\n", segment.label));
                    out.push_str(text);
                    out.push('\n');
                }
                None => {
                    out.push_str(&format!("=== Page {} === [no text]\n", segment.label));
                }
            }
        }
        out
    }

    /// Number of lines of segment text that are non-empty after trimming.
    /// No-text pages contribute nothing.
    pub fn content_line_count(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|s| s.text.as_deref())
            .flat_map(|t| t.lines())
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Exhausted(#[from] AggregateFailure),
}

/// Validate `path` and run it through `extractor` in one call.
///
/// Convenience wrapper over [`PdfDocument::open`] + [`Extractor::extract`];
/// callers that need the validated handle (e.g. to log its size first)
/// should call the two steps themselves.
pub fn extract_text(
    path: &Path,
    extractor: &Extractor,
    selector: MethodSelector,
    progress: &dyn ProgressSink,
) -> Result<Extraction, ExtractError> {
    let doc = PdfDocument::open(path)?;
    Ok(extractor.extract(&doc, selector, progress)?)
}
