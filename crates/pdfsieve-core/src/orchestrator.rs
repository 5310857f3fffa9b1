use std::fmt;

use crate::backend::{BackendError, ExtractionBackend};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::quality::{QualityPolicy, Verdict};
use crate::validate::PdfDocument;
use crate::{Extraction, Method};

/// Which backend(s) an extraction request may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSelector {
    /// Try the full priority list, in order.
    Auto,
    /// Use exactly this method; no fallback.
    Only(Method),
}

/// Why one backend attempt did not produce the accepted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The capability is missing from the runtime environment.
    Unavailable(String),
    /// The capability is present but parsing raised an error.
    Failed(String),
    /// The backend succeeded but its output failed the quality judge.
    LowQuality(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Unavailable(detail) => write!(f, "unavailable: {}", detail),
            FailureReason::Failed(detail) => write!(f, "failed: {}", detail),
            FailureReason::LowQuality(detail) => write!(f, "low quality: {}", detail),
        }
    }
}

/// The recorded outcome of one backend attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub method: Method,
    pub reason: FailureReason,
}

/// Terminal failure: every candidate backend was exhausted without an
/// accepted result. Carries one record per backend actually attempted so
/// the caller can present actionable diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateFailure {
    pub attempts: Vec<AttemptFailure>,
}

impl std::error::Error for AggregateFailure {}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return f.write_str("no extraction method was attempted");
        }
        write!(f, "all extraction methods exhausted: ")?;
        for (i, attempt) in self.attempts.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", attempt.method, attempt.reason)?;
        }
        Ok(())
    }
}

/// The fallback orchestrator: owns the ordered backend list and the
/// acceptance policy, drives each backend in turn, and returns the first
/// accepted result.
///
/// Backends run strictly sequentially and each is attempted exactly once
/// per request; later methods are expensive fallbacks, not candidates for
/// speculative parallel execution.
pub struct Extractor {
    backends: Vec<Box<dyn ExtractionBackend>>,
    policy: QualityPolicy,
}

impl Extractor {
    /// Build an orchestrator over `backends`, whose order defines
    /// fallback priority, with the default acceptance policy.
    pub fn new(backends: Vec<Box<dyn ExtractionBackend>>) -> Self {
        Self {
            backends,
            policy: QualityPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: QualityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &QualityPolicy {
        &self.policy
    }

    /// Methods this extractor will consider, in priority order.
    pub fn methods(&self) -> Vec<Method> {
        self.backends.iter().map(|b| b.method()).collect()
    }

    /// Run the fallback loop over `doc`.
    ///
    /// For each candidate (all of them under [`MethodSelector::Auto`],
    /// exactly one under [`MethodSelector::Only`]): invoke the backend;
    /// record unavailability or failure and continue; on success consult
    /// the quality judge; return the first accepted result with its
    /// provenance, or an [`AggregateFailure`] carrying every recorded
    /// reason once the candidates are exhausted.
    pub fn extract(
        &self,
        doc: &PdfDocument,
        selector: MethodSelector,
        progress: &dyn ProgressSink,
    ) -> Result<Extraction, AggregateFailure> {
        let mut attempts = Vec::new();

        for backend in &self.backends {
            let method = backend.method();
            if let MethodSelector::Only(only) = selector {
                if method != only {
                    continue;
                }
            }

            progress.emit(ProgressEvent::MethodStarted { method });

            let segments = match backend.extract(doc, progress) {
                Ok(segments) => segments,
                Err(BackendError::Unavailable(detail)) => {
                    progress.emit(ProgressEvent::MethodUnavailable {
                        method,
                        detail: detail.clone(),
                    });
                    attempts.push(AttemptFailure {
                        method,
                        reason: FailureReason::Unavailable(detail),
                    });
                    continue;
                }
                Err(BackendError::Extraction(detail)) => {
                    progress.emit(ProgressEvent::MethodFailed {
                        method,
                        detail: detail.clone(),
                    });
                    attempts.push(AttemptFailure {
                        method,
                        reason: FailureReason::Failed(detail),
                    });
                    continue;
                }
            };

            let extraction = Extraction::new(method, segments);
            match self.policy.judge(&extraction) {
                Verdict::Accepted { content_lines } => {
                    progress.emit(ProgressEvent::MethodAccepted {
                        method,
                        pages: extraction.segments.len(),
                        no_text_pages: extraction
                            .segments
                            .iter()
                            .filter(|s| s.text.is_none())
                            .count(),
                        content_lines,
                    });
                    return Ok(extraction);
                }
                Verdict::Rejected { reason } => {
                    let reason = reason.to_string();
                    progress.emit(ProgressEvent::MethodRejected {
                        method,
                        reason: reason.clone(),
                    });
                    attempts.push(AttemptFailure {
                        method,
                        reason: FailureReason::LowQuality(reason),
                    });
                }
            }
        }

        Err(AggregateFailure { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_failure_lists_every_reason() {
        let failure = AggregateFailure {
            attempts: vec![
                AttemptFailure {
                    method: Method::Pdfium,
                    reason: FailureReason::Unavailable("libpdfium not found".into()),
                },
                AttemptFailure {
                    method: Method::Lopdf,
                    reason: FailureReason::Failed("corrupt xref table".into()),
                },
                AttemptFailure {
                    method: Method::PdfExtract,
                    reason: FailureReason::LowQuality("empty output".into()),
                },
            ],
        };
        let message = failure.to_string();
        assert!(message.contains("pdfium unavailable: libpdfium not found"));
        assert!(message.contains("lopdf failed: corrupt xref table"));
        assert!(message.contains("pdf-extract low quality: empty output"));
    }

    #[test]
    fn empty_aggregate_failure_renders() {
        let failure = AggregateFailure { attempts: vec![] };
        assert_eq!(failure.to_string(), "no extraction method was attempted");
    }
}
