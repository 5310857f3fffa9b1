use std::fmt;

use crate::Extraction;

/// Default minimum number of content lines an acceptable result must
/// exceed.
pub const DEFAULT_MIN_CONTENT_LINES: usize = 5;

/// Why the judge rejected a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No segments at all.
    Empty,
    /// Non-empty, but too little real content (e.g. every page reported
    /// as "no text", or only a handful of stray lines).
    TooFewContentLines { found: usize, required: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Empty => f.write_str("empty output"),
            RejectReason::TooFewContentLines { found, required } => {
                write!(f, "only {} content lines (need more than {})", found, required)
            }
        }
    }
}

/// Acceptance verdict for one extraction result. Consumed immediately by
/// the orchestrator; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted { content_lines: usize },
    Rejected { reason: RejectReason },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Content-density acceptance policy.
///
/// A heuristic, not a semantic check: it exists to reject results that
/// are technically non-empty but contain only page-boundary markers.
/// Documents whose genuine content is shorter than the threshold are
/// falsely rejected; callers for whom that matters should lower
/// `min_content_lines`.
#[derive(Debug, Clone, Copy)]
pub struct QualityPolicy {
    min_content_lines: usize,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            min_content_lines: DEFAULT_MIN_CONTENT_LINES,
        }
    }
}

impl QualityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the content-line threshold. Acceptance requires strictly
    /// more than this many content lines.
    pub fn with_min_content_lines(mut self, min: usize) -> Self {
        self.min_content_lines = min;
        self
    }

    pub fn min_content_lines(&self) -> usize {
        self.min_content_lines
    }

    /// Judge whether `extraction` is good enough to accept.
    ///
    /// Counts lines of segment text that are non-empty after trimming
    /// (page-boundary markers are rendering, not segment text, so a
    /// result where every page is "no text" counts zero).
    pub fn judge(&self, extraction: &Extraction) -> Verdict {
        if extraction.segments.is_empty() {
            return Verdict::Rejected {
                reason: RejectReason::Empty,
            };
        }

        let content_lines = extraction.content_line_count();
        if content_lines > self.min_content_lines {
            Verdict::Accepted { content_lines }
        } else {
            Verdict::Rejected {
                reason: RejectReason::TooFewContentLines {
                    found: content_lines,
                    required: self.min_content_lines,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Method, PageLabel, PageSegment};

    fn extraction_with_lines(count: usize) -> Extraction {
        let text = (0..count)
            .map(|i| format!("content line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        Extraction::new(
            Method::Lopdf,
            vec![PageSegment::with_text(PageLabel::Number(1), &text)],
        )
    }

    #[test]
    fn empty_result_rejected() {
        let extraction = Extraction::new(Method::Lopdf, vec![]);
        assert_eq!(
            QualityPolicy::default().judge(&extraction),
            Verdict::Rejected {
                reason: RejectReason::Empty
            }
        );
    }

    #[test]
    fn whitespace_only_result_rejected() {
        // with_text normalizes whitespace-only pages to no-text segments
        let extraction = Extraction::new(
            Method::Lopdf,
            vec![PageSegment::with_text(PageLabel::Number(1), "   \n\t\n")],
        );
        assert_eq!(
            QualityPolicy::default().judge(&extraction),
            Verdict::Rejected {
                reason: RejectReason::TooFewContentLines {
                    found: 0,
                    required: 5
                }
            }
        );
    }

    #[test]
    fn marker_only_result_rejected_by_threshold() {
        // every page reported as "no text": non-empty, zero content lines
        let extraction = Extraction::new(
            Method::Lopdf,
            (1..=3).map(|n| PageSegment::no_text(PageLabel::Number(n))).collect(),
        );
        assert_eq!(
            QualityPolicy::default().judge(&extraction),
            Verdict::Rejected {
                reason: RejectReason::TooFewContentLines {
                    found: 0,
                    required: 5
                }
            }
        );
    }

    #[test]
    fn exactly_five_content_lines_rejected() {
        let verdict = QualityPolicy::default().judge(&extraction_with_lines(5));
        assert_eq!(
            verdict,
            Verdict::Rejected {
                reason: RejectReason::TooFewContentLines {
                    found: 5,
                    required: 5
                }
            }
        );
    }

    #[test]
    fn exactly_six_content_lines_accepted() {
        let verdict = QualityPolicy::default().judge(&extraction_with_lines(6));
        assert_eq!(verdict, Verdict::Accepted { content_lines: 6 });
    }

    #[test]
    fn blank_lines_do_not_count() {
        let extraction = Extraction::new(
            Method::Lopdf,
            vec![PageSegment::with_text(
                PageLabel::Number(1),
                "a\n\nb\n   \nc\n\nd\ne\nf",
            )],
        );
        assert_eq!(
            QualityPolicy::default().judge(&extraction),
            Verdict::Accepted { content_lines: 6 }
        );
    }

    #[test]
    fn threshold_is_configurable() {
        let policy = QualityPolicy::new().with_min_content_lines(0);
        assert!(policy.judge(&extraction_with_lines(1)).is_accepted());

        let strict = QualityPolicy::new().with_min_content_lines(100);
        assert!(!strict.judge(&extraction_with_lines(50)).is_accepted());
    }

    #[test]
    fn reject_reasons_render() {
        assert_eq!(RejectReason::Empty.to_string(), "empty output");
        assert_eq!(
            RejectReason::TooFewContentLines {
                found: 2,
                required: 5
            }
            .to_string(),
            "only 2 content lines (need more than 5)"
        );
    }
}
