use crate::Method;

/// Progress events emitted during an extraction request.
///
/// Purely observational: nothing in the control flow depends on them.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    MethodStarted {
        method: Method,
    },
    /// A page-oriented backend passed a page milestone.
    PageProcessed {
        method: Method,
        page: usize,
        total: usize,
    },
    MethodUnavailable {
        method: Method,
        detail: String,
    },
    MethodFailed {
        method: Method,
        detail: String,
    },
    /// The backend succeeded but the quality judge rejected its output.
    MethodRejected {
        method: Method,
        reason: String,
    },
    MethodAccepted {
        method: Method,
        pages: usize,
        /// Pages in the accepted result that carried no recoverable text.
        no_text_pages: usize,
        content_lines: usize,
    },
}

/// Observer for [`ProgressEvent`]s.
///
/// Injected into the orchestrator and backends per request, so logging
/// configuration is scoped to one extraction rather than process-global.
pub trait ProgressSink {
    fn emit(&self, event: ProgressEvent);
}

/// Any closure over [`ProgressEvent`] is a sink.
impl<F: Fn(ProgressEvent)> ProgressSink for F {
    fn emit(&self, event: ProgressEvent) {
        self(event)
    }
}

/// A sink that discards every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}

/// A sink that forwards events to `tracing`, producing the operational
/// log lines (method start, page progress, failure reasons, acceptance).
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::MethodStarted { method } => {
                tracing::info!(%method, "trying extraction method");
            }
            ProgressEvent::PageProcessed {
                method,
                page,
                total,
            } => {
                tracing::info!(%method, "  progress: {}/{} pages", page, total);
            }
            ProgressEvent::MethodUnavailable { method, detail } => {
                tracing::error!(%method, "backend not available: {}", detail);
            }
            ProgressEvent::MethodFailed { method, detail } => {
                tracing::error!(%method, "extraction failed: {}", detail);
            }
            ProgressEvent::MethodRejected { method, reason } => {
                tracing::warn!(%method, "output rejected ({}), trying next method", reason);
            }
            ProgressEvent::MethodAccepted {
                method,
                pages,
                no_text_pages,
                content_lines,
            } => {
                if no_text_pages > 0 {
                    tracing::warn!(
                        %method,
                        "extraction accepted, but {} of {} pages had no text",
                        no_text_pages,
                        pages
                    );
                } else {
                    tracing::info!(%method, pages, content_lines, "extraction accepted");
                }
            }
        }
    }
}

/// Whether page `page` of `total` is a reporting milestone: every 10th
/// page, plus the final page.
pub fn page_milestone(page: usize, total: usize) -> bool {
    page % 10 == 0 || page == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tenth_page_is_a_milestone() {
        assert!(page_milestone(10, 95));
        assert!(page_milestone(20, 95));
        assert!(!page_milestone(11, 95));
        assert!(!page_milestone(9, 95));
    }

    #[test]
    fn final_page_is_a_milestone() {
        assert!(page_milestone(95, 95));
        assert!(page_milestone(3, 3));
        assert!(page_milestone(1, 1));
    }

    #[test]
    fn closures_are_sinks() {
        let seen = std::cell::RefCell::new(Vec::new());
        let sink = |event: ProgressEvent| seen.borrow_mut().push(format!("{:?}", event));
        sink.emit(ProgressEvent::MethodStarted {
            method: Method::Lopdf,
        });
        assert_eq!(seen.borrow().len(), 1);
    }
}
