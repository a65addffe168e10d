use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for replacement activity.
/// Uses atomic operations so one replacer can be shared across threads.
#[derive(Debug, Default)]
pub struct ReplacerMetrics {
    /// Documents written to an output stream
    pub documents_processed: AtomicUsize,
    /// Documents refused because of diagnostics or bad arguments
    pub documents_rejected: AtomicUsize,
    /// Text nodes whose content was rewritten
    pub text_nodes_rewritten: AtomicUsize,
    /// Individual token occurrences replaced
    pub tokens_replaced: AtomicUsize,
}

impl ReplacerMetrics {
    /// Create new replacer metrics
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_processed(&self) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.documents_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one rewritten text node and the occurrences replaced in it
    pub fn record_rewrite(&self, occurrences: usize) {
        self.text_nodes_rewritten.fetch_add(1, Ordering::Relaxed);
        self.tokens_replaced.fetch_add(occurrences, Ordering::Relaxed);
    }

    pub fn get_processed(&self) -> usize {
        self.documents_processed.load(Ordering::Relaxed)
    }

    pub fn get_rejected(&self) -> usize {
        self.documents_rejected.load(Ordering::Relaxed)
    }

    pub fn get_text_nodes_rewritten(&self) -> usize {
        self.text_nodes_rewritten.load(Ordering::Relaxed)
    }

    pub fn get_tokens_replaced(&self) -> usize {
        self.tokens_replaced.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.documents_processed.store(0, Ordering::Relaxed);
        self.documents_rejected.store(0, Ordering::Relaxed);
        self.text_nodes_rewritten.store(0, Ordering::Relaxed);
        self.tokens_replaced.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacer_metrics() {
        let metrics = ReplacerMetrics::new();
        metrics.increment_processed();
        metrics.increment_rejected();
        metrics.record_rewrite(3);
        metrics.record_rewrite(1);

        assert_eq!(metrics.get_processed(), 1);
        assert_eq!(metrics.get_rejected(), 1);
        assert_eq!(metrics.get_text_nodes_rewritten(), 2);
        assert_eq!(metrics.get_tokens_replaced(), 4);

        metrics.reset();
        assert_eq!(metrics.get_processed(), 0);
        assert_eq!(metrics.get_tokens_replaced(), 0);
    }
}
