//! Telemetry for the retrieval and synthesis engines.
//!
//! In-process event collection with aggregate statistics. Partial
//! compositions are flagged on the returned lab and recorded here so a
//! serving layer can surface them.

use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    /// A catalog snapshot was indexed
    CatalogIndexed {
        entries: usize,
        distinct_tokens: usize,
    },
    /// A search ran to completion
    SearchCompleted {
        query_tokens: usize,
        candidates: usize,
        results: usize,
    },
    /// The single-entry path fell back to an unfiltered search
    FilterFallback { area: Option<String> },
    /// A composition found fewer components than requested
    CompositionPartial { requested: usize, found: usize },
    /// A composition completed
    CompositionCompleted {
        components: usize,
        duration_hours: f64,
    },
}

/// Aggregate statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub catalogs_indexed: usize,
    pub searches: usize,
    pub empty_searches: usize,
    pub filter_fallbacks: usize,
    pub compositions: usize,
    pub partial_compositions: usize,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = self.stats.lock().unwrap();
            match &event {
                TelemetryEvent::CatalogIndexed { .. } => {
                    stats.catalogs_indexed += 1;
                }
                TelemetryEvent::SearchCompleted { results, .. } => {
                    stats.searches += 1;
                    if *results == 0 {
                        stats.empty_searches += 1;
                    }
                }
                TelemetryEvent::FilterFallback { .. } => {
                    stats.filter_fallbacks += 1;
                }
                TelemetryEvent::CompositionPartial { .. } => {
                    stats.partial_compositions += 1;
                }
                TelemetryEvent::CompositionCompleted { .. } => {
                    stats.compositions += 1;
                }
            }
        }

        let mut events = self.events.lock().unwrap();
        events.push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        self.stats.lock().unwrap().clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = self.events.lock().unwrap();
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}
