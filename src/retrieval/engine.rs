// Retrieval engine: ranked token-overlap search over a catalog snapshot
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, ComplexityLevel};
use crate::errors::{ForgeError, Result};
use crate::index::{tokenize, CatalogSnapshot};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};

/// Characters of description carried into a search hit summary
const SUMMARY_CHARS: usize = 200;

/// Search parameters for retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of results to return
    pub top_k: usize,
    /// Optional exact solution-area filter
    pub area: Option<String>,
    /// Optional exact complexity filter (e.g. "L300")
    pub complexity: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: 5,
            area: None,
            complexity: None,
        }
    }
}

/// Entry summary returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub solution_area: String,
    pub technical_complexity: ComplexityLevel,
    /// Truncated description
    pub summary: String,
    pub services: Vec<String>,
    /// Normalized relevance in [0, 1]
    pub score: f64,
}

/// Ranked retrieval over an immutable catalog snapshot.
///
/// Scoring counts distinct query tokens hitting each candidate, normalized by
/// the distinct query token count. No term-frequency weighting; ties break by
/// catalog insertion order so a fixed catalog and query always produce the
/// same ordered result.
pub struct Retriever {
    snapshot: Arc<CatalogSnapshot>,
    telemetry: Option<TelemetryCollector>,
}

impl Retriever {
    /// Create a retriever over a snapshot
    pub fn new(snapshot: Arc<CatalogSnapshot>) -> Self {
        Self {
            snapshot,
            telemetry: None,
        }
    }

    /// Attach a telemetry collector
    pub fn with_telemetry(mut self, collector: TelemetryCollector) -> Self {
        self.telemetry = Some(collector);
        self
    }

    /// The snapshot this retriever reads from
    pub fn snapshot(&self) -> &Arc<CatalogSnapshot> {
        &self.snapshot
    }

    /// Rank catalog entries against a query, honoring the filters.
    ///
    /// Returns at most `top_k` entries with nonzero score, best first. An
    /// empty or stop-word-only query yields an empty result, not an error.
    pub fn search(&self, query: &str, params: &SearchParams) -> Result<Vec<SearchHit>> {
        let ranked = self.top_entries(query, params)?;
        Ok(ranked
            .into_iter()
            .map(|(entry, score)| SearchHit {
                id: entry.id.clone(),
                name: entry.name.clone(),
                solution_area: entry.solution_area.clone(),
                technical_complexity: entry.technical_complexity,
                summary: entry.summary(SUMMARY_CHARS),
                services: entry.products_and_services.clone(),
                score,
            })
            .collect())
    }

    /// Borrowing variant of [`Retriever::search`] used by the synthesis and
    /// context layers.
    pub fn top_entries(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<(&CatalogEntry, f64)>> {
        if params.top_k == 0 {
            return Err(ForgeError::InvalidArgument {
                name: "top_k",
                reason: "must be at least 1".to_string(),
            });
        }

        let ranked = self.rank(query, params.area.as_deref(), params.complexity.as_deref());
        Ok(ranked
            .into_iter()
            .take(params.top_k)
            .map(|(position, score)| {
                let entry = self
                    .snapshot
                    .store()
                    .entry_at(position)
                    .expect("ranked position is always in range");
                (entry, score)
            })
            .collect())
    }

    /// Best single match for a query, preferring the filtered candidate set.
    ///
    /// Falls back to an unfiltered search when the filtered search comes up
    /// empty. The composite synthesizer deliberately does NOT use this
    /// fallback; a context block from a neighboring area is still useful,
    /// a composite component from the wrong area is not.
    pub fn best_match(
        &self,
        query: &str,
        area: Option<&str>,
        complexity: Option<&str>,
    ) -> Option<(&CatalogEntry, f64)> {
        let filtered = self.rank(query, area, complexity);
        if let Some(&(position, score)) = filtered.first() {
            let entry = self.snapshot.store().entry_at(position)?;
            return Some((entry, score));
        }

        if area.is_none() && complexity.is_none() {
            return None;
        }

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(TelemetryEvent::FilterFallback {
                area: area.map(str::to_string),
            });
        }

        let unfiltered = self.rank(query, None, None);
        let &(position, score) = unfiltered.first()?;
        let entry = self.snapshot.store().entry_at(position)?;
        Some((entry, score))
    }

    /// Score all candidates, best first.
    ///
    /// Candidate selection from the metadata indices happens before scoring;
    /// zero-score entries are never included.
    fn rank(
        &self,
        query: &str,
        area: Option<&str>,
        complexity: Option<&str>,
    ) -> Vec<(usize, f64)> {
        let query_tokens: BTreeSet<String> = tokenize(query).into_iter().collect();
        let index = self.snapshot.index();
        let allowed = index.filter_candidates(area, complexity);

        let candidate_count = match &allowed {
            Some(set) => set.len(),
            None => index.entry_count(),
        };

        let mut hit_counts: HashMap<usize, usize> = HashMap::new();
        for token in &query_tokens {
            if let Some(positions) = index.postings(token) {
                for &position in positions {
                    let permitted = match &allowed {
                        Some(set) => set.contains(&position),
                        None => true,
                    };
                    if permitted {
                        *hit_counts.entry(position).or_insert(0) += 1;
                    }
                }
            }
        }

        let mut ranked: Vec<(usize, usize)> = hit_counts.into_iter().collect();
        // Score descending, then catalog insertion order for stable ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let denominator = query_tokens.len();
        let scored: Vec<(usize, f64)> = ranked
            .into_iter()
            .map(|(position, hits)| (position, hits as f64 / denominator as f64))
            .collect();

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(TelemetryEvent::SearchCompleted {
                query_tokens: denominator,
                candidates: candidate_count,
                results: scored.len(),
            });
        }

        scored
    }
}
