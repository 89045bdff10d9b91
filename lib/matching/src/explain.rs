//! Summaries of a recommendation run

use crate::relax::SearchOutcome;
use crate::scoring::{ScoreComponent, ScoredItem};
use gemmatch_core::ClauseKind;
use serde::Serialize;

/// Summary statistics for one recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    /// Candidates returned by the successful query attempt
    pub candidates_count: usize,
    /// Catalog queries issued
    pub attempts: usize,
    /// Filter clauses given up to find candidates
    pub relaxed: Vec<ClauseKind>,
    /// Number of results returned
    pub results_count: usize,
    pub best_score: f64,
    pub avg_score: f64,
    /// Component that contributed most to the best result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_component: Option<ScoreComponent>,
}

impl RecommendationSummary {
    /// `results` must already be ranked
    pub fn compute(outcome: &SearchOutcome, results: &[ScoredItem]) -> Self {
        let (best_score, avg_score, top_component) = match results.first() {
            None => (0.0, 0.0, None),
            Some(best) => {
                let avg = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
                (best.score, avg, best.breakdown.top_component())
            }
        };

        Self {
            candidates_count: outcome.items.len(),
            attempts: outcome.attempts,
            relaxed: outcome.relaxed.clone(),
            results_count: results.len(),
            best_score,
            avg_score,
            top_component,
        }
    }
}
