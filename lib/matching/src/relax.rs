//! Progressive filter relaxation
//!
//! A search never dead-ends on an overly specific filter: when a query
//! comes back empty the next soft clause is dropped and the catalog is
//! asked again. Each attempt runs against its own filter snapshot.

use crate::config::SearchConfig;
use gemmatch_core::{CatalogFilter, CatalogItem, CatalogQuery, ClauseKind, Result};
use serde::Serialize;

/// One filter snapshot in a relaxation sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelaxationStep {
    /// Clause removed to reach this snapshot; `None` for the initial filter
    pub dropped: Option<ClauseKind>,
    pub filter: CatalogFilter,
}

/// Result of a relaxation search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Matches of the first non-empty attempt, newest first
    pub items: Vec<CatalogItem>,
    /// Number of catalog queries issued
    pub attempts: usize,
    /// Clauses dropped before `items` were found, in drop order
    pub relaxed: Vec<ClauseKind>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RelaxationSearch {
    config: SearchConfig,
}

impl RelaxationSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn candidate_limit(&self) -> usize {
        self.config.candidate_limit
    }

    /// The filter snapshots tried, in order.
    ///
    /// Only clauses present in `filter` produce a step, so consecutive
    /// snapshots always differ. The last snapshot keeps only the clauses
    /// that are never relaxed.
    pub fn steps(filter: &CatalogFilter) -> Vec<RelaxationStep> {
        let mut steps = vec![RelaxationStep {
            dropped: None,
            filter: filter.clone(),
        }];

        let mut current = filter.clone();
        for kind in ClauseKind::RELAXATION_ORDER {
            if current.contains(kind) {
                current = current.without(kind);
                steps.push(RelaxationStep {
                    dropped: Some(kind),
                    filter: current.clone(),
                });
            }
        }
        steps
    }

    /// Query `catalog` with progressively weaker filters.
    ///
    /// Stops at the first attempt that returns anything. A catalog error
    /// aborts the search immediately and is not retried. Exhausting every
    /// step without a match is a normal, empty outcome.
    pub fn search<C>(&self, filter: &CatalogFilter, catalog: &C) -> Result<SearchOutcome>
    where
        C: CatalogQuery + ?Sized,
    {
        let steps = Self::steps(filter);
        let mut relaxed = Vec::new();

        for (attempt, step) in steps.iter().enumerate() {
            if let Some(kind) = step.dropped {
                tracing::debug!(clause = %kind, "no matches, relaxing filter");
                relaxed.push(kind);
            }

            let items = catalog.query(&step.filter, self.config.candidate_limit)?;
            tracing::debug!(
                attempt = attempt + 1,
                clauses = ?step.filter.kinds(),
                found = items.len(),
                "relaxation attempt"
            );

            if !items.is_empty() {
                return Ok(SearchOutcome {
                    items,
                    attempts: attempt + 1,
                    relaxed,
                });
            }
        }

        tracing::warn!(attempts = steps.len(), "no catalog items found after all relaxations");
        Ok(SearchOutcome {
            items: Vec::new(),
            attempts: steps.len(),
            relaxed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemmatch_core::{
        CatalogFilterBuilder, Category, ColorLabel, Error, Filter, Gender, Material, Occasion,
        PreferenceVector, Style,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        items: Vec<CatalogItem>,
        calls: AtomicUsize,
    }

    impl CountingCatalog {
        fn new(items: Vec<CatalogItem>) -> Self {
            Self { items, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogQuery for CountingCatalog {
        fn query(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CatalogItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .items
                .iter()
                .filter(|item| filter.matches(item))
                .take(limit)
                .cloned()
                .collect())
        }
    }

    struct UnavailableCatalog {
        calls: AtomicUsize,
    }

    impl CatalogQuery for UnavailableCatalog {
        fn query(&self, _filter: &CatalogFilter, _limit: usize) -> Result<Vec<CatalogItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::CatalogUnavailable("connection refused".to_string()))
        }
    }

    fn full_preferences() -> PreferenceVector {
        PreferenceVector::new()
            .with_budget(50_000.0)
            .with_style(Style::Modern)
            .with_occasion(Occasion::Party)
            .with_category(Category::Ring)
            .with_material(Material::Silver)
            .with_gender(Gender::Women)
            .with_colors([ColorLabel::Blue])
    }

    fn ring() -> CatalogItem {
        CatalogItem::new("r1", "Solitaire", 30_000.0, Category::Ring)
            .with_styles([Style::Modern])
            .with_occasions([Occasion::Party])
            .with_materials([Material::Silver])
            .with_gender(Gender::Women)
    }

    #[test]
    fn test_steps_follow_relaxation_order() {
        let filter = CatalogFilterBuilder::build(&full_preferences());
        let steps = RelaxationSearch::steps(&filter);

        let dropped: Vec<_> = steps.iter().map(|s| s.dropped).collect();
        assert_eq!(
            dropped,
            vec![
                None,
                Some(ClauseKind::Color),
                Some(ClauseKind::Material),
                Some(ClauseKind::Occasion),
                Some(ClauseKind::Style),
                Some(ClauseKind::Category),
                Some(ClauseKind::Gender),
            ]
        );
        let last = &steps.last().unwrap().filter;
        assert_eq!(last.kinds(), vec![ClauseKind::InStock, ClauseKind::Price]);
        // snapshots are independent of each other
        assert_eq!(steps[0].filter, filter);
    }

    #[test]
    fn test_steps_skip_absent_clauses() {
        let prefs = PreferenceVector::new().with_style(Style::Fusion);
        let steps = RelaxationSearch::steps(&CatalogFilterBuilder::build(&prefs));
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].dropped, Some(ClauseKind::Style));

        let steps = RelaxationSearch::steps(&CatalogFilter::in_stock());
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_dropping_color_takes_two_attempts() {
        // ring has no colors, so only the color clause blocks it
        let catalog = CountingCatalog::new(vec![ring()]);
        let filter = CatalogFilterBuilder::build(&full_preferences());

        let outcome = RelaxationSearch::default().search(&filter, &catalog).unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.relaxed, vec![ClauseKind::Color]);
        assert_eq!(catalog.calls(), 2);
    }

    #[test]
    fn test_first_attempt_hit() {
        let catalog = CountingCatalog::new(vec![ring().with_colors([ColorLabel::Silver])]);
        let filter = CatalogFilterBuilder::build(&full_preferences());

        let outcome = RelaxationSearch::default().search(&filter, &catalog).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.relaxed.is_empty());
    }

    #[test]
    fn test_price_is_never_relaxed() {
        let mut pricey = ring();
        pricey.price = 90_000.0;
        let catalog = CountingCatalog::new(vec![pricey]);
        let filter = CatalogFilterBuilder::build(&full_preferences());

        let outcome = RelaxationSearch::default().search(&filter, &catalog).unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.attempts, 7);
        assert_eq!(catalog.calls(), 7);
    }

    #[test]
    fn test_gender_relaxed_last() {
        let men_only = ring().with_gender(Gender::Men).with_styles([Style::Traditional]);
        let catalog = CountingCatalog::new(vec![men_only]);
        let filter = CatalogFilterBuilder::build(&full_preferences());

        let outcome = RelaxationSearch::default().search(&filter, &catalog).unwrap();
        assert_eq!(outcome.attempts, 7);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.relaxed.last(), Some(&ClauseKind::Gender));
    }

    #[test]
    fn test_candidate_limit() {
        let items: Vec<_> = (0..30)
            .map(|i| {
                let mut item = ring();
                item.id = format!("r{}", i);
                item
            })
            .collect();
        let catalog = CountingCatalog::new(items);

        let outcome = RelaxationSearch::default()
            .search(&CatalogFilter::in_stock(), &catalog)
            .unwrap();
        assert_eq!(outcome.items.len(), 20);
    }

    #[test]
    fn test_catalog_error_is_fatal_and_not_retried() {
        let catalog = UnavailableCatalog { calls: AtomicUsize::new(0) };
        let filter = CatalogFilterBuilder::build(&full_preferences());

        let result = RelaxationSearch::default().search(&filter, &catalog);
        assert!(matches!(result, Err(Error::CatalogUnavailable(_))));
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }
}
