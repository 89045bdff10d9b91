//! The recommendation pipeline
//!
//! image bytes → dominant colors → preferences → filter → relaxation search
//! → scoring → ranked list.

use crate::config::{ConfigError, RecommenderConfig};
use crate::explain::RecommendationSummary;
use crate::relax::RelaxationSearch;
use crate::request::{RecommendationRequest, RequestDefaults};
use crate::scoring::{ScoredItem, ScoringEngine};
use gemmatch_core::{
    BudgetCeilings, CatalogFilterBuilder, CatalogQuery, ColorLabel, PreferenceVector, Result,
    ThumbnailDecoder,
};
use serde::Serialize;

/// Ranked recommendations for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub dominant_colors: Vec<ColorLabel>,
    pub recommendations: Vec<ScoredItem>,
    pub preferences: PreferenceVector,
    pub summary: RecommendationSummary,
}

/// Matching engine bound to a catalog
pub struct Recommender<C> {
    catalog: C,
    decoder: ThumbnailDecoder,
    search: RelaxationSearch,
    scorer: ScoringEngine,
    budgets: BudgetCeilings,
}

impl<C: CatalogQuery> Recommender<C> {
    pub fn new(catalog: C, config: RecommenderConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            decoder: ThumbnailDecoder::new(config.thumbnail),
            search: RelaxationSearch::new(config.search),
            scorer: ScoringEngine::from_validated(config.scoring),
            budgets: config.budgets,
        })
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn scorer(&self) -> &ScoringEngine {
        &self.scorer
    }

    pub fn budgets(&self) -> &BudgetCeilings {
        &self.budgets
    }

    /// Dominant colors of an uploaded image; never fails
    pub fn dominant_colors(&self, image: &[u8]) -> Vec<ColorLabel> {
        self.decoder.dominant_colors(image)
    }

    /// Normalize a raw request, extracting colors from `image` if given
    pub fn preferences(
        &self,
        request: &RecommendationRequest,
        defaults: &RequestDefaults,
        image: Option<&[u8]>,
    ) -> PreferenceVector {
        let colors = image.map(|bytes| self.dominant_colors(bytes)).unwrap_or_default();
        request.normalize(defaults, &self.budgets, colors)
    }

    /// Rank catalog items for normalized preferences.
    ///
    /// Only a catalog failure is an error; finding nothing is an empty,
    /// successful result.
    pub fn recommend(&self, prefs: &PreferenceVector) -> Result<Recommendation> {
        let filter = CatalogFilterBuilder::build(prefs);
        let outcome = self.search.search(&filter, &self.catalog)?;
        let recommendations = self.scorer.rank(outcome.items.clone(), prefs);
        let summary = RecommendationSummary::compute(&outcome, &recommendations);

        tracing::info!(
            colors = ?prefs.colors,
            candidates = summary.candidates_count,
            attempts = summary.attempts,
            returned = summary.results_count,
            best_score = summary.best_score,
            "recommendations computed"
        );

        Ok(Recommendation {
            dominant_colors: prefs.colors.clone(),
            recommendations,
            preferences: prefs.clone(),
            summary,
        })
    }

    /// Normalize `request` and rank catalog items for it
    pub fn handle(
        &self,
        request: &RecommendationRequest,
        defaults: &RequestDefaults,
        image: Option<&[u8]>,
    ) -> Result<Recommendation> {
        let prefs = self.preferences(request, defaults, image);
        self.recommend(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use gemmatch_core::{
        CatalogFilter, CatalogItem, Category, Error, Filter, Gender, Material, Occasion, Style,
    };

    struct VecCatalog(Vec<CatalogItem>);

    impl CatalogQuery for VecCatalog {
        fn query(&self, filter: &CatalogFilter, limit: usize) -> Result<Vec<CatalogItem>> {
            Ok(self.0.iter().filter(|i| filter.matches(i)).take(limit).cloned().collect())
        }
    }

    struct Offline;

    impl CatalogQuery for Offline {
        fn query(&self, _: &CatalogFilter, _: usize) -> Result<Vec<CatalogItem>> {
            Err(Error::CatalogUnavailable("offline".to_string()))
        }
    }

    fn catalog() -> VecCatalog {
        VecCatalog(vec![
            CatalogItem::new("1", "Gold hoops", 20_000.0, Category::Earrings)
                .with_styles([Style::Modern])
                .with_occasions([Occasion::Daily])
                .with_materials([Material::Gold])
                .with_colors([ColorLabel::Red]),
            CatalogItem::new("2", "Silver chain", 8_000.0, Category::Necklace)
                .with_styles([Style::Minimalist])
                .with_occasions([Occasion::Office])
                .with_materials([Material::Silver])
                .with_colors([ColorLabel::Silver])
                .with_gender(Gender::Men),
        ])
    }

    #[test]
    fn test_recommend_reference_item() {
        let recommender = Recommender::new(catalog(), RecommenderConfig::default()).unwrap();
        let prefs = PreferenceVector::new()
            .with_style(Style::Modern)
            .with_occasion(Occasion::Daily)
            .with_material(Material::Gold)
            .with_gender(Gender::Women)
            .with_colors([ColorLabel::Red])
            .with_budget(50_000.0);

        let result = recommender.recommend(&prefs).unwrap();
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].item.id, "1");
        assert_eq!(result.recommendations[0].score, 96.0);
        assert_eq!(result.summary.attempts, 1);
        assert_eq!(result.dominant_colors, vec![ColorLabel::Red]);
    }

    #[test]
    fn test_relaxes_until_found() {
        let recommender = Recommender::new(catalog(), RecommenderConfig::default()).unwrap();
        let prefs = PreferenceVector::new()
            .with_style(Style::Fusion)
            .with_colors([ColorLabel::Teal]);

        let result = recommender.recommend(&prefs).unwrap();
        assert_eq!(result.summary.attempts, 3);
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn test_empty_result_is_ok() {
        let recommender = Recommender::new(catalog(), RecommenderConfig::default()).unwrap();
        let prefs = PreferenceVector::new().with_budget(100.0);

        let result = recommender.recommend(&prefs).unwrap();
        assert!(result.recommendations.is_empty());
        assert_eq!(result.summary.results_count, 0);
    }

    #[test]
    fn test_catalog_failure_propagates() {
        let recommender = Recommender::new(Offline, RecommenderConfig::default()).unwrap();
        let result = recommender.recommend(&PreferenceVector::new());
        assert!(matches!(result, Err(Error::CatalogUnavailable(_))));
    }

    #[test]
    fn test_undecodable_image_degrades_to_neutral() {
        let recommender = Recommender::new(catalog(), RecommenderConfig::default()).unwrap();
        let result = recommender
            .handle(
                &RecommendationRequest::default(),
                &RequestDefaults::analyze(),
                Some(&b"definitely not a png"[..]),
            )
            .unwrap();

        assert_eq!(result.dominant_colors, vec![ColorLabel::Neutral]);
        assert_eq!(result.preferences.budget, Some(50_000.0));
        // neutral has no complements and no item is neutral, so color is relaxed
        assert!(result.summary.attempts >= 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RecommenderConfig::default();
        config.scoring.default_budget = 0.0;
        assert!(Recommender::new(catalog(), config).is_err());
    }

    #[test]
    fn test_every_config_section_checked() {
        let mut config = RecommenderConfig::default();
        config.search.candidate_limit = 0;
        assert!(matches!(
            Recommender::new(catalog(), config),
            Err(ConfigError::ZeroCandidateLimit)
        ));

        let mut config = RecommenderConfig::default();
        config.scoring.weights.style = -1.0;
        assert!(matches!(
            Recommender::new(catalog(), config),
            Err(ConfigError::NegativeWeight(_))
        ));

        let recommender = Recommender::new(catalog(), RecommenderConfig::default()).unwrap();
        assert_eq!(recommender.scorer().config(), &ScoringConfig::default());
    }
}
