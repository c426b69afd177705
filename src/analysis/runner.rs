use log::info;
use std::path::Path;

use super::buckets::BucketAggregator;
use super::summary::{BudgetTrend, GenreSummary, RuntimeProfit, SummaryBuilder};
use super::Result;
use crate::config::Config;
use crate::data::loader::{BudgetParser, DatasetParser, GenreParser, ProfitParser};
use crate::data::normalize::UnitNormalizer;
use crate::data::GenreGroups;

/// Genre groups together with their per-group statistics.
#[derive(Debug, Clone)]
pub struct GenreReport {
    pub groups: GenreGroups,
    pub summary: GenreSummary,
}

/// Runs each of the three analyses over a movie table. Every analysis reads
/// the file on its own and shares no state with the others.
pub struct MovieAnalyzer {
    config: Config,
}

impl MovieAnalyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn normalizer(&self) -> UnitNormalizer {
        UnitNormalizer::new(self.config.units.display)
    }

    fn summaries(&self) -> SummaryBuilder {
        SummaryBuilder::new(self.config.units.profit_summary)
    }

    pub fn budget_over_time(&self, path: impl AsRef<Path>) -> Result<BudgetTrend> {
        info!("Analyzing production budget over time");
        let parser = BudgetParser::new(self.config.schema.clone(), self.normalizer());
        let points = parser.parse_path(path)?;
        self.summaries().budget_trend(points)
    }

    pub fn profit_by_runtime(&self, path: impl AsRef<Path>) -> Result<Vec<RuntimeProfit>> {
        info!("Analyzing profit by runtime");
        let mut aggregator = BucketAggregator::new(&self.config.runtime_buckets)?;
        let records = ProfitParser::new(self.config.schema.clone()).parse_path(path)?;
        aggregator.extend(&records);
        self.summaries().runtime_profit(aggregator.buckets())
    }

    pub fn gross_by_genre(&self, path: impl AsRef<Path>) -> Result<GenreReport> {
        info!("Analyzing worldwide gross by genre");
        let parser = GenreParser::new(
            self.config.schema.clone(),
            self.normalizer(),
            self.config.genres.clone(),
        );
        let groups = parser.parse_path(path)?;
        let summary = self.summaries().genre_summary(&groups)?;
        Ok(GenreReport { groups, summary })
    }
}
