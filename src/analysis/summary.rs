use serde::Serialize;

use super::buckets::RuntimeBucket;
use super::statistics::{linear_fit, LinearFit, StatsError, SummaryStatistic};
use super::{AnalysisError, Result};
use crate::data::{BudgetRecord, GenreGroups};
use crate::types::CurrencyUnit;

/// Production budgets by release year with their least-squares trend.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetTrend {
    pub points: Vec<BudgetRecord>,
    pub fit: LinearFit,
}

impl BudgetTrend {
    pub fn xy(&self) -> Vec<(f64, f64)> {
        year_budget_pairs(&self.points)
    }
}

fn year_budget_pairs(points: &[BudgetRecord]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (f64::from(p.release_year), p.production_budget))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeProfit {
    pub label: String,
    pub average_profit: f64,
}

/// Mean and median worldwide gross per genre group, in group order.
#[derive(Debug, Clone, Serialize)]
pub struct GenreSummary {
    pub groups: Vec<(String, SummaryStatistic)>,
}

impl GenreSummary {
    pub fn get(&self, group: &str) -> Option<&SummaryStatistic> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, stat)| stat)
    }
}

fn empty_group(name: &str, err: StatsError) -> AnalysisError {
    match err {
        StatsError::EmptyGroup => AnalysisError::EmptyGroup(name.to_string()),
        other => AnalysisError::Stats(other),
    }
}

/// Turns parser and aggregator output into the figures handed to a chart.
#[derive(Debug, Clone, Copy)]
pub struct SummaryBuilder {
    profit_unit: CurrencyUnit,
}

impl SummaryBuilder {
    /// `profit_unit` is the unit average profits are reported in. Bucket
    /// sums arrive in base currency units.
    pub fn new(profit_unit: CurrencyUnit) -> Self {
        Self { profit_unit }
    }

    pub fn budget_trend(&self, points: Vec<BudgetRecord>) -> Result<BudgetTrend> {
        let fit = linear_fit(&year_budget_pairs(&points))?;
        Ok(BudgetTrend { points, fit })
    }

    /// Average profit per bucket in declared order. An empty bucket is an
    /// error rather than a silent zero.
    pub fn runtime_profit(&self, buckets: &[RuntimeBucket]) -> Result<Vec<RuntimeProfit>> {
        buckets
            .iter()
            .map(|bucket| {
                if bucket.occurrence_count == 0 {
                    return Err(AnalysisError::EmptyGroup(bucket.label()));
                }
                let average = bucket.profit_sum / bucket.occurrence_count as f64;
                Ok(RuntimeProfit {
                    label: bucket.label(),
                    average_profit: self.profit_unit.rescale(average),
                })
            })
            .collect()
    }

    pub fn genre_summary(&self, groups: &GenreGroups) -> Result<GenreSummary> {
        let groups = groups
            .iter()
            .map(|(name, values)| {
                SummaryStatistic::of(values)
                    .map(|stat| (name.to_string(), stat))
                    .map_err(|e| empty_group(name, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(GenreSummary { groups })
    }
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::new(CurrencyUnit::Millions)
    }
}
