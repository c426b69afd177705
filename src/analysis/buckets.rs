use serde::Serialize;
use std::cmp::Ordering;

use super::{AnalysisError, Result};
use crate::data::ProfitRecord;

/// One `(low, high]` runtime range with its running totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeBucket {
    pub low: f64,
    pub high: f64,
    pub occurrence_count: usize,
    pub profit_sum: f64,
}

impl RuntimeBucket {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            occurrence_count: 0,
            profit_sum: 0.0,
        }
    }

    pub fn contains(&self, runtime: f64) -> bool {
        self.low < runtime && runtime <= self.high
    }

    pub fn label(&self) -> String {
        format!("({}, {})", self.low, self.high)
    }
}

/// Accumulates observations into a fixed, ordered set of disjoint buckets.
#[derive(Debug, Clone)]
pub struct BucketAggregator {
    buckets: Vec<RuntimeBucket>,
}

impl BucketAggregator {
    /// Bounds must be pairwise disjoint, each with `low < high`. They may be
    /// declared in any order; that order is kept for reporting.
    pub fn new(bounds: &[(f64, f64)]) -> Result<Self> {
        for &(low, high) in bounds {
            if low.partial_cmp(&high) != Some(Ordering::Less) {
                return Err(AnalysisError::InvalidBuckets(format!(
                    "bucket ({low}, {high}] is empty"
                )));
            }
        }
        let mut sorted = bounds.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in sorted.windows(2) {
            let ((prev_low, prev_high), (next_low, next_high)) = (pair[0], pair[1]);
            if next_low < prev_high {
                return Err(AnalysisError::InvalidBuckets(format!(
                    "buckets ({prev_low}, {prev_high}] and ({next_low}, {next_high}] overlap"
                )));
            }
        }

        Ok(Self {
            buckets: bounds
                .iter()
                .map(|&(low, high)| RuntimeBucket::new(low, high))
                .collect(),
        })
    }

    /// Adds one observation. Returns `false` when no bucket covers the
    /// runtime and the observation is dropped.
    pub fn add(&mut self, runtime: f64, profit: f64) -> bool {
        match self.buckets.iter_mut().find(|b| b.contains(runtime)) {
            Some(bucket) => {
                bucket.occurrence_count += 1;
                bucket.profit_sum += profit;
                true
            }
            None => false,
        }
    }

    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a ProfitRecord>) {
        for record in records {
            self.add(record.runtime_minutes, record.profit);
        }
    }

    pub fn buckets(&self) -> &[RuntimeBucket] {
        &self.buckets
    }
}
