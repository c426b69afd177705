pub mod loader;
pub mod normalize;
pub mod schema;

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::types::Field;

/// Release year and production budget of one movie, budget in the display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetRecord {
    pub release_year: i32,
    pub production_budget: f64,
}

/// Runtime in minutes and profit in base currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitRecord {
    pub runtime_minutes: f64,
    pub profit: f64,
}

/// Worldwide gross observations grouped by genre, in declared group order.
#[derive(Debug, Clone)]
pub struct GenreGroups {
    order: Vec<String>,
    values: HashMap<String, Vec<f64>>,
}

impl GenreGroups {
    /// Creates empty groups for each focus genre followed by the catch-all group.
    pub fn new(focus: &[String], other: &str) -> Self {
        let mut order: Vec<String> = focus.to_vec();
        if !order.iter().any(|g| g == other) {
            order.push(other.to_string());
        }
        let values = order.iter().map(|g| (g.clone(), Vec::new())).collect();
        Self { order, values }
    }

    /// Appends to `group`. A group not declared up front is added after the
    /// existing ones.
    pub fn push(&mut self, group: &str, gross: f64) {
        match self.values.get_mut(group) {
            Some(values) => values.push(gross),
            None => {
                self.order.push(group.to_string());
                self.values.insert(group.to_string(), vec![gross]);
            }
        }
    }

    pub fn get(&self, group: &str) -> Option<&[f64]> {
        self.values.get(group).map(Vec::as_slice)
    }

    pub fn group_names(&self) -> &[String] {
        &self.order
    }

    /// Iterates groups in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.values[name].as_slice()))
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: row has {len} fields, {field} needs offset -{offset}")]
    OutOfRange {
        line: u64,
        field: Field,
        offset: usize,
        len: usize,
    },
    #[error("Line {line}: malformed {field} value {value:?}")]
    MalformedValue {
        line: u64,
        field: Field,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, DataError>;
