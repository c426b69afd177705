use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker used by the dataset for a missing value.
pub const MISSING_VALUE: &str = "NA";

/// Semantic columns the analyses read from a movie row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ReleaseYear,
    ProductionCost,
    WorldwideGross,
    Genre,
    Runtime,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::ReleaseYear => "release year",
            Field::ProductionCost => "production cost",
            Field::WorldwideGross => "worldwide gross",
            Field::Genre => "genre",
            Field::Runtime => "runtime",
        };
        f.write_str(name)
    }
}

/// Scale a monetary amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyUnit {
    Base,
    Millions,
    HundredMillions,
}

impl CurrencyUnit {
    pub fn divisor(self) -> f64 {
        match self {
            CurrencyUnit::Base => 1.0,
            CurrencyUnit::Millions => 1e6,
            CurrencyUnit::HundredMillions => 1e8,
        }
    }

    /// Convert an amount in base currency units into this unit.
    pub fn rescale(self, amount: f64) -> f64 {
        amount / self.divisor()
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            CurrencyUnit::Base => "USD",
            CurrencyUnit::Millions => "millions of USD",
            CurrencyUnit::HundredMillions => "100 millions of USD",
        }
    }
}
