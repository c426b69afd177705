use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Cannot compute a statistic over an empty group")]
    EmptyGroup,
    #[error("Insufficient data for a linear fit")]
    InsufficientData,
    #[error("All x values are identical, slope is undefined")]
    DegenerateFit,
}

pub type Result<T> = std::result::Result<T, StatsError>;

/// Mean and median of one group of observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistic {
    pub mean: f64,
    pub median: f64,
}

impl SummaryStatistic {
    pub fn of(values: &[f64]) -> Result<Self> {
        Ok(Self {
            mean: mean(values)?,
            median: median(values)?,
        })
    }
}

/// Degree-1 least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Legend text such as `(Production Cost) = -12.30 + 0.01(Year)`.
    pub fn equation(&self, y_name: &str, x_name: &str) -> String {
        format!(
            "({y_name}) = {:.2} + {:.2}({x_name})",
            self.intercept, self.slope
        )
    }
}

pub fn mean(values: &[f64]) -> Result<f64> {
    ArrayView1::from(values).mean().ok_or(StatsError::EmptyGroup)
}

/// Median of `values`. Works on a sorted copy; the caller's slice is left
/// in its original order.
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptyGroup);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Ordinary least squares over `(x, y)` pairs.
pub fn linear_fit(points: &[(f64, f64)]) -> Result<LinearFit> {
    if points.len() < 2 {
        return Err(StatsError::InsufficientData);
    }
    let x: Array1<f64> = points.iter().map(|&(x, _)| x).collect();
    let y: Array1<f64> = points.iter().map(|&(_, y)| y).collect();

    let x_mean = x.mean().ok_or(StatsError::InsufficientData)?;
    let y_mean = y.mean().ok_or(StatsError::InsufficientData)?;
    let dx = &x - x_mean;
    let dy = &y - y_mean;

    let sxx = dx.dot(&dx);
    if sxx == 0.0 {
        return Err(StatsError::DegenerateFit);
    }
    let slope = dx.dot(&dy) / sxx;

    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}
