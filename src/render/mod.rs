//! Chart rendering for the three analyses.
//!
//! The analyses only produce numbers; a [`ChartRenderer`] turns them into an
//! image file. [`SvgChartRenderer`] is the bundled implementation.

pub mod svg;

use std::path::PathBuf;
use thiserror::Error;

use crate::analysis::runner::GenreReport;
use crate::analysis::statistics::{LinearFit, SummaryStatistic};
use crate::analysis::summary::{BudgetTrend, RuntimeProfit};
use crate::types::CurrencyUnit;

pub use svg::SvgChartRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Nothing to draw for chart {0:?}")]
    EmptyChart(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Scatter series with a fitted line.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
    pub points: Vec<(f64, f64)>,
    pub fit: LinearFit,
    pub fit_label: String,
}

impl ScatterChart {
    pub fn budget_over_time(trend: &BudgetTrend, unit: CurrencyUnit) -> Self {
        Self {
            title: "Movie Production Costs Over Time".to_string(),
            x_label: "Year".to_string(),
            y_label: format!("Production Costs (in {})", unit.axis_label()),
            series_label: "Production Costs".to_string(),
            points: trend.xy(),
            fit: trend.fit,
            fit_label: trend.fit.equation("Production Cost", "Year"),
        }
    }
}

/// Ordered `(label, value)` bars.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    pub fn profit_by_runtime(averages: &[RuntimeProfit], unit: CurrencyUnit) -> Self {
        Self {
            title: "Runtime vs Global Profit Averages".to_string(),
            x_label: "Runtime Range".to_string(),
            y_label: format!("Global Profit (in {})", unit.axis_label()),
            bars: averages
                .iter()
                .map(|a| (a.label.clone(), a.average_profit))
                .collect(),
        }
    }
}

/// One box per named group, with the group mean marked.
#[derive(Debug, Clone)]
pub struct BoxPlotChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub groups: Vec<(String, Vec<f64>)>,
    pub summary: Vec<(String, SummaryStatistic)>,
}

impl BoxPlotChart {
    pub fn gross_by_genre(report: &GenreReport, unit: CurrencyUnit) -> Self {
        Self {
            title: "Worldwide Gross by Genre".to_string(),
            x_label: "Genre".to_string(),
            y_label: format!("Global Gross (in {})", unit.axis_label()),
            groups: report
                .groups
                .iter()
                .map(|(name, values)| (name.to_string(), values.to_vec()))
                .collect(),
            summary: report.summary.groups.clone(),
        }
    }
}

pub trait ChartRenderer {
    /// Each method returns the path of the written image.
    fn scatter(&self, chart: &ScatterChart) -> Result<PathBuf>;
    fn bar(&self, chart: &BarChart) -> Result<PathBuf>;
    fn box_plot(&self, chart: &BoxPlotChart) -> Result<PathBuf>;
}
