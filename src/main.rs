use anyhow::{Context, Result};
use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};

use movie_insights::analysis::runner::{GenreReport, MovieAnalyzer};
use movie_insights::analysis::summary::{BudgetTrend, RuntimeProfit};
use movie_insights::config::Config;
use movie_insights::render::{BarChart, BoxPlotChart, ChartRenderer, ScatterChart, SvgChartRenderer};

const CONFIG_PATH: &str = "config/analysis.yaml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration, falling back to built-in defaults
    let config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH).with_context(|| format!("loading {CONFIG_PATH}"))?
    } else {
        info!("No {CONFIG_PATH} found, using default configuration");
        Config::default()
    };
    debug!("Configuration: {config:?}");

    // Get data file path from command line or use the configured one
    let data_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.input_path.clone());
    println!("Loading movies from: {}", data_path.display());

    let units = config.units;
    let renderer = SvgChartRenderer::new(&config.output_dir, config.chart);
    let analyzer = MovieAnalyzer::new(config);

    println!("\n=== Production Costs Over Time ===");
    let trend = analyzer
        .budget_over_time(&data_path)
        .context("budget over time analysis failed")?;
    print_budget_trend(&trend);
    renderer.scatter(&ScatterChart::budget_over_time(&trend, units.display))?;

    println!("\n=== Runtime vs Global Profit ===");
    let averages = analyzer
        .profit_by_runtime(&data_path)
        .context("profit by runtime analysis failed")?;
    print_runtime_profit(&averages);
    renderer.bar(&BarChart::profit_by_runtime(&averages, units.profit_summary))?;

    println!("\n=== Worldwide Gross by Genre ===");
    let report = analyzer
        .gross_by_genre(&data_path)
        .context("gross by genre analysis failed")?;
    print_genre_report(&report);
    renderer.box_plot(&BoxPlotChart::gross_by_genre(&report, units.display))?;

    Ok(())
}

fn print_budget_trend(trend: &BudgetTrend) {
    println!("Movies with budget and year: {}", trend.points.len());
    println!("Slope: {:.4} per year", trend.fit.slope);
    println!("Intercept: {:.4}", trend.fit.intercept);
    println!("{}", trend.fit.equation("Production Cost", "Year"));
}

fn print_runtime_profit(averages: &[RuntimeProfit]) {
    println!("\n{:<15} {:>15}", "Runtime", "Avg Profit");
    println!("{:-<31}", "");
    for average in averages {
        println!("{:<15} {:>15.2}", average.label, average.average_profit);
    }
}

fn print_genre_report(report: &GenreReport) {
    println!(
        "\n{:<12} {:>8} {:>10} {:>10}",
        "Genre", "Movies", "Mean", "Median"
    );
    println!("{:-<43}", "");
    for (name, stat) in &report.summary.groups {
        let count = report.groups.get(name).map_or(0, <[f64]>::len);
        println!(
            "{:<12} {:>8} {:>10.3} {:>10.3}",
            name, count, stat.mean, stat.median
        );
    }
    println!();
}
