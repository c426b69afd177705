use approx::assert_relative_eq;
use movie_insights::analysis::runner::MovieAnalyzer;
use movie_insights::analysis::AnalysisError;
use movie_insights::config::{Config, GenreSettings};
use movie_insights::data::DataError;
use movie_insights::render::{BarChart, BoxPlotChart, ChartRenderer, ScatterChart, SvgChartRenderer};
use std::fs;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/sample_movies.csv");

const HEADER: &str = "rank,release_date,title,url,production_cost,domestic_gross,worldwide_gross,opening_weekend,mpaa,genre,theaters,runtime,year";

#[test]
fn test_budget_over_time() {
    let analyzer = MovieAnalyzer::new(Config::default());

    let trend = analyzer
        .budget_over_time(SAMPLE)
        .expect("Failed to analyze budgets");

    // Rows with a missing year or budget are left out
    assert_eq!(trend.points.len(), 21);
    assert_eq!(trend.points[0].release_year, 2009);
    assert_relative_eq!(trend.points[0].production_budget, 2.37);
    assert_relative_eq!(trend.fit.slope, 0.042628618765259835, max_relative = 1e-9);
    assert_relative_eq!(trend.fit.intercept, -84.42501107429366, max_relative = 1e-9);
}

#[test]
fn test_profit_by_runtime() {
    let analyzer = MovieAnalyzer::new(Config::default());

    let averages = analyzer
        .profit_by_runtime(SAMPLE)
        .expect("Failed to analyze profits");

    let labels: Vec<&str> = averages.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "(70, 90)",
            "(90, 100)",
            "(100, 110)",
            "(110, 120)",
            "(120, 130)",
            "(130, 140)",
            "(140, 150)",
            "(150, 220)",
        ]
    );
    assert_relative_eq!(averages[0].average_profit, 563.815676, max_relative = 1e-9);
    assert_relative_eq!(averages[1].average_profit, 534.9296453333333, max_relative = 1e-9);
    assert_relative_eq!(averages[5].average_profit, 400.517383, max_relative = 1e-9);
    assert_relative_eq!(averages[7].average_profit, 1638.9191473333333, max_relative = 1e-9);
}

#[test]
fn test_gross_by_genre() {
    let analyzer = MovieAnalyzer::new(Config::default());

    let report = analyzer
        .gross_by_genre(SAMPLE)
        .expect("Failed to analyze genres");

    let counts: Vec<(&str, usize)> = report
        .groups
        .iter()
        .map(|(name, values)| (name, values.len()))
        .collect();
    assert_eq!(
        counts,
        [("Action", 8), ("Adventure", 3), ("Drama", 4), ("Other", 6)]
    );

    let action = report.summary.get("Action").unwrap();
    assert_relative_eq!(action.mean, 9.006786315, max_relative = 1e-9);
    assert_relative_eq!(action.median, 7.079738085, max_relative = 1e-9);
    let other = report.summary.get("Other").unwrap();
    assert_relative_eq!(other.mean, 5.388396865, max_relative = 1e-9);
    assert_relative_eq!(other.median, 5.368998785, max_relative = 1e-9);
}

#[test]
fn test_alternate_buckets_and_genres() {
    let config = Config {
        runtime_buckets: vec![(60.0, 120.0), (120.0, 240.0)],
        genres: GenreSettings {
            focus: vec!["Action".to_string()],
            other: "Everything Else".to_string(),
        },
        ..Config::default()
    };
    let analyzer = MovieAnalyzer::new(config);

    let averages = analyzer.profit_by_runtime(SAMPLE).unwrap();
    let report = analyzer.gross_by_genre(SAMPLE).unwrap();

    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].label, "(60, 120)");
    let names: Vec<&str> = report.groups.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Action", "Everything Else"]);
    assert_eq!(report.groups.get("Everything Else").unwrap().len(), 13);
}

#[test]
fn test_buckets_reported_in_declared_order() {
    let mut reversed = Config::default().runtime_buckets;
    reversed.reverse();
    let config = Config {
        runtime_buckets: reversed,
        ..Config::default()
    };

    let averages = MovieAnalyzer::new(config)
        .profit_by_runtime(SAMPLE)
        .expect("Disjoint buckets in descending order are valid");

    assert_eq!(averages.len(), 8);
    assert_eq!(averages[0].label, "(150, 220)");
    assert_eq!(averages[7].label, "(70, 90)");
    assert_relative_eq!(averages[0].average_profit, 1638.9191473333333, max_relative = 1e-9);
    assert_relative_eq!(averages[7].average_profit, 563.815676, max_relative = 1e-9);
}

#[test]
fn test_empty_bucket_aborts_analysis() {
    let config = Config {
        runtime_buckets: vec![(0.0, 60.0), (60.0, 240.0)],
        ..Config::default()
    };

    let err = MovieAnalyzer::new(config)
        .profit_by_runtime(SAMPLE)
        .unwrap_err();

    assert!(matches!(err, AnalysisError::EmptyGroup(ref name) if name == "(0, 60)"));
}

#[test]
fn test_single_movie_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.csv");
    fs::write(
        &path,
        format!(
            "{HEADER}\n1,2000-01-01,One,url,1000000,5,5000000,7,PG,Documentary,3000,95,2000\n"
        ),
    )
    .unwrap();
    let config = Config {
        runtime_buckets: vec![(90.0, 100.0)],
        ..Config::default()
    };
    let analyzer = MovieAnalyzer::new(config);

    let averages = analyzer.profit_by_runtime(&path).unwrap();
    assert_eq!(averages.len(), 1);
    assert_relative_eq!(averages[0].average_profit, 4.0);

    // A single movie cannot fill the focus genres
    let err = analyzer.gross_by_genre(&path).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyGroup(ref name) if name == "Action"));
}

#[test]
fn test_malformed_value_aborts_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        format!("{HEADER}\n1,2000-01-01,Bad,url,1000000,5,5000000,7,PG,Drama,3000,95,two thousand\n"),
    )
    .unwrap();

    let err = MovieAnalyzer::new(Config::default())
        .budget_over_time(&path)
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Data(DataError::MalformedValue { line: 2, .. })
    ));
}

#[test]
fn test_missing_input_file() {
    let err = MovieAnalyzer::new(Config::default())
        .gross_by_genre("tests/data/no_such_file.csv")
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Data(DataError::Io(_))));
}

#[test]
fn test_render_all_charts() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let units = config.units;
    let renderer = SvgChartRenderer::new(dir.path(), config.chart);
    let analyzer = MovieAnalyzer::new(config);

    let trend = analyzer.budget_over_time(SAMPLE).unwrap();
    let averages = analyzer.profit_by_runtime(SAMPLE).unwrap();
    let report = analyzer.gross_by_genre(SAMPLE).unwrap();

    let written = [
        renderer
            .scatter(&ScatterChart::budget_over_time(&trend, units.display))
            .unwrap(),
        renderer
            .bar(&BarChart::profit_by_runtime(&averages, units.profit_summary))
            .unwrap(),
        renderer
            .box_plot(&BoxPlotChart::gross_by_genre(&report, units.display))
            .unwrap(),
    ];

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "Movie Production Costs Over Time.svg",
            "Runtime vs Global Profit Averages.svg",
            "Worldwide Gross by Genre.svg",
        ]
    );
    for path in &written {
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
}
