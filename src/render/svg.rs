use log::info;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use super::{BarChart, BoxPlotChart, ChartRenderer, RenderError, Result, ScatterChart};
use crate::config::ChartSettings;

const BOX_COLORS: [RGBColor; 4] = [
    RGBColor(240, 128, 128),
    RGBColor(102, 205, 170),
    RGBColor(135, 206, 250),
    RGBColor(219, 112, 147),
];

fn drawing(err: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Smallest range covering `values`, padded by 5% on each side.
fn padded_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    Some((lo - pad, hi + pad))
}

/// Writes charts as SVG files named after their titles.
pub struct SvgChartRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

impl SvgChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, settings: ChartSettings) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: settings.width,
            height: settings.height,
        }
    }

    fn target(&self, title: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(format!("{title}.svg")))
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn scatter(&self, figure: &ScatterChart) -> Result<PathBuf> {
        let (x_lo, x_hi) = padded_range(figure.points.iter().map(|p| p.0))
            .ok_or_else(|| RenderError::EmptyChart(figure.title.clone()))?;
        let line = [(x_lo, figure.fit.predict(x_lo)), (x_hi, figure.fit.predict(x_hi))];
        let (y_lo, y_hi) = padded_range(
            figure.points
                .iter()
                .chain(line.iter())
                .map(|p| p.1),
        )
        .ok_or_else(|| RenderError::EmptyChart(figure.title.clone()))?;

        let path = self.target(&figure.title)?;
        draw_scatter(&path, (self.width, self.height), figure, line, (x_lo..x_hi, y_lo..y_hi))?;
        info!("Saved {}", path.display());
        Ok(path)
    }

    fn bar(&self, figure: &BarChart) -> Result<PathBuf> {
        if figure.bars.is_empty() {
            return Err(RenderError::EmptyChart(figure.title.clone()));
        }
        let (y_lo, y_hi) = padded_range(
            figure.bars
                .iter()
                .map(|(_, v)| *v)
                .chain(std::iter::once(0.0)),
        )
        .ok_or_else(|| RenderError::EmptyChart(figure.title.clone()))?;

        let path = self.target(&figure.title)?;
        draw_bars(&path, (self.width, self.height), figure, y_lo..y_hi)?;
        info!("Saved {}", path.display());
        Ok(path)
    }

    fn box_plot(&self, figure: &BoxPlotChart) -> Result<PathBuf> {
        if figure.groups.is_empty() || figure.groups.iter().any(|(_, values)| values.is_empty()) {
            return Err(RenderError::EmptyChart(figure.title.clone()));
        }
        let (y_lo, y_hi) =
            padded_range(figure.groups.iter().flat_map(|(_, values)| values.iter().copied()))
                .ok_or_else(|| RenderError::EmptyChart(figure.title.clone()))?;

        let path = self.target(&figure.title)?;
        draw_boxes(
            &path,
            (self.width, self.height),
            figure,
            y_lo as f32..y_hi as f32,
        )?;
        info!("Saved {}", path.display());
        Ok(path)
    }
}

fn draw_scatter(
    path: &Path,
    size: (u32, u32),
    figure: &ScatterChart,
    line: [(f64, f64); 2],
    (x_range, y_range): (std::ops::Range<f64>, std::ops::Range<f64>),
) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;
    {
        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(
                figure.points
                    .iter()
                    .map(|&(x, y)| Cross::new((x, y), 4, BLUE)),
            )
            .map_err(drawing)?
            .label(figure.series_label.as_str())
            .legend(|(x, y)| Cross::new((x + 10, y), 4, BLUE));
        chart
            .draw_series(LineSeries::new(line, RED))
            .map_err(drawing)?
            .label(figure.fit_label.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing)?;
    }
    root.present().map_err(drawing)?;
    Ok(())
}

fn draw_bars(
    path: &Path,
    size: (u32, u32),
    figure: &BarChart,
    y_range: std::ops::Range<f64>,
) -> Result<()> {
    let labels: Vec<&str> = figure.bars.iter().map(|(label, _)| label.as_str()).collect();
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;
    {
        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..labels.len() as u32).into_segmented(), y_range)
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels
                    .get(*i as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.mix(0.7).filled())
                    .margin(10)
                    .data(
                        figure.bars
                            .iter()
                            .enumerate()
                            .map(|(i, (_, value))| (i as u32, *value)),
                    ),
            )
            .map_err(drawing)?;
    }
    root.present().map_err(drawing)?;
    Ok(())
}

fn draw_boxes(
    path: &Path,
    size: (u32, u32),
    figure: &BoxPlotChart,
    y_range: std::ops::Range<f32>,
) -> Result<()> {
    let names: Vec<&str> = figure.groups.iter().map(|(name, _)| name.as_str()).collect();
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;
    {
        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(names[..].into_segmented(), y_range)
            .map_err(drawing)?;
        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(name) | SegmentValue::Exact(name) => name.to_string(),
                SegmentValue::Last => String::new(),
            })
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(names.iter().zip(&figure.groups).enumerate().map(
                |(i, (name, (_, values)))| {
                    let quartiles = Quartiles::new(values);
                    Boxplot::new_vertical(SegmentValue::CenterOf(name), &quartiles)
                        .width(40)
                        .whisker_width(0.5)
                        .style(BOX_COLORS[i % BOX_COLORS.len()])
                },
            ))
            .map_err(drawing)?;

        chart
            .draw_series(names.iter().filter_map(|name| {
                figure.summary
                    .iter()
                    .find(|(group, _)| group == name)
                    .map(|(_, stat)| {
                        Circle::new(
                            (SegmentValue::CenterOf(name), stat.mean as f32),
                            4,
                            BLACK.filled(),
                        )
                    })
            }))
            .map_err(drawing)?;
    }
    root.present().map_err(drawing)?;
    Ok(())
}
