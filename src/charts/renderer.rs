//! Static Chart Renderer
//! Draws the dashboard into a single PNG or SVG document with plotters.
//!
//! Layout, top to bottom:
//! 1. Document title
//! 2. One win-race step chart per tab (tabs are stacked, a file has no tab bar)
//! 3. Three-point scatter, percentage axis formatted like the tooltip

use crate::charts::{
    format_day, format_percent, ChartData, LegendCorner, RenderError, Renderer, Rgb,
    ScatterPoint, ScatterSpec, TeamSeries, WinRacePanel,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

const FONT: &str = "sans-serif";
const TITLE_HEIGHT: u32 = 40;
const SECTION_GAP: u32 = 10;
const MARKER_HALF_SIZE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Png,
    Svg,
}

impl DocumentFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

/// A written dashboard file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

pub struct StaticChartRenderer {
    output: PathBuf,
}

impl StaticChartRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    /// Canvas wide enough for the widest chart, tall enough for all of them.
    pub fn canvas_size(chart: &ChartData) -> (u32, u32) {
        let width = chart
            .panels
            .iter()
            .map(|p| p.width)
            .chain(std::iter::once(chart.scatter.width))
            .max()
            .unwrap_or(800);
        let height = TITLE_HEIGHT
            + chart
                .panels
                .iter()
                .map(|p| p.height + SECTION_GAP)
                .sum::<u32>()
            + chart.scatter.height;
        (width, height)
    }
}

impl Renderer for StaticChartRenderer {
    type Output = Document;

    fn render(&mut self, chart: ChartData) -> Result<Document, RenderError> {
        let format =
            DocumentFormat::from_path(&self.output).ok_or_else(|| RenderError::UnsupportedFormat {
                path: self.output.clone(),
            })?;
        let size = Self::canvas_size(&chart);

        match format {
            DocumentFormat::Png => {
                let root = BitMapBackend::new(&self.output, size).into_drawing_area();
                draw_document(&root, &chart)?;
                root.present().map_err(drawing)?;
            }
            DocumentFormat::Svg => {
                let root = SVGBackend::new(&self.output, size).into_drawing_area();
                draw_document(&root, &chart)?;
                root.present().map_err(drawing)?;
            }
        }

        info!(path = %self.output.display(), ?format, "wrote chart document");
        Ok(Document {
            path: self.output.clone(),
            format,
        })
    }
}

fn draw_document<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartData,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(drawing)?;
    let mut rest = root.titled(&chart.title, (FONT, 22)).map_err(drawing)?;

    for panel in &chart.panels {
        let (area, below) = rest.split_vertically(panel.height as i32);
        let (area, _) = area.split_horizontally(panel.width as i32);
        let lines = chart.panel_lines(panel)?;
        draw_win_race(&area, panel, &lines)?;
        rest = below.margin(SECTION_GAP as i32, 0, 0, 0);
    }

    let (area, _) = rest.split_horizontally(chart.scatter.width as i32);
    draw_scatter(&area, &chart.scatter, &chart.scatter_points()?)
}

fn draw_win_race<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &WinRacePanel,
    lines: &[(TeamSeries, Vec<[f64; 2]>)],
) -> Result<(), RenderError> {
    let (x_range, y_range) = win_bounds(lines);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 15))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_label_formatter(&|x| format_day(*x))
        .draw()
        .map_err(drawing)?;

    for (series, points) in lines {
        let color = rgb(series.color);
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p[0], p[1])),
                color.stroke_width(2),
            ))
            .map_err(drawing)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(label_position(panel.legend))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(drawing)?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ScatterSpec,
    points: &[ScatterPoint],
) -> Result<(), RenderError> {
    let (x_range, y_range) = scatter_bounds(points);

    let mut chart = ChartBuilder::on(area)
        .caption(&spec.title, (FONT, 13))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .y_label_formatter(&|y| format_percent(*y))
        .draw()
        .map_err(drawing)?;

    let style = rgb(spec.color).filled();
    chart
        .draw_series(points.iter().map(|p| {
            EmptyElement::at((p.x, p.y))
                + Rectangle::new(
                    [
                        (-MARKER_HALF_SIZE, -MARKER_HALF_SIZE),
                        (MARKER_HALF_SIZE, MARKER_HALF_SIZE),
                    ],
                    style,
                )
        }))
        .map_err(drawing)?;

    Ok(())
}

/// Date and win ranges covering every line, padded so a flat line stays visible.
fn win_bounds(lines: &[(TeamSeries, Vec<[f64; 2]>)]) -> (Range<f64>, Range<f64>) {
    let points = lines.iter().flat_map(|(_, pts)| pts.iter());
    let (x_min, x_max, y_max) = points.fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0f64),
        |(x0, x1, y1), p| (x0.min(p[0]), x1.max(p[0]), y1.max(p[1])),
    );

    if !x_min.is_finite() {
        return (0.0..1.0, 0.0..1.0);
    }
    let x_range = if x_max > x_min {
        x_min..x_max
    } else {
        (x_min - 1.0)..(x_max + 1.0)
    };
    (x_range, 0.0..(y_max * 1.05 + 1.0))
}

fn scatter_bounds(points: &[ScatterPoint]) -> (Range<f64>, Range<f64>) {
    if points.is_empty() {
        return (0.0..1.0, 0.0..1.0);
    }
    let (x_min, x_max, y_min, y_max) = points.iter().fold(
        (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ),
        |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
    );
    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let y_pad = ((y_max - y_min) * 0.05).max(0.01);
    (
        (x_min - x_pad)..(x_max + x_pad),
        (y_min - y_pad).max(0.0)..(y_max + y_pad),
    )
}

fn label_position(corner: LegendCorner) -> SeriesLabelPosition {
    match corner {
        LegendCorner::TopLeft => SeriesLabelPosition::UpperLeft,
        LegendCorner::TopRight => SeriesLabelPosition::UpperRight,
        LegendCorner::BottomLeft => SeriesLabelPosition::LowerLeft,
        LegendCorner::BottomRight => SeriesLabelPosition::LowerRight,
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn drawing<E: Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("out/dashboard.png")),
            Some(DocumentFormat::Png)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dashboard.SVG")),
            Some(DocumentFormat::Svg)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("dashboard.html")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("dashboard")), None);
    }

    #[test]
    fn test_win_bounds_pad_single_date() {
        let lines = vec![(
            TeamSeries::new("BOS", "Celtics", Rgb::new(0, 0, 0)),
            vec![[10.0, 4.0]],
        )];
        let (x, y) = win_bounds(&lines);

        assert_eq!(x, 9.0..11.0);
        assert_eq!(y.start, 0.0);
        assert!(y.end > 4.0);
    }

    #[test]
    fn test_bounds_for_empty_input() {
        assert_eq!(win_bounds(&[]), (0.0..1.0, 0.0..1.0));
        assert_eq!(scatter_bounds(&[]), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn test_scatter_bounds_contain_points() {
        let points = [
            ScatterPoint::new(0, 100.0, 0.30),
            ScatterPoint::new(1, 600.0, 0.45),
        ];
        let (x, y) = scatter_bounds(&points);

        assert!(x.start < 100.0 && x.end > 600.0);
        assert!(y.start < 0.30 && y.end > 0.45);
    }
}
