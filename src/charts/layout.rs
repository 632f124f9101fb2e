//! Chart Layout Module
//! Renderer-neutral description of the dashboard: data sources, team views,
//! panel settings and tooltip fields. Every renderer draws from this.

use crate::data::aggregator::{ATTEMPTS, MAKES, NAME, PERCENTAGE};
use crate::data::loader::{date_from_days, days_from_date};
use crate::data::{build_views, DataSource, Tables, ThreePointTable, ViewError, Views};

pub const DOCUMENT_TITLE: &str = "Interactive Data Visualization on 2017/2018 NBA Season";

/// Plain RGB color, converted by each renderer into its own color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const ROYAL_BLUE: Rgb = Rgb::new(65, 105, 225);
pub const DEEP_SKY_BLUE: Rgb = Rgb::new(0, 191, 255);
pub const LIGHT_GRAY: Rgb = Rgb::new(211, 211, 211);

/// A team line: which view to draw and how to label it.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeries {
    pub code: String,
    pub label: String,
    pub color: Rgb,
}

impl TeamSeries {
    pub fn new(code: &str, label: &str, color: Rgb) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// One tab of the win-race chart.
#[derive(Debug, Clone)]
pub struct WinRacePanel {
    pub tab_label: String,
    pub title: String,
    pub series: Vec<TeamSeries>,
    pub width: u32,
    pub height: u32,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendCorner,
}

/// Attempts-vs-percentage scatter settings.
#[derive(Debug, Clone)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_column: String,
    pub y_column: String,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
    pub selection_color: Rgb,
    pub nonselection_color: Rgb,
    pub nonselection_alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Text,
    Integer,
    /// Fraction shown as a percentage with one decimal.
    Percent,
}

/// One line of the scatter hover tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipField {
    pub label: String,
    pub column: String,
    pub format: FieldFormat,
}

impl TooltipField {
    pub fn new(label: &str, column: &str, format: FieldFormat) -> Self {
        Self {
            label: label.to_string(),
            column: column.to_string(),
            format,
        }
    }
}

/// A scatter point with the source row it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

impl ScatterPoint {
    pub fn new(row: usize, x: f64, y: f64) -> Self {
        Self { row, x, y }
    }
}

/// Everything a renderer needs to draw the dashboard.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub standings: DataSource,
    pub views: Views,
    pub panels: Vec<WinRacePanel>,
    pub three_point: DataSource,
    pub scatter: ScatterSpec,
    pub tooltip: Vec<TooltipField>,
}

impl ChartData {
    /// The season dashboard: Western then Eastern conference tabs, plus the
    /// three-point scatter.
    pub fn nba_season(tables: &Tables, summary: &ThreePointTable) -> Result<Self, ViewError> {
        let standings = DataSource::new("standings", tables.standings.clone());
        let three_point = DataSource::new("three_takers", summary.dataframe().clone());

        let panels = vec![
            Self::win_race_panel(
                "Western Conference",
                "Win Race from Top 2 Seed Western Conference 2017/2018 NBA Season",
                vec![
                    TeamSeries::new("HOU", "Rockets", Rgb::new(0xCE, 0x11, 0x41)),
                    TeamSeries::new("GS", "Warriors", Rgb::new(0x00, 0x6B, 0xB6)),
                ],
            ),
            Self::win_race_panel(
                "Eastern Conference",
                "Win Race from Top 2 Seed Eastern Conference 2017/2018 NBA Season",
                vec![
                    TeamSeries::new("BOS", "Celtics", Rgb::new(0x00, 0x7A, 0x33)),
                    TeamSeries::new("TOR", "Raptors", Rgb::new(0xCE, 0x11, 0x41)),
                ],
            ),
        ];

        let codes: Vec<&str> = panels
            .iter()
            .flat_map(|p| p.series.iter().map(|s| s.code.as_str()))
            .collect();
        let views = build_views(&standings, &codes)?;

        let scatter = ScatterSpec {
            title: "3PT Shots Attempted vs. Percentage Made (min. 100 3PA), 2017-18 NBA Season"
                .to_string(),
            x_label: "Three-Point Shots Attempted".to_string(),
            y_label: "Percentage Made".to_string(),
            x_column: ATTEMPTS.to_string(),
            y_column: PERCENTAGE.to_string(),
            width: 600,
            height: 400,
            color: ROYAL_BLUE,
            selection_color: DEEP_SKY_BLUE,
            nonselection_color: LIGHT_GRAY,
            nonselection_alpha: 0.3,
        };

        let tooltip = vec![
            TooltipField::new("Player", NAME, FieldFormat::Text),
            TooltipField::new("Three-Pointers Made", MAKES, FieldFormat::Integer),
            TooltipField::new("Three-Pointers Attempted", ATTEMPTS, FieldFormat::Integer),
            TooltipField::new("Three-Point Percentage", PERCENTAGE, FieldFormat::Percent),
        ];

        Ok(Self {
            title: DOCUMENT_TITLE.to_string(),
            standings,
            views,
            panels,
            three_point,
            scatter,
            tooltip,
        })
    }

    fn win_race_panel(tab_label: &str, title: &str, series: Vec<TeamSeries>) -> WinRacePanel {
        WinRacePanel {
            tab_label: tab_label.to_string(),
            title: title.to_string(),
            series,
            width: 800,
            height: 300,
            x_label: "Date".to_string(),
            y_label: "Wins".to_string(),
            legend: LegendCorner::TopLeft,
        }
    }

    /// Step-line vertices for each team of a panel, x in days since the epoch.
    pub fn panel_lines(
        &self,
        panel: &WinRacePanel,
    ) -> Result<Vec<(TeamSeries, Vec<[f64; 2]>)>, ViewError> {
        let mut lines = Vec::with_capacity(panel.series.len());
        for series in &panel.series {
            let points: Vec<[f64; 2]> = match self.views.get(&series.code) {
                Some(view) => view
                    .series(&self.standings)?
                    .iter()
                    .map(|p| [days_from_date(p.date) as f64, p.wins])
                    .collect(),
                None => Vec::new(),
            };
            lines.push((series.clone(), step_points(&points)));
        }
        Ok(lines)
    }

    /// Scatter coordinates; rows with a missing value are skipped.
    pub fn scatter_points(&self) -> Result<Vec<ScatterPoint>, ViewError> {
        let xs = self.three_point.f64_values(&self.scatter.x_column)?;
        let ys = self.three_point.f64_values(&self.scatter.y_column)?;

        Ok(xs
            .into_iter()
            .zip(ys)
            .enumerate()
            .filter_map(|(row, (x, y))| Some(ScatterPoint::new(row, x?, y?)))
            .collect())
    }

    /// Tooltip `(label, value)` lines for every row of the three-point source.
    pub fn tooltip_rows(&self) -> Result<Vec<Vec<(String, String)>>, ViewError> {
        let rows = self.three_point.len();
        let mut out = vec![Vec::with_capacity(self.tooltip.len()); rows];

        for field in &self.tooltip {
            let values: Vec<String> = match field.format {
                FieldFormat::Text => self
                    .three_point
                    .text_values(&field.column)?
                    .into_iter()
                    .map(|v| v.unwrap_or_default())
                    .collect(),
                FieldFormat::Integer | FieldFormat::Percent => self
                    .three_point
                    .f64_values(&field.column)?
                    .into_iter()
                    .map(|v| v.map(|v| format_value(v, field.format)).unwrap_or_default())
                    .collect(),
            };

            for (line, value) in out.iter_mut().zip(values) {
                line.push((field.label.clone(), value));
            }
        }

        Ok(out)
    }
}

/// Step vertices where each value holds from the previous x up to its own x.
pub fn step_points(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push([points[i - 1][0], p[1]]);
        }
        out.push(*p);
    }
    out
}

pub fn format_value(value: f64, format: FieldFormat) -> String {
    match format {
        FieldFormat::Text => value.to_string(),
        FieldFormat::Integer => format!("{:.0}", value),
        FieldFormat::Percent => format_percent(value),
    }
}

/// `0.18181` -> `18.2%`, `0.09` -> `09.0%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:04.1}%", fraction * 100.0)
}

/// Axis label for a day-number coordinate.
pub fn format_day(days: f64) -> String {
    if !days.is_finite() || days.abs() > i32::MAX as f64 {
        return String::new();
    }
    date_from_days(days.round() as i32)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
