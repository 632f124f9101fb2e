//! Charts module - Renderer-neutral chart description and renderers

mod layout;
mod plotter;
mod renderer;

use std::path::PathBuf;
use thiserror::Error;

use crate::data::ViewError;

pub use layout::{
    format_day, format_percent, format_value, step_points, ChartData, FieldFormat, LegendCorner,
    Rgb, ScatterPoint, ScatterSpec, TeamSeries, TooltipField, WinRacePanel, DOCUMENT_TITLE,
};
pub use plotter::{
    nearest_point, points_in_box, ChartPlotter, PlotLine, PlotPanel, PointState, ScatterResponse,
    HOVER_RADIUS,
};
pub use renderer::{Document, DocumentFormat, StaticChartRenderer};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("View error: {0}")]
    View(#[from] ViewError),
    #[error("Unsupported document format: {} (expected .png or .svg)", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Window error: {0}")]
    Window(String),
}

/// Something that turns a [`ChartData`] into a visible document.
pub trait Renderer {
    type Output;

    fn render(&mut self, chart: ChartData) -> Result<Self::Output, RenderError>;
}
