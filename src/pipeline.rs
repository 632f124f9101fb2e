//! Pipeline Module
//! Composes the stages: load -> aggregate -> build views -> render.

use crate::charts::{ChartData, RenderError, Renderer};
use crate::data::loader::DEFAULT_DATE_FORMAT;
use crate::data::{
    AggregateError, Aggregator, DataLoader, DataPaths, LoaderError, Tables, ThreePointTable,
    ViewError, MIN_THREE_POINT_ATTEMPTS,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, info_span};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inputs of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub paths: DataPaths,
    pub date_format: String,
    pub min_attempts: i64,
}

impl PipelineConfig {
    /// Default file names and settings for a data directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            paths: DataPaths::from_dir(dir),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            min_attempts: MIN_THREE_POINT_ATTEMPTS,
        }
    }
}

/// Everything derived before rendering.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub tables: Tables,
    pub summary: ThreePointTable,
    pub chart: ChartData,
}

/// Load the season files and derive the chart description.
pub fn prepare(config: &PipelineConfig) -> Result<Prepared, PipelineError> {
    let _span = info_span!("prepare").entered();

    let tables = DataLoader::with_date_format(&config.date_format).load_all(&config.paths)?;
    let summary = Aggregator::new(config.min_attempts).aggregate_three_point(&tables.players)?;
    let chart = ChartData::nba_season(&tables, &summary)?;

    info!(
        standings = tables.standings.height(),
        shooters = summary.len(),
        views = chart.views.len(),
        "dashboard data ready"
    );

    Ok(Prepared {
        tables,
        summary,
        chart,
    })
}

/// Hand the chart description to a renderer.
pub fn render<R: Renderer>(chart: ChartData, renderer: &mut R) -> Result<R::Output, RenderError> {
    renderer.render(chart)
}

/// Write the summary rows as a pretty JSON array. Returns the row count.
pub fn write_summary_json(summary: &ThreePointTable, path: &Path) -> Result<usize, PipelineError> {
    let rows = summary.summaries()?;
    let json = serde_json::to_string_pretty(&rows)?;
    fs::write(path, json).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "wrote summary json");
    Ok(rows.len())
}
