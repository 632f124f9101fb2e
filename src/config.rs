//! Command-line and environment configuration.

use crate::data::loader::DEFAULT_DATE_FORMAT;
use crate::data::{DataPaths, MIN_THREE_POINT_ATTEMPTS};
use crate::pipeline::PipelineConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "nba-dashboard",
    about = "Win races and three-point shooting from a season of NBA box scores"
)]
pub struct Cli {
    /// Directory holding the season CSV files.
    #[clap(long, env = "NBA_DASHBOARD_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Player box score file (default: <data-dir>/2017-18_playerBoxScore.csv).
    #[clap(long, env = "NBA_DASHBOARD_PLAYERS")]
    pub players: Option<PathBuf>,

    /// Team box score file (default: <data-dir>/2017-18_teamBoxScore.csv).
    #[clap(long, env = "NBA_DASHBOARD_TEAMS")]
    pub teams: Option<PathBuf>,

    /// Standings file (default: <data-dir>/2017-18_standings.csv).
    #[clap(long, env = "NBA_DASHBOARD_STANDINGS")]
    pub standings: Option<PathBuf>,

    /// strftime layout of the date columns.
    #[clap(long, env = "NBA_DASHBOARD_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Minimum season three-point attempts for the scatter.
    #[clap(
        long,
        env = "NBA_DASHBOARD_MIN_ATTEMPTS",
        default_value_t = MIN_THREE_POINT_ATTEMPTS,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub min_attempts: i64,

    /// Write a static .png or .svg document instead of opening the window.
    #[clap(long, short, env = "NBA_DASHBOARD_EXPORT")]
    pub export: Option<PathBuf>,

    /// Also write the three-point summary rows as JSON.
    #[clap(long, env = "NBA_DASHBOARD_SUMMARY_JSON")]
    pub summary_json: Option<PathBuf>,
}

/// Where the dashboard ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Window,
    Document(PathBuf),
}

impl Cli {
    pub fn pipeline_config(&self) -> PipelineConfig {
        let defaults = DataPaths::from_dir(&self.data_dir);
        PipelineConfig {
            paths: DataPaths {
                player_box_score: self.players.clone().unwrap_or(defaults.player_box_score),
                team_box_score: self.teams.clone().unwrap_or(defaults.team_box_score),
                standings: self.standings.clone().unwrap_or(defaults.standings),
            },
            date_format: self.date_format.clone(),
            min_attempts: self.min_attempts,
        }
    }

    pub fn output(&self) -> OutputMode {
        match &self.export {
            Some(path) => OutputMode::Document(path.clone()),
            None => OutputMode::Window,
        }
    }
}
