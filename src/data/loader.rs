//! CSV Data Loader Module
//! Loads the season CSV files with Polars and parses their date columns.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Date layout used by the season exports (`2017-10-17`).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

pub const PLAYER_BOX_SCORE_FILE: &str = "2017-18_playerBoxScore.csv";
pub const TEAM_BOX_SCORE_FILE: &str = "2017-18_teamBoxScore.csv";
pub const STANDINGS_FILE: &str = "2017-18_standings.csv";

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },
    #[error("{file}: column '{column}' must hold integers, found non-integer {dtype} values")]
    ColumnType {
        file: String,
        column: String,
        dtype: String,
    },
    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: PolarsError,
    },
}

/// Column layout a file must satisfy before it is handed to the aggregator.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub date_column: &'static str,
    pub required: &'static [&'static str],
    pub numeric: &'static [&'static str],
}

pub const PLAYER_SCHEMA: TableSchema = TableSchema {
    date_column: "gmDate",
    required: &["playFNm", "playLNm", "play3PA", "play3PM"],
    numeric: &["play3PA", "play3PM"],
};

pub const TEAM_SCHEMA: TableSchema = TableSchema {
    date_column: "gmDate",
    required: &[],
    numeric: &[],
};

pub const STANDINGS_SCHEMA: TableSchema = TableSchema {
    date_column: "stDate",
    required: &["teamAbbr", "gameWon"],
    numeric: &["gameWon"],
};

/// Locations of the three season files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub player_box_score: PathBuf,
    pub team_box_score: PathBuf,
    pub standings: PathBuf,
}

impl DataPaths {
    /// Default file names inside a data directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            player_box_score: dir.join(PLAYER_BOX_SCORE_FILE),
            team_box_score: dir.join(TEAM_BOX_SCORE_FILE),
            standings: dir.join(STANDINGS_FILE),
        }
    }
}

/// The three season tables, in file row order.
#[derive(Debug, Clone)]
pub struct Tables {
    pub players: DataFrame,
    pub teams: DataFrame,
    pub standings: DataFrame,
}

/// Handles CSV file loading with Polars.
#[derive(Debug, Clone)]
pub struct DataLoader {
    date_format: String,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self::with_date_format(DEFAULT_DATE_FORMAT)
    }

    pub fn with_date_format(date_format: &str) -> Self {
        Self {
            date_format: date_format.to_string(),
        }
    }

    /// Load all three season files. Fails on the first file that cannot be read.
    pub fn load_all(&self, paths: &DataPaths) -> Result<Tables, LoaderError> {
        let players = self.load_table(&paths.player_box_score, &PLAYER_SCHEMA)?;
        let teams = self.load_table(&paths.team_box_score, &TEAM_SCHEMA)?;
        let standings = self.load_table(&paths.standings, &STANDINGS_SCHEMA)?;

        Ok(Tables {
            players,
            teams,
            standings,
        })
    }

    /// Load a single CSV file, check it against `schema` and parse its date column.
    pub fn load_table(&self, path: &Path, schema: &TableSchema) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = file_label(path);
        let parse_err = |source: PolarsError| LoaderError::Parse {
            file: file.clone(),
            source,
        };

        debug!(file = %file, "reading csv");

        // Every column is read as text; only the columns the pipeline uses get a dtype
        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(parse_err)?;

        Self::check_columns(&raw, schema, &file)?;
        let typed = Self::cast_numeric(raw, schema, &file)?;

        let date_options = StrptimeOptions {
            format: Some(self.date_format.as_str().into()),
            strict: true,
            exact: true,
            ..Default::default()
        };

        let df = typed
            .lazy()
            .with_column(col(schema.date_column).str().to_date(date_options))
            .collect()
            .map_err(parse_err)?;

        info!(file = %file, rows = df.height(), "loaded table");
        Ok(df)
    }

    fn check_columns(df: &DataFrame, schema: &TableSchema, file: &str) -> Result<(), LoaderError> {
        let missing = std::iter::once(&schema.date_column)
            .chain(schema.required.iter())
            .find(|name| df.column(name).is_err());

        match missing {
            Some(column) => Err(LoaderError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Cast the schema's numeric columns to `Int64`. Any value that is not an
    /// integer rejects the whole file.
    fn cast_numeric(
        mut df: DataFrame,
        schema: &TableSchema,
        file: &str,
    ) -> Result<DataFrame, LoaderError> {
        for name in schema.numeric {
            let column = df.column(name).map_err(|source| LoaderError::Parse {
                file: file.to_string(),
                source,
            })?;
            let dtype = column.dtype().to_string();

            let cast = column
                .strict_cast(&DataType::Int64)
                .map_err(|_| LoaderError::ColumnType {
                    file: file.to_string(),
                    column: name.to_string(),
                    dtype,
                })?;

            df.with_column(cast).map_err(|source| LoaderError::Parse {
                file: file.to_string(),
                source,
            })?;
        }

        Ok(df)
    }
}

/// Load the three season files with the default date format.
pub fn load_data(paths: &DataPaths) -> Result<Tables, LoaderError> {
    DataLoader::new().load_all(paths)
}

/// Read a `Date` column back into calendar dates, keeping nulls.
pub fn date_values(column: &Column) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let days = column.cast(&DataType::Int32)?;
    Ok(days.i32()?.into_iter().map(|d| d.and_then(date_from_days)).collect())
}

/// Convert days since the Unix epoch into a calendar date.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_CE_DAYS)?)
}

/// Days since the Unix epoch, the x coordinate used by every chart.
pub fn days_from_date(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_CE_DAYS
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
