//! View Builder Module
//! Bindable data sources and the per-team filtered views over them.

use crate::data::loader::date_values;
use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

pub const TEAM_COLUMN: &str = "teamAbbr";
pub const STANDING_DATE_COLUMN: &str = "stDate";
pub const WINS_COLUMN: &str = "gameWon";

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Source '{source_name}' has no column '{column}'")]
    MissingColumn { source_name: String, column: String },
}

/// A named table that charts bind to. Cloning shares the underlying columns.
#[derive(Debug, Clone)]
pub struct DataSource {
    name: String,
    df: DataFrame,
}

impl DataSource {
    pub fn new(name: &str, df: DataFrame) -> Self {
        Self {
            name: name.to_string(),
            df,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.df.column(column).is_ok()
    }

    fn column(&self, column: &str) -> Result<&Column, ViewError> {
        self.df.column(column).map_err(|_| ViewError::MissingColumn {
            source_name: self.name.clone(),
            column: column.to_string(),
        })
    }

    /// Values of a numeric column as `f64`.
    pub fn f64_values(&self, column: &str) -> Result<Vec<Option<f64>>, ViewError> {
        let values = self.column(column)?.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().collect())
    }

    /// Values of a column rendered as display text.
    pub fn text_values(&self, column: &str) -> Result<Vec<Option<String>>, ViewError> {
        let values = self.column(column)?.cast(&DataType::String)?;
        Ok(values
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Values of a `Date` column.
    pub fn date_values(&self, column: &str) -> Result<Vec<Option<NaiveDate>>, ViewError> {
        Ok(date_values(self.column(column)?)?)
    }

    /// Rows matching `predicate`, in source order.
    pub fn filtered(&self, predicate: Expr) -> Result<DataSource, ViewError> {
        let df = self.df.clone().lazy().filter(predicate).collect()?;
        Ok(DataSource {
            name: self.name.clone(),
            df,
        })
    }
}

/// One standings row as seen through a team view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinPoint {
    pub date: NaiveDate,
    pub wins: f64,
}

/// Read-only selection of the standings rows of a single team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    code: String,
}

impl TeamView {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// `teamAbbr == code`
    pub fn predicate(&self) -> Expr {
        col(TEAM_COLUMN).eq(lit(self.code.as_str()))
    }

    /// Matching rows of `source`. An unknown code yields an empty source.
    pub fn rows(&self, source: &DataSource) -> Result<DataSource, ViewError> {
        source.filtered(self.predicate())
    }

    /// Cumulative wins by date. Rows with a null date or win count are skipped.
    pub fn series(&self, source: &DataSource) -> Result<Vec<WinPoint>, ViewError> {
        let rows = self.rows(source)?;
        let dates = rows.date_values(STANDING_DATE_COLUMN)?;
        let wins = rows.f64_values(WINS_COLUMN)?;

        let points: Vec<WinPoint> = dates
            .into_iter()
            .zip(wins)
            .filter_map(|(date, wins)| {
                Some(WinPoint {
                    date: date?,
                    wins: wins?,
                })
            })
            .collect();

        debug!(team = %self.code, points = points.len(), "evaluated team view");
        Ok(points)
    }
}

/// Team views keyed by code, in the order they were requested.
#[derive(Debug, Clone, Default)]
pub struct Views {
    views: Vec<TeamView>,
}

impl Views {
    pub fn get(&self, code: &str) -> Option<&TeamView> {
        self.views.iter().find(|v| v.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamView> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// One view per distinct team code over the shared standings source.
pub fn build_views(standings: &DataSource, codes: &[&str]) -> Result<Views, ViewError> {
    for column in [TEAM_COLUMN, STANDING_DATE_COLUMN, WINS_COLUMN] {
        if !standings.has_column(column) {
            return Err(ViewError::MissingColumn {
                source_name: standings.name().to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut views: Vec<TeamView> = Vec::with_capacity(codes.len());
    for code in codes {
        if !views.iter().any(|v| v.code == *code) {
            views.push(TeamView::new(code));
        }
    }

    Ok(Views { views })
}
