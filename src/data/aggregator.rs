//! Three-Point Aggregator Module
//! Collapses per-game player rows into one shooting summary per player.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Players below this many season attempts are left out of the summary.
pub const MIN_THREE_POINT_ATTEMPTS: i64 = 100;

pub const FIRST_NAME: &str = "playFNm";
pub const LAST_NAME: &str = "playLNm";
pub const NAME: &str = "name";
pub const ATTEMPTS: &str = "play3PA";
pub const MAKES: &str = "play3PM";
pub const PERCENTAGE: &str = "pct3PM";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One qualifying shooter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreePointSummary {
    pub name: String,
    #[serde(rename = "play3PA")]
    pub attempts: i64,
    #[serde(rename = "play3PM")]
    pub makes: i64,
    #[serde(rename = "pct3PM")]
    pub percentage: f64,
}

/// Aggregated summary table with columns `name`, `play3PA`, `play3PM`, `pct3PM`,
/// sorted by attempts, most first.
#[derive(Debug, Clone)]
pub struct ThreePointTable {
    df: DataFrame,
}

impl ThreePointTable {
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Typed rows, in table order.
    pub fn summaries(&self) -> Result<Vec<ThreePointSummary>, AggregateError> {
        let names = self.df.column(NAME)?.str()?;
        let attempts = self.df.column(ATTEMPTS)?.i64()?;
        let makes = self.df.column(MAKES)?.i64()?;
        let pct = self.df.column(PERCENTAGE)?.f64()?;

        let rows = names
            .into_iter()
            .zip(attempts.into_iter())
            .zip(makes.into_iter())
            .zip(pct.into_iter())
            .filter_map(|(((name, attempts), makes), percentage)| {
                Some(ThreePointSummary {
                    name: name?.to_string(),
                    attempts: attempts?,
                    makes: makes.unwrap_or(0),
                    percentage: percentage?,
                })
            })
            .collect();

        Ok(rows)
    }
}

/// Builds the per-player three-point summary.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    min_attempts: i64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MIN_THREE_POINT_ATTEMPTS)
    }
}

impl Aggregator {
    pub fn new(min_attempts: i64) -> Self {
        Self { min_attempts }
    }

    /// Sum attempts and makes per full name, keep volume shooters, add the percentage.
    ///
    /// Groups keep first-seen order and the sort is stable, so players tied on
    /// attempts stay in the order they first appear in `players`.
    pub fn aggregate_three_point(
        &self,
        players: &DataFrame,
    ) -> Result<ThreePointTable, AggregateError> {
        let df = players
            .clone()
            .lazy()
            .filter(col(ATTEMPTS).gt(lit(0)))
            .with_columns([
                col(ATTEMPTS).cast(DataType::Int64),
                col(MAKES).cast(DataType::Int64),
                concat_str([col(FIRST_NAME), col(LAST_NAME)], " ", false).alias(NAME),
            ])
            .filter(col(NAME).is_not_null())
            .group_by_stable([col(NAME)])
            .agg([col(ATTEMPTS).sum(), col(MAKES).sum()])
            .sort_by_exprs(
                [col(ATTEMPTS)],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .filter(col(ATTEMPTS).gt_eq(lit(self.min_attempts)))
            .with_column(
                (col(MAKES).cast(DataType::Float64) / col(ATTEMPTS).cast(DataType::Float64))
                    .alias(PERCENTAGE),
            )
            .select([col(NAME), col(ATTEMPTS), col(MAKES), col(PERCENTAGE)])
            .collect()?;

        if df.height() == 0 {
            warn!(
                min_attempts = self.min_attempts,
                "no player reached the attempt threshold"
            );
        } else {
            info!(players = df.height(), "aggregated three-point shooters");
        }

        Ok(ThreePointTable { df })
    }
}

/// Aggregate with the default 100-attempt threshold.
pub fn aggregate_three_point(players: &DataFrame) -> Result<ThreePointTable, AggregateError> {
    Aggregator::default().aggregate_three_point(players)
}

#[cfg(test)]
mod tests;
