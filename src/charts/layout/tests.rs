//! Unit tests for the dashboard layout

use super::*;
use crate::data::aggregate_three_point;
use chrono::NaiveDate;
use polars::prelude::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 10, d).unwrap()
}

fn tables() -> Tables {
    let players = df!(
        "gmDate" => [day(17), day(18), day(18)],
        "playFNm" => ["Kyle", "Kyle", "Al"],
        "playLNm" => ["Lowry", "Lowry", "Horford"],
        "play3PA" => [60i64, 50, 30],
        "play3PM" => [20i64, 20, 12],
    )
    .unwrap();

    let teams = df!(
        "gmDate" => [day(17)],
        "teamAbbr" => ["BOS"],
    )
    .unwrap();

    let standings = df!(
        "stDate" => [day(17), day(17), day(18), day(18), day(19)],
        "teamAbbr" => ["BOS", "TOR", "BOS", "TOR", "BOS"],
        "gameWon" => [0i64, 1, 1, 1, 2],
    )
    .unwrap();

    Tables {
        players,
        teams,
        standings,
    }
}

fn chart() -> ChartData {
    let tables = tables();
    let summary = aggregate_three_point(&tables.players).unwrap();
    ChartData::nba_season(&tables, &summary).unwrap()
}

#[test]
fn test_format_percent_one_decimal() {
    assert_eq!(format_percent(20.0 / 110.0), "18.2%");
    assert_eq!(format_percent(0.5), "50.0%");
    assert_eq!(format_percent(1.0), "100.0%");
}

#[test]
fn test_format_percent_pads_two_integer_digits() {
    assert_eq!(format_percent(0.09), "09.0%");
    assert_eq!(format_percent(0.0), "00.0%");
}

#[test]
fn test_format_integer() {
    assert_eq!(format_value(110.0, FieldFormat::Integer), "110");
}

#[test]
fn test_format_day_round_trips_dates() {
    let x = days_from_date(day(17)) as f64;
    assert_eq!(format_day(x), "Oct 2017");
    assert_eq!(format_day(f64::NAN), "");
}

#[test]
fn test_step_points_hold_previous_x() {
    let points = [[0.0, 1.0], [1.0, 2.0], [3.0, 5.0]];
    let stepped = step_points(&points);

    assert_eq!(
        stepped,
        vec![[0.0, 1.0], [0.0, 2.0], [1.0, 2.0], [1.0, 5.0], [3.0, 5.0]]
    );
    assert!(step_points(&[]).is_empty());
    assert_eq!(step_points(&[[2.0, 3.0]]), vec![[2.0, 3.0]]);
}

#[test]
fn test_season_layout_has_two_tabs_west_first() {
    let chart = chart();

    let tabs: Vec<&str> = chart.panels.iter().map(|p| p.tab_label.as_str()).collect();
    assert_eq!(tabs, vec!["Western Conference", "Eastern Conference"]);

    for panel in &chart.panels {
        assert_eq!(panel.series.len(), 2);
        assert_eq!(panel.width, 800);
        assert_eq!(panel.legend, LegendCorner::TopLeft);
    }

    let codes: Vec<&str> = chart.views.iter().map(|v| v.code()).collect();
    assert_eq!(codes, vec!["HOU", "GS", "BOS", "TOR"]);
}

#[test]
fn test_panel_lines_follow_team_views() {
    let chart = chart();
    let east = &chart.panels[1];
    let lines = chart.panel_lines(east).unwrap();

    let (celtics, points) = &lines[0];
    assert_eq!(celtics.code, "BOS");
    let first = days_from_date(day(17)) as f64;
    assert_eq!(points.first(), Some(&[first, 0.0]));
    assert_eq!(points.last(), Some(&[first + 2.0, 2.0]));
    assert_eq!(points.len(), 5);

    let (raptors, points) = &lines[1];
    assert_eq!(raptors.code, "TOR");
    assert_eq!(points.len(), 3);
}

#[test]
fn test_team_missing_from_standings_draws_nothing() {
    let chart = chart();
    let west = &chart.panels[0];
    let lines = chart.panel_lines(west).unwrap();

    assert!(lines.iter().all(|(_, points)| points.is_empty()));
}

#[test]
fn test_scatter_points_and_tooltips() {
    let chart = chart();

    let points = chart.scatter_points().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].row, 0);
    assert_eq!(points[0].x, 110.0);
    assert!((points[0].y - 40.0 / 110.0).abs() < 1e-12);

    let tooltips = chart.tooltip_rows().unwrap();
    assert_eq!(
        tooltips[0],
        vec![
            ("Player".to_string(), "Kyle Lowry".to_string()),
            ("Three-Pointers Made".to_string(), "40".to_string()),
            ("Three-Pointers Attempted".to_string(), "110".to_string()),
            ("Three-Point Percentage".to_string(), "36.4%".to_string()),
        ]
    );
}

#[test]
fn test_three_point_source_exposes_expected_columns() {
    let chart = chart();
    for column in ["name", "play3PA", "play3PM", "pct3PM"] {
        assert!(chart.three_point.has_column(column), "missing {column}");
    }
}
