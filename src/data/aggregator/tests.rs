//! Unit tests for the three-point aggregation

use super::*;

fn players(rows: &[(&str, &str, i64, i64)]) -> DataFrame {
    let first: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let last: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let attempts: Vec<i64> = rows.iter().map(|r| r.2).collect();
    let makes: Vec<i64> = rows.iter().map(|r| r.3).collect();

    df!(
        FIRST_NAME => first,
        LAST_NAME => last,
        ATTEMPTS => attempts,
        MAKES => makes,
    )
    .unwrap()
}

#[test]
fn test_rows_for_same_player_are_summed() {
    let df = players(&[("A", "B", 60, 0), ("A", "B", 50, 20)]);
    let rows = aggregate_three_point(&df).unwrap().summaries().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "A B");
    assert_eq!(rows[0].attempts, 110);
    assert_eq!(rows[0].makes, 20);
    assert!((rows[0].percentage - 20.0 / 110.0).abs() < 1e-12);
}

#[test]
fn test_players_below_threshold_are_dropped() {
    let df = players(&[
        ("Low", "Volume", 60, 30),
        ("Low", "Volume", 39, 20),
        ("High", "Volume", 100, 40),
    ]);
    let rows = aggregate_three_point(&df).unwrap().summaries().unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["High Volume"]);
}

#[test]
fn test_percentage_matches_totals_and_threshold_holds() {
    let df = players(&[
        ("Steph", "Curry", 150, 64),
        ("Klay", "Thompson", 120, 52),
        ("Klay", "Thompson", 80, 30),
        ("Kevin", "Durant", 99, 40),
        ("Kevin", "Durant", 0, 0),
    ]);
    let rows = aggregate_three_point(&df).unwrap().summaries().unwrap();

    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(row.attempts >= MIN_THREE_POINT_ATTEMPTS);
        let expected = row.makes as f64 / row.attempts as f64;
        assert!((row.percentage - expected).abs() < 1e-12);
    }
}

#[test]
fn test_sorted_by_attempts_descending() {
    let df = players(&[
        ("A", "One", 120, 40),
        ("B", "Two", 300, 100),
        ("C", "Three", 200, 80),
    ]);
    let rows = aggregate_three_point(&df).unwrap().summaries().unwrap();

    let attempts: Vec<i64> = rows.iter().map(|r| r.attempts).collect();
    assert_eq!(attempts, vec![300, 200, 120]);
}

#[test]
fn test_ties_keep_first_seen_order() {
    let df = players(&[
        ("Zach", "Last", 150, 50),
        ("Aaron", "First", 150, 60),
        ("Mid", "Player", 150, 55),
    ]);
    let rows = aggregate_three_point(&df).unwrap().summaries().unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Zach Last", "Aaron First", "Mid Player"]);
}

#[test]
fn test_output_columns() {
    let df = players(&[("A", "B", 120, 40)]);
    let table = aggregate_three_point(&df).unwrap();

    let columns: Vec<String> = table
        .dataframe()
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(columns, vec![NAME, ATTEMPTS, MAKES, PERCENTAGE]);
}

#[test]
fn test_aggregation_is_idempotent() {
    let df = players(&[
        ("A", "One", 120, 40),
        ("B", "Two", 120, 41),
        ("A", "One", 10, 1),
        ("C", "Three", 500, 200),
    ]);

    let first = aggregate_three_point(&df).unwrap();
    let second = aggregate_three_point(&df).unwrap();

    assert!(first.dataframe().equals(second.dataframe()));
    assert_eq!(first.summaries().unwrap(), second.summaries().unwrap());
}

#[test]
fn test_empty_result_is_not_an_error() {
    let df = players(&[("A", "B", 5, 1), ("C", "D", 0, 0)]);
    let table = aggregate_three_point(&df).unwrap();

    assert!(table.is_empty());
    assert!(table.summaries().unwrap().is_empty());
}

#[test]
fn test_custom_threshold() {
    let df = players(&[("A", "B", 5, 1), ("C", "D", 20, 10)]);
    let table = Aggregator::new(10).aggregate_three_point(&df).unwrap();

    let rows = table.summaries().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "C D");
    assert_eq!(rows[0].percentage, 0.5);
}

#[test]
fn test_summary_serializes_with_source_column_names() {
    let row = ThreePointSummary {
        name: "A B".to_string(),
        attempts: 110,
        makes: 20,
        percentage: 20.0 / 110.0,
    };
    let value = serde_json::to_value(&row).unwrap();

    assert_eq!(value["name"], "A B");
    assert_eq!(value["play3PA"], 110);
    assert_eq!(value["play3PM"], 20);
    assert!(value.get("pct3PM").is_some());
}
