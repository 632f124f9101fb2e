//! Integration tests for the load -> aggregate -> views -> render pipeline

use nba_dashboard::{
    charts::{DocumentFormat, RenderError, StaticChartRenderer},
    data::loader::{PLAYER_BOX_SCORE_FILE, STANDINGS_FILE, TEAM_BOX_SCORE_FILE},
    data::LoaderError,
    pipeline::{self, PipelineConfig, PipelineError},
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLAYERS_CSV: &str = "\
gmDate,teamAbbr,playFNm,playLNm,play3PA,play3PM
2017-10-17,HOU,James,Harden,60,22
2017-10-18,HOU,James,Harden,55,19
2017-10-17,GS,Stephen,Curry,70,30
2017-10-18,GS,Stephen,Curry,40,18
2017-10-17,BOS,Al,Horford,8,3
";

const TEAMS_CSV: &str = "\
gmDate,teamAbbr,teamPTS
2017-10-17,HOU,122
2017-10-17,GS,121
";

const STANDINGS_CSV: &str = "\
stDate,teamAbbr,gameWon
2017-10-17,HOU,1
2017-10-17,GS,0
2017-10-17,BOS,0
2017-10-17,TOR,1
2017-10-18,HOU,1
2017-10-18,GS,1
2017-10-18,BOS,1
2017-10-18,TOR,1
2017-10-19,HOU,2
";

fn season_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(PLAYER_BOX_SCORE_FILE), PLAYERS_CSV).unwrap();
    fs::write(dir.path().join(TEAM_BOX_SCORE_FILE), TEAMS_CSV).unwrap();
    fs::write(dir.path().join(STANDINGS_FILE), STANDINGS_CSV).unwrap();
    dir
}

#[test]
fn test_prepare_builds_full_dashboard() {
    let dir = season_dir();
    let prepared = pipeline::prepare(&PipelineConfig::from_dir(dir.path())).unwrap();

    assert_eq!(prepared.tables.standings.height(), 9);

    // Curry 110 attempts, Harden 115, Horford below the threshold
    let rows = prepared.summary.summaries().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "James Harden");
    assert_eq!(rows[0].attempts, 115);
    assert_eq!(rows[1].name, "Stephen Curry");
    assert_eq!(rows[1].makes, 48);

    let chart = &prepared.chart;
    assert_eq!(chart.panels.len(), 2);
    assert_eq!(chart.panels[0].tab_label, "Western Conference");
    assert_eq!(chart.panels[1].tab_label, "Eastern Conference");
    assert_eq!(chart.views.len(), 4);

    let hou = chart.views.get("HOU").unwrap();
    let wins: Vec<f64> = hou
        .series(&chart.standings)
        .unwrap()
        .iter()
        .map(|p| p.wins)
        .collect();
    assert_eq!(wins, vec![1.0, 1.0, 2.0]);

    assert_eq!(chart.scatter_points().unwrap().len(), 2);
}

#[test]
fn test_prepare_respects_min_attempts() {
    let dir = season_dir();
    let config = PipelineConfig {
        min_attempts: 5,
        ..PipelineConfig::from_dir(dir.path())
    };
    let prepared = pipeline::prepare(&config).unwrap();

    assert_eq!(prepared.summary.len(), 3);
}

#[test]
fn test_prepare_missing_file() {
    let dir = season_dir();
    fs::remove_file(dir.path().join(STANDINGS_FILE)).unwrap();

    let err = pipeline::prepare(&PipelineConfig::from_dir(dir.path())).unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoaderError::FileNotFound { .. })));
}

#[test]
fn test_write_summary_json() {
    let dir = season_dir();
    let prepared = pipeline::prepare(&PipelineConfig::from_dir(dir.path())).unwrap();
    let out = dir.path().join("summary.json");

    let written = pipeline::write_summary_json(&prepared.summary, &out).unwrap();
    assert_eq!(written, 2);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "James Harden");
    assert_eq!(rows[0]["play3PA"], 115);
    assert_eq!(rows[0]["play3PM"], 41);
    assert!(rows[0]["pct3PM"].is_f64());
}

#[test]
fn test_write_summary_json_bad_path() {
    let dir = season_dir();
    let prepared = pipeline::prepare(&PipelineConfig::from_dir(dir.path())).unwrap();
    let out = dir.path().join("missing").join("summary.json");

    let err = pipeline::write_summary_json(&prepared.summary, &out).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }));
}

#[test]
fn test_render_rejects_unknown_document_format() {
    let dir = season_dir();
    let prepared = pipeline::prepare(&PipelineConfig::from_dir(dir.path())).unwrap();
    let out = dir.path().join("dashboard.html");

    let mut renderer = StaticChartRenderer::new(&out);
    let err = pipeline::render(prepared.chart, &mut renderer).unwrap_err();

    assert!(matches!(err, RenderError::UnsupportedFormat { .. }));
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_render_svg_document() {
    let dir = season_dir();
    let prepared = pipeline::prepare(&PipelineConfig::from_dir(dir.path())).unwrap();
    let out = dir.path().join("dashboard.svg");

    let mut renderer = StaticChartRenderer::new(&out);
    let document = pipeline::render(prepared.chart.clone(), &mut renderer).unwrap();

    assert_eq!(document.path, out);
    assert_eq!(document.format, DocumentFormat::Svg);

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains(&prepared.chart.title));
    for panel in &prepared.chart.panels {
        assert!(svg.contains(&panel.title), "missing panel title {}", panel.title);
    }
    assert!(svg.contains("Rockets"));
    assert!(svg.contains("Raptors"));
}
