//! NBA Dashboard - season win races and three-point shooting viewer.

use anyhow::{Context, Result};
use clap::Parser;
use nba_dashboard::{
    charts::StaticChartRenderer,
    config::{Cli, OutputMode},
    gui::LiveSession,
    pipeline,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nba_dashboard=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let cli = Cli::parse();
    let config = cli.pipeline_config();
    info!(
        standings = %config.paths.standings.display(),
        min_attempts = config.min_attempts,
        "startup"
    );

    // ─── 3) load, aggregate, build views ─────────────────────────────
    let prepared = pipeline::prepare(&config).context("failed to prepare season data")?;

    if let Some(path) = &cli.summary_json {
        pipeline::write_summary_json(&prepared.summary, path)
            .with_context(|| format!("failed to export summary to {}", path.display()))?;
    }

    // ─── 4) render ───────────────────────────────────────────────────
    let chart = prepared.chart.clone();
    match cli.output() {
        OutputMode::Document(path) => {
            let mut renderer = StaticChartRenderer::new(path);
            let document = pipeline::render(chart, &mut renderer)
                .context("failed to render dashboard document")?;
            info!(path = %document.path.display(), "dashboard written");
        }
        OutputMode::Window => {
            let mut session = LiveSession::new(config, prepared);
            pipeline::render(chart, &mut session).context("dashboard window failed")?;
        }
    }

    Ok(())
}
