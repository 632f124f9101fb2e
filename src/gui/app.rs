//! NBA Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartData, RenderError, Renderer, StaticChartRenderer};
use crate::data::{DataPaths, ThreePointTable};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, SourceStatus};
use crate::pipeline::{self, PipelineConfig, Prepared};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Main application window.
pub struct DashboardApp {
    config: PipelineConfig,
    summary: Option<ThreePointTable>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: PipelineConfig,
        prepared: Prepared,
    ) -> Self {
        let mut app = Self {
            config,
            summary: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        app.apply(prepared);
        app
    }

    /// Show freshly prepared data
    fn apply(&mut self, prepared: Prepared) {
        let Prepared {
            tables,
            summary,
            chart,
        } = prepared;

        let sources = SourceStatus::from_tables(&tables, summary.len());
        match self.chart_viewer.set_chart_data(chart) {
            Ok(()) => {
                self.control_panel
                    .update_sources(self.config.paths.clone(), sources);
                self.control_panel.set_status(&format!(
                    "Loaded {} standings rows, {} shooters",
                    tables.standings.height(),
                    summary.len()
                ));
                self.summary = Some(summary);
            }
            Err(e) => {
                error!(error = %e, "failed to prepare charts");
                self.chart_viewer.clear();
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle data folder selection - re-runs the whole pipeline
    fn handle_browse_data_dir(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = self.control_panel.data_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(dir) = dialog.pick_folder() else {
            return; // User cancelled
        };

        let config = PipelineConfig {
            paths: DataPaths::from_dir(&dir),
            ..self.config.clone()
        };

        info!(dir = %dir.display(), "reloading season data");
        match pipeline::prepare(&config) {
            Ok(prepared) => {
                self.config = config;
                self.apply(prepared);
            }
            Err(e) => {
                error!(error = %e, "reload failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle image export - render the charts to a PNG or SVG file
    fn handle_export_image(&mut self) {
        let Some(chart) = self.chart_viewer.chart.clone() else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .add_filter("SVG Image", &["svg"])
            .set_file_name("nba_dashboard.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match Self::export_image(chart, output_path) {
            Ok(path) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!(error = %e, "could not open exported document");
                }
            }
            Err(e) => {
                error!(error = %e, "image export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn export_image(chart: ChartData, output_path: PathBuf) -> Result<PathBuf, RenderError> {
        let document = StaticChartRenderer::new(output_path).render(chart)?;
        Ok(document.path)
    }

    /// Handle summary export - write the three-point rows as JSON
    fn handle_export_summary(&mut self) {
        let Some(summary) = &self.summary else {
            self.control_panel.set_status("No summary to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("three_point_summary.json")
            .save_file()
        else {
            return;
        };

        match pipeline::write_summary_json(summary, &path) {
            Ok(rows) => self
                .control_panel
                .set_status(&format!("Exported {} players to {}", rows, path.display())),
            Err(e) => {
                error!(error = %e, "summary export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.control_panel.selected = self.chart_viewer.selection.len();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseDataDir => self.handle_browse_data_dir(),
                        ControlPanelAction::ResetSelection => self.chart_viewer.selection.clear(),
                        ControlPanelAction::ExportImage => self.handle_export_image(),
                        ControlPanelAction::ExportSummary => self.handle_export_summary(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Renders the dashboard as a live window. Blocks until the window closes.
pub struct LiveSession {
    config: PipelineConfig,
    prepared: Option<Prepared>,
}

impl LiveSession {
    pub fn new(config: PipelineConfig, prepared: Prepared) -> Self {
        Self {
            config,
            prepared: Some(prepared),
        }
    }
}

impl Renderer for LiveSession {
    type Output = ();

    fn render(&mut self, chart: ChartData) -> Result<(), RenderError> {
        let mut prepared = self
            .prepared
            .take()
            .ok_or_else(|| RenderError::Window("session already ran".to_string()))?;
        prepared.chart = chart;

        let title = prepared.chart.title.clone();
        let config = self.config.clone();

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 900.0])
                .with_min_inner_size([900.0, 700.0])
                .with_title(&title),
            ..Default::default()
        };

        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, prepared)))),
        )
        .map_err(|e| RenderError::Window(e.to_string()))
    }
}
