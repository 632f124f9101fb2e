//! Control Panel Widget
//! Left side panel: data source status, selection summary and export actions.

use crate::data::{DataPaths, Tables};
use egui::{Color32, RichText};
use std::path::{Path, PathBuf};

/// Row counts of the loaded files, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStatus {
    pub players: usize,
    pub teams: usize,
    pub standings: usize,
    pub shooters: usize,
}

impl SourceStatus {
    pub fn from_tables(tables: &Tables, shooters: usize) -> Self {
        Self {
            players: tables.players.height(),
            teams: tables.teams.height(),
            standings: tables.standings.height(),
            shooters,
        }
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub paths: Option<DataPaths>,
    pub sources: Option<SourceStatus>,
    pub selected: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            paths: None,
            sources: None,
            selected: 0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the data source section after a (re)load
    pub fn update_sources(&mut self, paths: DataPaths, sources: SourceStatus) {
        self.paths = Some(paths);
        self.sources = Some(sources);
        self.export_enabled = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏀 NBA Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("2017/2018 Season").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                match (&self.paths, &self.sources) {
                    (Some(paths), Some(sources)) => {
                        egui::Grid::new("data_sources")
                            .num_columns(2)
                            .spacing([8.0, 4.0])
                            .show(ui, |ui| {
                                Self::source_row(ui, &paths.player_box_score, sources.players);
                                Self::source_row(ui, &paths.team_box_score, sources.teams);
                                Self::source_row(ui, &paths.standings, sources.standings);
                            });
                        ui.add_space(4.0);
                        ui.label(
                            RichText::new(format!("{} players with 100+ 3PA", sources.shooters))
                                .size(11.0),
                        );
                    }
                    _ => {
                        ui.label(RichText::new("No data loaded").size(12.0).color(Color32::GRAY));
                    }
                }

                ui.add_space(4.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📂 Open data folder").clicked() {
                        action = ControlPanelAction::BrowseDataDir;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Selection Section =====
        ui.label(RichText::new("🎯 Selection").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let text = if self.selected == 0 {
                "No players selected".to_string()
            } else {
                format!("{} selected", self.selected)
            };
            ui.label(RichText::new(text).size(12.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_enabled_ui(self.selected > 0, |ui| {
                    if ui.small_button("↺ Reset").clicked() {
                        action = ControlPanelAction::ResetSelection;
                    }
                });
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let image_button =
                    egui::Button::new(RichText::new("🖼 Export Chart Image").size(14.0))
                        .min_size(egui::vec2(200.0, 30.0));
                if ui.add(image_button).clicked() {
                    action = ControlPanelAction::ExportImage;
                }

                ui.add_space(8.0);

                let json_button =
                    egui::Button::new(RichText::new("💾 Export Summary JSON").size(14.0))
                        .min_size(egui::vec2(200.0, 30.0));
                if ui.add(json_button).clicked() {
                    action = ControlPanelAction::ExportSummary;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") || self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn source_row(ui: &mut egui::Ui, path: &Path, rows: usize) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        ui.label(RichText::new(name).size(12.0));
        ui.label(RichText::new(format!("{rows} rows")).size(12.0).color(Color32::GRAY));
        ui.end_row();
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Directory of the currently loaded standings file
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.paths
            .as_ref()
            .and_then(|p| p.standings.parent().map(Path::to_path_buf))
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseDataDir,
    ResetSelection,
    ExportImage,
    ExportSummary,
}
