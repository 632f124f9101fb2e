//! Chart Viewer Widget
//! Central scrollable panel: conference tabs holding the win-race charts,
//! with the three-point scatter underneath.

use crate::charts::{
    points_in_box, ChartData, ChartPlotter, PlotLine, PlotPanel, PointState, RenderError,
    ScatterPoint,
};
use egui::{RichText, ScrollArea};
use std::collections::BTreeSet;

const SECTION_SPACING: f32 = 15.0;

/// Rows of the three-point source picked by clicking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeSet<usize>,
}

impl Selection {
    /// Apply a click. A plain click selects only the clicked row, or clears the
    /// selection on empty space. With `additive` the clicked row is toggled.
    pub fn tap(&mut self, row: Option<usize>, additive: bool) {
        match (row, additive) {
            (Some(row), false) => {
                self.rows.clear();
                self.rows.insert(row);
            }
            (Some(row), true) => {
                if !self.rows.remove(&row) {
                    self.rows.insert(row);
                }
            }
            (None, false) => self.rows.clear(),
            (None, true) => {}
        }
    }

    /// Apply a box selection. Replaces the selection unless `additive`.
    pub fn select_rows(&mut self, rows: impl IntoIterator<Item = usize>, additive: bool) {
        if !additive {
            self.rows.clear();
        }
        self.rows.extend(rows);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Points are only dimmed while something is selected.
    pub fn state(&self, row: usize) -> PointState {
        if self.rows.is_empty() {
            PointState::Normal
        } else if self.rows.contains(&row) {
            PointState::Selected
        } else {
            PointState::Dimmed
        }
    }
}

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    /// Dashboard currently shown
    pub chart: Option<ChartData>,
    panels: Vec<PlotPanel>,
    points: Vec<ScatterPoint>,
    tooltips: Vec<Vec<(String, String)>>,
    pub active_tab: usize,
    pub selection: Selection,
    box_start: Option<[f64; 2]>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all charts
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Evaluate the team views and scatter rows once, so frames only draw.
    pub fn set_chart_data(&mut self, chart: ChartData) -> Result<(), RenderError> {
        let mut panels = Vec::with_capacity(chart.panels.len());
        for (i, panel) in chart.panels.iter().enumerate() {
            let lines = chart
                .panel_lines(panel)?
                .into_iter()
                .map(|(series, points)| PlotLine {
                    label: series.label,
                    color: ChartPlotter::color(series.color),
                    points,
                })
                .collect();

            panels.push(PlotPanel {
                id: format!("win_race_{i}"),
                tab_label: panel.tab_label.clone(),
                title: panel.title.clone(),
                width: panel.width as f32,
                height: panel.height as f32,
                x_label: panel.x_label.clone(),
                y_label: panel.y_label.clone(),
                legend: panel.legend,
                lines,
            });
        }

        self.points = chart.scatter_points()?;
        self.tooltips = chart.tooltip_rows()?;
        self.panels = panels;
        self.active_tab = 0;
        self.selection.clear();
        self.box_start = None;
        self.chart = Some(chart);
        Ok(())
    }

    pub fn player_count(&self) -> usize {
        self.points.len()
    }

    /// Draw the tabs and the scatter
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(chart) = &self.chart else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let scatter = chart.scatter.clone();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Conference tabs
                ui.horizontal(|ui| {
                    for (i, panel) in self.panels.iter().enumerate() {
                        let label = RichText::new(&panel.tab_label).size(14.0);
                        if ui.selectable_label(self.active_tab == i, label).clicked() {
                            self.active_tab = i;
                        }
                    }
                });
                ui.separator();

                if let Some(panel) = self.panels.get(self.active_tab) {
                    ChartPlotter::draw_win_race(ui, panel);
                }

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.add_space(SECTION_SPACING);

                let selection = &self.selection;
                let scatter_response = ChartPlotter::draw_three_point_scatter(
                    ui,
                    &scatter,
                    &self.points,
                    |row| selection.state(row),
                    &self.tooltips,
                    &mut self.box_start,
                );

                let additive = ui.input(|i| i.modifiers.shift);
                if let Some((a, b)) = scatter_response.boxed {
                    let rows = points_in_box(&self.points, a, b);
                    self.selection.select_rows(rows, additive);
                } else if scatter_response.clicked {
                    self.selection.tap(scatter_response.hovered, additive);
                }

                ui.label(
                    RichText::new(
                        "Click a point to select it, shift-click to add or remove. \
                         Right-drag to box select.",
                    )
                    .size(11.0)
                    .weak(),
                );
            });
    }
}
