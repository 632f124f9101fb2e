//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::{format_day, format_percent, LegendCorner, Rgb, ScatterPoint, ScatterSpec};
use egui::{Color32, PointerButton, RichText};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon};

/// Hover and click reach of a scatter point, in screen pixels.
pub const HOVER_RADIUS: f32 = 10.0;

const HOVER_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);
const BOX_COLOR: Color32 = Color32::from_rgb(0, 191, 255);

/// What happened on the scatter this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScatterResponse {
    /// Row under the pointer
    pub hovered: Option<usize>,
    pub clicked: bool,
    /// Corners of a finished box selection, in plot coordinates
    pub boxed: Option<([f64; 2], [f64; 2])>,
}

/// A ready-to-draw step line.
#[derive(Debug, Clone)]
pub struct PlotLine {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// A ready-to-draw win-race tab.
#[derive(Debug, Clone)]
pub struct PlotPanel {
    pub id: String,
    pub tab_label: String,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendCorner,
    pub lines: Vec<PlotLine>,
}

/// How a scatter point is painted given the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointState {
    Normal,
    Selected,
    Dimmed,
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb.r, rgb.g, rgb.b)
    }

    fn corner(corner: LegendCorner) -> Corner {
        match corner {
            LegendCorner::TopLeft => Corner::LeftTop,
            LegendCorner::TopRight => Corner::RightTop,
            LegendCorner::BottomLeft => Corner::LeftBottom,
            LegendCorner::BottomRight => Corner::RightBottom,
        }
    }

    /// Draw a win-race step chart
    /// X-axis: date, Y-axis: cumulative wins
    pub fn draw_win_race(ui: &mut egui::Ui, panel: &PlotPanel) {
        ui.label(RichText::new(&panel.title).size(14.0).strong());

        Plot::new(&panel.id)
            .width(panel.width)
            .height(panel.height)
            .legend(Legend::default().position(Self::corner(panel.legend)))
            .x_axis_label(panel.x_label.as_str())
            .y_axis_label(panel.y_label.as_str())
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| format_day(mark.value))
            .label_formatter(|name, value| {
                let date = format_day(value.x);
                if name.is_empty() {
                    format!("{date}\n{:.0} wins", value.y)
                } else {
                    format!("{name}\n{date}\n{:.0} wins", value.y)
                }
            })
            .show(ui, |plot_ui| {
                for line in &panel.lines {
                    plot_ui.line(
                        Line::new(PlotPoints::from(line.points.clone()))
                            .color(line.color)
                            .width(2.0)
                            .name(&line.label),
                    );
                }
            });
    }

    /// Draw the attempts-vs-percentage scatter.
    ///
    /// A secondary-button drag draws a selection box; `box_start` holds its
    /// anchor between frames.
    pub fn draw_three_point_scatter(
        ui: &mut egui::Ui,
        spec: &ScatterSpec,
        points: &[ScatterPoint],
        state: impl Fn(usize) -> PointState,
        tooltip: &[Vec<(String, String)>],
        box_start: &mut Option<[f64; 2]>,
    ) -> ScatterResponse {
        ui.label(RichText::new(&spec.title).size(14.0).strong());

        let base = Self::color(spec.color);
        let selected = Self::color(spec.selection_color);
        let dimmed = Self::color(spec.nonselection_color).gamma_multiply(spec.nonselection_alpha);

        let response = Plot::new("three_point_scatter")
            .width(spec.width as f32)
            .height(spec.height as f32)
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .y_axis_formatter(|mark, _range| format_percent(mark.value))
            .show_x(false)
            .show_y(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                let mut groups: [Vec<[f64; 2]>; 3] = Default::default();
                for p in points {
                    let slot = match state(p.row) {
                        PointState::Normal => 0,
                        PointState::Selected => 1,
                        PointState::Dimmed => 2,
                    };
                    groups[slot].push([p.x, p.y]);
                }

                for (coords, color) in groups.into_iter().zip([base, selected, dimmed]) {
                    if coords.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::from(coords))
                            .shape(MarkerShape::Square)
                            .filled(true)
                            .radius(4.0)
                            .color(color),
                    );
                }

                let transform = plot_ui.transform();
                let hovered = plot_ui.pointer_coordinate().and_then(|pointer| {
                    let to_screen = |x: f64, y: f64| {
                        let pos = transform.position_from_point(&PlotPoint::new(x, y));
                        [pos.x, pos.y]
                    };
                    nearest_point(points, to_screen(pointer.x, pointer.y), to_screen, HOVER_RADIUS)
                });

                if let Some(idx) = hovered {
                    let p = points[idx];
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[p.x, p.y]]))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(7.5)
                            .color(HOVER_COLOR),
                    );
                }

                let pointer = plot_ui.pointer_coordinate().map(|p| [p.x, p.y]);
                let drag = plot_ui.response();
                if drag.drag_started_by(PointerButton::Secondary) {
                    *box_start = pointer;
                }

                let mut boxed = None;
                if let (Some(start), Some(end)) = (*box_start, pointer) {
                    if drag.drag_stopped_by(PointerButton::Secondary) {
                        boxed = Some((start, end));
                        *box_start = None;
                    } else {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(vec![
                                [start[0], start[1]],
                                [end[0], start[1]],
                                [end[0], end[1]],
                                [start[0], end[1]],
                            ]))
                            .fill_color(BOX_COLOR.gamma_multiply(0.15))
                            .stroke((1.0, BOX_COLOR)),
                        );
                    }
                }

                (hovered, boxed)
            });

        if !response.response.dragged_by(PointerButton::Secondary) {
            *box_start = None;
        }

        let clicked = response.response.clicked();
        let (hovered, boxed) = response.inner;
        let hovered_row = hovered.map(|idx| points[idx].row);

        if let Some(row) = hovered_row {
            if let Some(lines) = tooltip.get(row) {
                response.response.on_hover_ui_at_pointer(|ui| {
                    egui::Grid::new("three_point_tooltip")
                        .num_columns(2)
                        .spacing([8.0, 2.0])
                        .show(ui, |ui| {
                            for (label, value) in lines {
                                ui.label(RichText::new(label).strong());
                                ui.label(value);
                                ui.end_row();
                            }
                        });
                });
            }
        }

        ScatterResponse {
            hovered: hovered_row,
            clicked,
            boxed,
        }
    }
}

/// Rows of the points inside the axis-aligned box spanned by two corners.
pub fn points_in_box(points: &[ScatterPoint], a: [f64; 2], b: [f64; 2]) -> Vec<usize> {
    let (x_min, x_max) = (a[0].min(b[0]), a[0].max(b[0]));
    let (y_min, y_max) = (a[1].min(b[1]), a[1].max(b[1]));

    points
        .iter()
        .filter(|p| (x_min..=x_max).contains(&p.x) && (y_min..=y_max).contains(&p.y))
        .map(|p| p.row)
        .collect()
}

/// Index of the point closest to `target` in screen space, if within `radius`.
pub fn nearest_point(
    points: &[ScatterPoint],
    target: [f32; 2],
    to_screen: impl Fn(f64, f64) -> [f32; 2],
    radius: f32,
) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let s = to_screen(p.x, p.y);
            let dist_sq = (s[0] - target[0]).powi(2) + (s[1] - target[1]).powi(2);
            (i, dist_sq)
        })
        .filter(|&(_, dist_sq)| dist_sq <= radius * radius)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(x: f64, y: f64) -> [f32; 2] {
        [x as f32, y as f32]
    }

    fn points() -> Vec<ScatterPoint> {
        vec![
            ScatterPoint::new(0, 0.0, 0.0),
            ScatterPoint::new(1, 10.0, 0.0),
            ScatterPoint::new(2, 30.0, 30.0),
        ]
    }

    #[test]
    fn test_nearest_point_picks_closest() {
        assert_eq!(nearest_point(&points(), [8.0, 1.0], identity, 5.0), Some(1));
        assert_eq!(nearest_point(&points(), [1.0, 0.0], identity, 5.0), Some(0));
    }

    #[test]
    fn test_nearest_point_respects_radius() {
        assert_eq!(nearest_point(&points(), [20.0, 15.0], identity, 5.0), None);
        assert_eq!(nearest_point(&[], [0.0, 0.0], identity, 5.0), None);
    }

    #[test]
    fn test_points_in_box_any_corner_order() {
        assert_eq!(points_in_box(&points(), [-1.0, -1.0], [12.0, 5.0]), vec![0, 1]);
        assert_eq!(points_in_box(&points(), [12.0, 5.0], [-1.0, -1.0]), vec![0, 1]);
        assert_eq!(points_in_box(&points(), [40.0, 40.0], [5.0, 5.0]), vec![2]);
    }

    #[test]
    fn test_points_in_box_edges_are_inclusive() {
        assert_eq!(points_in_box(&points(), [10.0, 0.0], [30.0, 30.0]), vec![1, 2]);
        assert!(points_in_box(&points(), [1.0, 1.0], [9.0, 9.0]).is_empty());
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(
            ChartPlotter::color(Rgb::new(65, 105, 225)),
            Color32::from_rgb(65, 105, 225)
        );
    }
}
