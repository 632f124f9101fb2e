//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{DashboardApp, LiveSession};
pub use chart_viewer::{ChartViewer, Selection};
pub use control_panel::{ControlPanel, ControlPanelAction, SourceStatus};
