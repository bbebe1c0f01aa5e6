//! Frame store shared by the GUI and headless front-ends.
//!
//! - [`Panel`] / [`SeriesKind`] describe the four charts and what each plots.
//! - [`ChartStore`] is the [`Renderer`] the update loop pushes views into; it
//!   remembers the last known y-range per panel so an empty window never
//!   collapses an axis.

pub mod panel;

pub use panel::{Panel, SeriesKind};

use chrono::{DateTime, Local};
use dewmon_core::{
    render::{AxisRange, Point},
    Renderer, WindowView,
};

/// Latest frame plus per-panel axis memory.
#[derive(Debug, Clone)]
pub struct ChartStore {
    view:     Option<WindowView>,
    ranges:   [AxisRange; 4],
    revision: u64,
}

impl Default for ChartStore {
    fn default() -> Self {
        Self {
            view:     None,
            ranges:   Panel::ALL.map(Panel::default_range),
            revision: 0,
        }
    }
}

impl ChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently rendered view, if any.
    pub fn view(&self) -> Option<&WindowView> {
        self.view.as_ref()
    }

    /// Number of redraws so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Shared x-axis of the latest view.
    pub fn x_range(&self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        self.view.as_ref().map(|v| v.x_range)
    }

    /// Y-range to draw `panel` with: latest auto-scaled range, else the last
    /// one seen, else the panel default.
    pub fn y_range(&self, panel: Panel) -> AxisRange {
        self.ranges[panel.index()]
    }

    /// Visible points of `kind` in the latest view.
    pub fn points(&self, kind: SeriesKind) -> &[Point] {
        match &self.view {
            Some(view) => kind.points(&view.series),
            None => &[],
        }
    }
}

impl Renderer for ChartStore {
    fn render(&mut self, view: &WindowView) {
        for panel in Panel::ALL {
            if let Some(range) = panel.axis(&view.axes) {
                self.ranges[panel.index()] = range;
            }
        }
        tracing::trace!(points = view.series.len(), "frame updated");
        self.view = Some(view.clone());
        self.revision += 1;
    }
}
