//! Output of the windowing stage and the contract its consumers implement.

use chrono::{DateTime, Local};

/// One plotted sample.
pub type Point = (DateTime<Local>, f64);

/// Inclusive `[min, max]` of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Extent of the finite values in `values`; `None` if there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(e) => Some(Self { min: e.min.min(v), max: e.max.max(v) }),
            })
    }

    /// Smallest extent covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Y-axis bounds for one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub lo: f64,
    pub hi: f64,
}

impl AxisRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }
}

/// The five plotted series, each as `(timestamp, value)` points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub temperature:       Vec<Point>,
    pub moving_avg:        Vec<Point>,
    pub relative_humidity: Vec<Point>,
    pub absolute_humidity: Vec<Point>,
    pub dew_point:         Vec<Point>,
}

impl SeriesSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Per-series min/max over the visible points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesExtents {
    pub temperature:       Option<Extent>,
    pub moving_avg:        Option<Extent>,
    pub relative_humidity: Option<Extent>,
    pub absolute_humidity: Option<Extent>,
    pub dew_point:         Option<Extent>,
}

/// Auto-scaled y-ranges for the four charts. `None` = no data yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisRanges {
    /// Shared by temperature and its moving average.
    pub temperature:       Option<AxisRange>,
    pub humidity:          Option<AxisRange>,
    pub absolute_humidity: Option<AxisRange>,
    pub dew_point:         Option<AxisRange>,
}

/// Everything a renderer needs for one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowView {
    /// Shared x-axis: `[now - window, now]`.
    pub x_range: (DateTime<Local>, DateTime<Local>),
    pub series:  SeriesSet,
    pub extents: SeriesExtents,
    pub axes:    AxisRanges,
}

/// Consumer of [`WindowView`]s. Rendering the same view twice must be harmless.
pub trait Renderer {
    fn render(&mut self, view: &WindowView);
}
