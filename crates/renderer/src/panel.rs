use dewmon_core::render::{AxisRange, AxisRanges, Point, SeriesSet};

/// One of the four stacked charts, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Temperature,
    RelativeHumidity,
    AbsoluteHumidity,
    DewPoint,
}

impl Panel {
    pub const ALL: [Panel; 4] = [
        Panel::Temperature,
        Panel::RelativeHumidity,
        Panel::AbsoluteHumidity,
        Panel::DewPoint,
    ];

    pub fn index(self) -> usize {
        match self {
            Panel::Temperature      => 0,
            Panel::RelativeHumidity => 1,
            Panel::AbsoluteHumidity => 2,
            Panel::DewPoint         => 3,
        }
    }

    /// Y-axis label.
    pub fn title(self) -> &'static str {
        match self {
            Panel::Temperature      => "Temperature (°C)",
            Panel::RelativeHumidity => "Relative Humidity (%)",
            Panel::AbsoluteHumidity => "Absolute Humidity (g/m³)",
            Panel::DewPoint         => "Dew Point (°C)",
        }
    }

    /// Series drawn on this panel, back to front.
    pub fn series(self) -> &'static [SeriesKind] {
        match self {
            Panel::Temperature      => &[SeriesKind::Temperature, SeriesKind::MovingAverage],
            Panel::RelativeHumidity => &[SeriesKind::RelativeHumidity],
            Panel::AbsoluteHumidity => &[SeriesKind::AbsoluteHumidity],
            Panel::DewPoint         => &[SeriesKind::DewPoint],
        }
    }

    /// Range used before any data has been seen.
    pub fn default_range(self) -> AxisRange {
        match self {
            Panel::Temperature      => AxisRange::new(0.0, 40.0),
            Panel::RelativeHumidity => AxisRange::new(0.0, 100.0),
            Panel::AbsoluteHumidity => AxisRange::new(0.0, 30.0),
            Panel::DewPoint         => AxisRange::new(-10.0, 30.0),
        }
    }

    /// This panel's entry in a set of auto-scaled ranges.
    pub fn axis(self, axes: &AxisRanges) -> Option<AxisRange> {
        match self {
            Panel::Temperature      => axes.temperature,
            Panel::RelativeHumidity => axes.humidity,
            Panel::AbsoluteHumidity => axes.absolute_humidity,
            Panel::DewPoint         => axes.dew_point,
        }
    }
}

/// One plotted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Temperature,
    MovingAverage,
    RelativeHumidity,
    AbsoluteHumidity,
    DewPoint,
}

impl SeriesKind {
    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Temperature      => "Temperature",
            SeriesKind::MovingAverage    => "20s Moving Avg",
            SeriesKind::RelativeHumidity => "Relative Humidity",
            SeriesKind::AbsoluteHumidity => "Absolute Humidity",
            SeriesKind::DewPoint         => "Dew Point",
        }
    }

    pub fn points(self, set: &SeriesSet) -> &[Point] {
        match self {
            SeriesKind::Temperature      => &set.temperature,
            SeriesKind::MovingAverage    => &set.moving_avg,
            SeriesKind::RelativeHumidity => &set.relative_humidity,
            SeriesKind::AbsoluteHumidity => &set.absolute_humidity,
            SeriesKind::DewPoint         => &set.dew_point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_order() {
        for (i, panel) in Panel::ALL.into_iter().enumerate() {
            assert_eq!(panel.index(), i);
        }
    }

    #[test]
    fn every_series_is_on_exactly_one_panel() {
        let all: Vec<SeriesKind> = Panel::ALL.iter().flat_map(|p| p.series().iter().copied()).collect();
        assert_eq!(all.len(), 5);
        for kind in [
            SeriesKind::Temperature,
            SeriesKind::MovingAverage,
            SeriesKind::RelativeHumidity,
            SeriesKind::AbsoluteHumidity,
            SeriesKind::DewPoint,
        ] {
            assert_eq!(all.iter().filter(|k| **k == kind).count(), 1);
        }
    }
}
