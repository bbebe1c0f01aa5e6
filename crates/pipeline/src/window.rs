use crate::buffer::RollingBuffer;
use chrono::{DateTime, Local};
use dewmon_core::{
    render::{AxisRange, AxisRanges, Extent, SeriesExtents, SeriesSet},
    TimeWindow, WindowView,
};

/// Padding added around the auto-scaled y-ranges.
const TEMPERATURE_PAD: f64 = 1.0;
const HUMIDITY_PAD: f64 = 5.0;
const ABSOLUTE_HUMIDITY_PAD: f64 = 0.5;
const DEW_POINT_PAD: f64 = 1.0;

/// Build the visible slice of `buffer` for `window`, ending at `now`.
///
/// Keeps every entry with `timestamp >= now - window`, including entries
/// stamped slightly after `now`.
pub fn compute_view(buffer: &RollingBuffer, window: TimeWindow, now: DateTime<Local>) -> WindowView {
    let start = now - window.duration();

    let mut series = SeriesSet::default();
    for (reading, derived) in buffer.iter().filter(|(r, _)| r.timestamp >= start) {
        let ts = reading.timestamp;
        series.temperature.push((ts, reading.temperature));
        series.moving_avg.push((ts, derived.moving_avg_temperature));
        series.relative_humidity.push((ts, reading.relative_humidity));
        series.absolute_humidity.push((ts, derived.absolute_humidity));
        series.dew_point.push((ts, derived.dew_point));
    }

    let extents = SeriesExtents {
        temperature:       extent(&series.temperature),
        moving_avg:        extent(&series.moving_avg),
        relative_humidity: extent(&series.relative_humidity),
        absolute_humidity: extent(&series.absolute_humidity),
        dew_point:         extent(&series.dew_point),
    };

    WindowView {
        x_range: (start, now),
        axes: axis_ranges(&extents),
        series,
        extents,
    }
}

fn extent(points: &[(DateTime<Local>, f64)]) -> Option<Extent> {
    Extent::of(points.iter().map(|(_, v)| *v))
}

/// Apply the padding policy to per-series extents.
pub fn axis_ranges(extents: &SeriesExtents) -> AxisRanges {
    let temperature = match (extents.temperature, extents.moving_avg) {
        (Some(t), Some(a)) => Some(t.union(a)),
        (t, a) => t.or(a),
    };

    AxisRanges {
        temperature: temperature
            .map(|e| AxisRange::new(e.min - TEMPERATURE_PAD, e.max + TEMPERATURE_PAD)),
        humidity: extents.relative_humidity.map(|e| {
            AxisRange::new((e.min - HUMIDITY_PAD).max(0.0), (e.max + HUMIDITY_PAD).min(100.0))
        }),
        absolute_humidity: extents.absolute_humidity.map(|e| {
            AxisRange::new(e.min - ABSOLUTE_HUMIDITY_PAD, e.max + ABSOLUTE_HUMIDITY_PAD)
        }),
        dew_point: extents
            .dew_point
            .map(|e| AxisRange::new(e.min - DEW_POINT_PAD, e.max + DEW_POINT_PAD)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, derived, reading};
    use dewmon_core::DerivedPoint;

    fn filled(points: &[(i64, f64)]) -> RollingBuffer {
        let mut buf = RollingBuffer::with_capacity(64).unwrap();
        for &(secs, temp) in points {
            buf.append(reading(at(secs), temp, 50.0), derived(temp));
        }
        buf
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let secs: Vec<i64> = (0..40).map(|i| i * 10).collect();
        let buf = filled(&secs.iter().map(|&s| (s, s as f64)).collect::<Vec<_>>());
        let now = at(390);

        for window in TimeWindow::ALL {
            let view = compute_view(&buf, window, now);
            let start = now - window.duration();
            assert_eq!(view.x_range, (start, now));

            let shown: Vec<_> = view.series.temperature.iter().map(|(ts, _)| *ts).collect();
            let expected: Vec<_> = buf
                .iter()
                .map(|(r, _)| r.timestamp)
                .filter(|ts| *ts >= start)
                .collect();
            assert_eq!(shown, expected, "window {window}");
        }
    }

    #[test]
    fn boundary_point_is_included() {
        let buf = filled(&[(0, 10.0), (60, 11.0), (120, 12.0)]);
        let view = compute_view(&buf, TimeWindow::OneMinute, at(120));
        let temps: Vec<f64> = view.series.temperature.iter().map(|(_, v)| *v).collect();
        assert_eq!(temps, vec![11.0, 12.0]);
    }

    #[test]
    fn future_points_are_retained() {
        let buf = filled(&[(100, 10.0), (105, 11.0)]);
        let view = compute_view(&buf, TimeWindow::OneMinute, at(103));
        assert_eq!(view.series.len(), 2);
    }

    #[test]
    fn empty_window_has_no_ranges() {
        let buf = filled(&[(0, 10.0)]);
        let view = compute_view(&buf, TimeWindow::OneMinute, at(3600));
        assert!(view.series.is_empty());
        assert_eq!(view.axes, AxisRanges::default());
        assert_eq!(view.extents, SeriesExtents::default());
    }

    #[test]
    fn temperature_axis_spans_readings_and_average() {
        let mut buf = RollingBuffer::with_capacity(8).unwrap();
        buf.append(reading(at(0), 20.0, 50.0), derived(21.0));
        buf.append(reading(at(1), 22.0, 50.0), derived(21.0));

        let view = compute_view(&buf, TimeWindow::FourHours, at(2));
        assert_eq!(view.axes.temperature, Some(AxisRange::new(19.0, 23.0)));
    }

    #[test]
    fn average_can_widen_temperature_axis() {
        let mut buf = RollingBuffer::with_capacity(8).unwrap();
        buf.append(reading(at(0), 20.0, 50.0), derived(18.0));
        buf.append(reading(at(1), 22.0, 50.0), derived(25.0));

        let view = compute_view(&buf, TimeWindow::FourHours, at(2));
        assert_eq!(view.axes.temperature, Some(AxisRange::new(17.0, 26.0)));
    }

    #[test]
    fn humidity_axis_is_clamped_to_percent_range() {
        let mut buf = RollingBuffer::with_capacity(8).unwrap();
        buf.append(reading(at(0), 20.0, 2.0), derived(20.0));
        buf.append(reading(at(1), 20.0, 97.0), derived(20.0));
        let view = compute_view(&buf, TimeWindow::FourHours, at(2));
        assert_eq!(view.axes.humidity, Some(AxisRange::new(0.0, 100.0)));

        let mut buf = RollingBuffer::with_capacity(8).unwrap();
        buf.append(reading(at(0), 20.0, 40.0), derived(20.0));
        buf.append(reading(at(1), 20.0, 55.0), derived(20.0));
        let view = compute_view(&buf, TimeWindow::FourHours, at(2));
        assert_eq!(view.axes.humidity, Some(AxisRange::new(35.0, 60.0)));
    }

    #[test]
    fn absolute_humidity_and_dew_point_padding() {
        let mut buf = RollingBuffer::with_capacity(8).unwrap();
        let pts = [(8.0, 10.0), (9.5, 12.0)];
        for (i, &(ah, dp)) in pts.iter().enumerate() {
            buf.append(
                reading(at(i as i64), 20.0, 50.0),
                DerivedPoint { dew_point: dp, absolute_humidity: ah, moving_avg_temperature: 20.0 },
            );
        }
        let view = compute_view(&buf, TimeWindow::FourHours, at(5));
        assert_eq!(view.axes.absolute_humidity, Some(AxisRange::new(7.5, 10.0)));
        assert_eq!(view.axes.dew_point, Some(AxisRange::new(9.0, 13.0)));
    }

    #[test]
    fn non_finite_dew_point_does_not_poison_axis() {
        let mut buf = RollingBuffer::with_capacity(8).unwrap();
        buf.append(
            reading(at(0), 20.0, 0.0),
            DerivedPoint { dew_point: f64::NAN, absolute_humidity: 0.0, moving_avg_temperature: 20.0 },
        );
        let view = compute_view(&buf, TimeWindow::FourHours, at(1));
        assert_eq!(view.series.dew_point.len(), 1);
        assert_eq!(view.axes.dew_point, None);
        assert!(view.axes.temperature.is_some());

        buf.append(
            reading(at(1), 20.0, 50.0),
            DerivedPoint { dew_point: 9.0, absolute_humidity: 8.0, moving_avg_temperature: 20.0 },
        );
        let view = compute_view(&buf, TimeWindow::FourHours, at(2));
        assert_eq!(view.axes.dew_point, Some(AxisRange::new(8.0, 10.0)));
    }
}
