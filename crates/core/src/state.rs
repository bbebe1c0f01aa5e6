use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One parsed sensor sample.
///
/// `timestamp` is the host wall-clock time at receipt; the device's own
/// timestamp field is only kept as provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: DateTime<Local>,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Percent. Usually 0 – 100 but not enforced.
    pub relative_humidity: f64,
    /// First wire field, unvalidated.
    pub device_timestamp: String,
    /// Fourth wire field, unvalidated and unused.
    pub raw_extra: String,
}

/// Values computed once from a [`Reading`] at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPoint {
    /// Degrees Celsius.
    pub dew_point: f64,
    /// Grams per cubic metre.
    pub absolute_humidity: f64,
    /// Mean temperature over the trailing averaging window, current reading included.
    pub moving_avg_temperature: f64,
}

/// Visible time span of the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "20m")]
    TwentyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "4h")]
    FourHours,
}

impl TimeWindow {
    /// Selector order, shortest first.
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::OneMinute,
        TimeWindow::FiveMinutes,
        TimeWindow::TwentyMinutes,
        TimeWindow::OneHour,
        TimeWindow::FourHours,
    ];

    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            TimeWindow::OneMinute     => Duration::minutes(1),
            TimeWindow::FiveMinutes   => Duration::minutes(5),
            TimeWindow::TwentyMinutes => Duration::minutes(20),
            TimeWindow::OneHour       => Duration::hours(1),
            TimeWindow::FourHours     => Duration::hours(4),
        }
    }

    /// Short token used in config files and on stdin.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            TimeWindow::OneMinute     => "1m",
            TimeWindow::FiveMinutes   => "5m",
            TimeWindow::TwentyMinutes => "20m",
            TimeWindow::OneHour       => "1h",
            TimeWindow::FourHours     => "4h",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeWindow::OneMinute     => "Last 1 minute",
            TimeWindow::FiveMinutes   => "Last 5 minutes",
            TimeWindow::TwentyMinutes => "Last 20 minutes",
            TimeWindow::OneHour       => "Last 1 hour",
            TimeWindow::FourHours     => "Last 4 hours",
        };
        f.write_str(label)
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown time window '{s}' (expected 1m, 5m, 20m, 1h or 4h)"))
    }
}

/// Human-readable summary of one ingested sample.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub time: DateTime<Local>,
    pub temperature: f64,
    pub moving_avg_temperature: f64,
    pub relative_humidity: f64,
    pub absolute_humidity: f64,
    pub dew_point: f64,
}

impl StatusLine {
    /// Printed after every status line.
    pub const SEPARATOR: &'static str = "------------------------------";

    pub fn new(reading: &Reading, derived: &DerivedPoint) -> Self {
        Self {
            time: reading.timestamp,
            temperature: reading.temperature,
            moving_avg_temperature: derived.moving_avg_temperature,
            relative_humidity: reading.relative_humidity,
            absolute_humidity: derived.absolute_humidity,
            dew_point: derived.dew_point,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Temperature: {:.2}°C | 20s Avg Temperature: {:.2}°C | \
             Relative Humidity: {:.2}% | Absolute Humidity: {:.2} g/m³ | Dew Point: {:.2}°C",
            self.time.format("%H:%M:%S"),
            self.temperature,
            self.moving_avg_temperature,
            self.relative_humidity,
            self.absolute_humidity,
            self.dew_point,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_window_is_four_hours() {
        assert_eq!(TimeWindow::default(), TimeWindow::FourHours);
        assert_eq!(TimeWindow::ALL.last(), Some(&TimeWindow::FourHours));
    }

    #[test]
    fn window_durations() {
        assert_eq!(TimeWindow::OneMinute.duration(), Duration::seconds(60));
        assert_eq!(TimeWindow::TwentyMinutes.duration(), Duration::seconds(1200));
        assert_eq!(TimeWindow::FourHours.duration(), Duration::seconds(4 * 3600));
    }

    #[test]
    fn window_tokens_parse() {
        for w in TimeWindow::ALL {
            assert_eq!(w.token().parse::<TimeWindow>(), Ok(w));
        }
        assert_eq!(" 1H ".parse::<TimeWindow>(), Ok(TimeWindow::OneHour));
        assert!("2h".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn window_deserializes_from_token() {
        #[derive(Deserialize)]
        struct Doc {
            window: TimeWindow,
        }
        let doc: Doc = toml::from_str(r#"window = "20m""#).unwrap();
        assert_eq!(doc.window, TimeWindow::TwentyMinutes);
    }

    #[test]
    fn status_line_format() {
        let time = Local.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        let line = StatusLine {
            time,
            temperature: 21.5,
            moving_avg_temperature: 21.456,
            relative_humidity: 60.0,
            absolute_humidity: 11.344,
            dew_point: 13.449,
        };
        assert_eq!(
            line.to_string(),
            "09:03:07 | Temperature: 21.50°C | 20s Avg Temperature: 21.46°C | \
             Relative Humidity: 60.00% | Absolute Humidity: 11.34 g/m³ | Dew Point: 13.45°C"
        );
        assert_eq!(StatusLine::SEPARATOR.len(), 30);
    }
}
