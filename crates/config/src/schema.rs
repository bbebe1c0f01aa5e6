use dewmon_core::{DewError, Result, TimeWindow};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure parsed from `dewmon.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DewConfig {
    /// Where the sensor is attached.
    pub serial: SerialConfig,
    /// Polling and history settings.
    pub sampling: SamplingConfig,
    /// Window size and the initially visible time span.
    pub display: DisplayConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl DewConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sampling.capacity == 0 {
            return Err(DewError::Config("sampling.capacity must be at least 1".into()));
        }
        if self.sampling.tick_ms == 0 {
            return Err(DewError::Config("sampling.tick_ms must be at least 1".into()));
        }
        if self.serial.device.trim().is_empty() {
            return Err(DewError::Config("serial.device must not be empty".into()));
        }
        Ok(())
    }
}

/// Serial device settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `"/dev/ttyACM1"` or `"COM3"`.
    pub device: String,
    pub baud_rate: u32,
    /// Upper bound for finishing a partially received line.
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyACM1".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 1_000,
        }
    }
}

/// Tick period and history sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Poll period in milliseconds.
    pub tick_ms: u64,
    /// Maximum buffered readings. Default covers 4 hours at 1 Hz.
    pub capacity: usize,
    /// Trailing span of the temperature moving average, in seconds.
    pub moving_average_secs: u32,
}

impl SamplingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            capacity: 4 * 60 * 60,
            moving_average_secs: 20,
        }
    }
}

/// Window geometry and initial selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// One of `"1m"`, `"5m"`, `"20m"`, `"1h"`, `"4h"`.
    pub default_window: TimeWindow,
    pub width: f32,
    pub height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_window: TimeWindow::default(),
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Axis labels and text.
    pub foreground: String,
    /// Grid lines.
    pub grid: String,
    pub temperature: String,
    pub moving_average: String,
    pub relative_humidity: String,
    pub absolute_humidity: String,
    pub dew_point: String,
    /// Font size in points.
    pub font_size: f32,
    /// Stroke width of plotted lines (pixels).
    pub line_width: f32,
    /// Inner padding around each chart (pixels).
    pub padding: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:        "#1e1e2e".to_string(), // Catppuccin Mocha: base
            foreground:        "#cdd6f4".to_string(), // Catppuccin Mocha: text
            grid:              "#45475a".to_string(), // Catppuccin Mocha: surface1
            temperature:       "#f38ba8".to_string(), // red
            moving_average:    "#89b4fa".to_string(), // blue
            relative_humidity: "#74c7ec".to_string(), // sapphire
            absolute_humidity: "#a6e3a1".to_string(), // green
            dew_point:         "#f5c2e7".to_string(), // pink
            font_size:         13.0,
            line_width:        1.5,
            padding:           8,
        }
    }
}
