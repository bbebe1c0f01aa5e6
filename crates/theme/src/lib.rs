pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{ChartStyle, LineStyle};

use dewmon_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible: invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background:        Color,
    pub foreground:        Color,
    pub grid:              Color,
    pub temperature:       Color,
    pub moving_average:    Color,
    pub relative_humidity: Color,
    pub absolute_humidity: Color,
    pub dew_point:         Color,
    pub font_size:         f32,
    pub line_width:        f32,
    pub padding:           u16,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background:        Color::from_hex(&cfg.background).unwrap_or(Color::DARK),
            foreground:        Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
            grid:              Color::from_hex(&cfg.grid).unwrap_or(Color::SURFACE),
            temperature:       Color::from_hex(&cfg.temperature).unwrap_or(Color::RED),
            moving_average:    Color::from_hex(&cfg.moving_average).unwrap_or(Color::BLUE),
            relative_humidity: Color::from_hex(&cfg.relative_humidity).unwrap_or(Color::SKY),
            absolute_humidity: Color::from_hex(&cfg.absolute_humidity).unwrap_or(Color::GREEN),
            dew_point:         Color::from_hex(&cfg.dew_point).unwrap_or(Color::PINK),
            font_size:         cfg.font_size,
            line_width:        cfg.line_width.max(0.5),
            padding:           cfg.padding,
        }
    }

    /// Stroke for a series drawn in `color`.
    pub fn line(&self, color: Color) -> LineStyle {
        LineStyle { color, width: self.line_width }
    }

    pub fn chart(&self) -> ChartStyle {
        ChartStyle {
            foreground: self.foreground,
            grid:       self.grid.with_alpha(0.6),
            font_size:  self.font_size,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
