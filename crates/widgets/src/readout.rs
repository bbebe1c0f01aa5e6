use dewmon_core::{event::Message, StatusLine};
use dewmon_theme::Theme;
use iced::{
    widget::{row, text},
    Alignment, Element,
};

/// Latest values in one line, or a waiting notice before the first sample.
#[derive(Debug, Default)]
pub struct ReadoutWidget;

impl ReadoutWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, latest: Option<&'a StatusLine>, theme: &'a Theme) -> Element<'a, Message> {
        let Some(s) = latest else {
            return text("Waiting for sensor data…").size(theme.font_size).into();
        };

        let cell = |label: &str, value: String, color: dewmon_theme::Color| {
            text(format!("{label} {value}"))
                .size(theme.font_size)
                .color(color.to_iced())
        };

        row![
            text(s.time.format("%H:%M:%S").to_string()).size(theme.font_size),
            cell("T", format!("{:.2}°C", s.temperature), theme.temperature),
            cell("avg", format!("{:.2}°C", s.moving_avg_temperature), theme.moving_average),
            cell("RH", format!("{:.2}%", s.relative_humidity), theme.relative_humidity),
            cell("AH", format!("{:.2} g/m³", s.absolute_humidity), theme.absolute_humidity),
            cell("DP", format!("{:.2}°C", s.dew_point), theme.dew_point),
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .into()
    }
}
