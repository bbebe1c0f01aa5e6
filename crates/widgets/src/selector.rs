use dewmon_core::{event::Message, TimeWindow};
use dewmon_theme::Theme;
use iced::{
    widget::{pick_list, row, text},
    Alignment, Element,
};

/// Drop-down for the visible time span.
#[derive(Debug, Default)]
pub struct WindowPicker;

impl WindowPicker {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, selected: TimeWindow, theme: &'a Theme) -> Element<'a, Message> {
        row![
            text("Time range").size(theme.font_size),
            pick_list(TimeWindow::ALL, Some(selected), Message::WindowSelected)
                .text_size(theme.font_size),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }
}
