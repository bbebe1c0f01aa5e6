use crate::colors::Color;

/// How one plotted series is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
}

/// Visual settings shared by every chart panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub foreground: Color,
    pub grid:       Color,
    pub font_size:  f32,
}
