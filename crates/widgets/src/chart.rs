use chrono::{DateTime, Local};
use dewmon_core::{event::Message, render::AxisRange};
use dewmon_renderer::{ChartStore, Panel, SeriesKind};
use dewmon_theme::{Color, Theme};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Element, Length, Pixels, Point, Rectangle, Renderer, Size,
};

/// Space reserved around the plot area for labels (pixels).
const MARGIN_LEFT: f32 = 56.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;

/// Grid divisions on each axis.
const GRID_STEPS: usize = 4;

/// One of the four stacked time-series charts.
#[derive(Debug, Clone, Copy)]
pub struct ChartWidget {
    panel: Panel,
}

impl ChartWidget {
    pub fn new(panel: Panel) -> Self {
        Self { panel }
    }

    pub fn view<'a>(&'a self, store: &'a ChartStore, theme: &'a Theme) -> Element<'a, Message> {
        canvas::Canvas::new(ChartProgram { panel: self.panel, store, theme })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

struct ChartProgram<'a> {
    panel: Panel,
    store: &'a ChartStore,
    theme: &'a Theme,
}

impl<'a> canvas::Program<Message> for ChartProgram<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let style = self.theme.chart();
        let y = self.store.y_range(self.panel);

        let plot = Rectangle::new(
            Point::new(MARGIN_LEFT, MARGIN_TOP),
            Size::new(
                (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
                (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            ),
        );

        label(&mut frame, self.panel.title(), Point::new(4.0, 2.0), style.foreground, style.font_size);
        self.draw_legend(&mut frame, bounds.width, style.font_size);

        // Horizontal grid + y labels.
        for step in 0..=GRID_STEPS {
            let frac = step as f32 / GRID_STEPS as f32;
            let py = plot.y + plot.height * (1.0 - frac);
            let value = y.lo + y.span() * f64::from(frac);
            frame.stroke(
                &Path::line(Point::new(plot.x, py), Point::new(plot.x + plot.width, py)),
                Stroke::default().with_width(1.0).with_color(style.grid.to_iced()),
            );
            label(
                &mut frame,
                &format!("{value:.1}"),
                Point::new(4.0, py - style.font_size / 2.0),
                style.foreground,
                style.font_size - 2.0,
            );
        }

        let Some((start, end)) = self.store.x_range() else {
            return vec![frame.into_geometry()];
        };

        // Vertical grid + time labels.
        for step in 0..=GRID_STEPS {
            let frac = step as f32 / GRID_STEPS as f32;
            let px = plot.x + plot.width * frac;
            let ts = start + (end - start) * step as i32 / GRID_STEPS as i32;
            frame.stroke(
                &Path::line(Point::new(px, plot.y), Point::new(px, plot.y + plot.height)),
                Stroke::default().with_width(1.0).with_color(style.grid.to_iced()),
            );
            label(
                &mut frame,
                &ts.format("%H:%M:%S").to_string(),
                Point::new(px - 28.0, plot.y + plot.height + 3.0),
                style.foreground,
                style.font_size - 2.0,
            );
        }

        let projection = Projection { start, end, y, plot };
        for &kind in self.panel.series() {
            let line = self.theme.line(series_color(self.theme, kind));
            for segment in projection.segments(self.store.points(kind)) {
                if segment.len() < 2 {
                    continue;
                }
                let path = Path::new(|b| {
                    b.move_to(segment[0]);
                    for p in &segment[1..] {
                        b.line_to(*p);
                    }
                });
                frame.stroke(
                    &path,
                    Stroke::default().with_width(line.width).with_color(line.color.to_iced()),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

impl ChartProgram<'_> {
    fn draw_legend(&self, frame: &mut Frame, width: f32, font_size: f32) {
        let mut x = width - MARGIN_RIGHT;
        for &kind in self.panel.series().iter().rev() {
            let text = kind.label();
            x -= text.chars().count() as f32 * font_size * 0.6 + 12.0;
            label(frame, text, Point::new(x, 2.0), series_color(self.theme, kind), font_size);
        }
    }
}

fn label(frame: &mut Frame, content: &str, position: Point, color: Color, size: f32) {
    frame.fill_text(canvas::Text {
        content: content.to_string(),
        position,
        color: color.to_iced(),
        size: Pixels(size),
        ..canvas::Text::default()
    });
}

fn series_color(theme: &Theme, kind: SeriesKind) -> Color {
    match kind {
        SeriesKind::Temperature      => theme.temperature,
        SeriesKind::MovingAverage    => theme.moving_average,
        SeriesKind::RelativeHumidity => theme.relative_humidity,
        SeriesKind::AbsoluteHumidity => theme.absolute_humidity,
        SeriesKind::DewPoint         => theme.dew_point,
    }
}

/// Maps `(timestamp, value)` samples into plot-area pixels.
#[derive(Debug, Clone, Copy)]
struct Projection {
    start: DateTime<Local>,
    end:   DateTime<Local>,
    y:     AxisRange,
    plot:  Rectangle,
}

impl Projection {
    /// Pixel position, or `None` for non-finite values.
    fn map(&self, ts: DateTime<Local>, value: f64) -> Option<Point> {
        if !value.is_finite() {
            return None;
        }
        let span_ms = (self.end - self.start).num_milliseconds().max(1) as f64;
        let fx = (ts - self.start).num_milliseconds() as f64 / span_ms;
        let span_y = if self.y.span() == 0.0 { 1.0 } else { self.y.span() };
        let fy = (value - self.y.lo) / span_y;

        Some(Point::new(
            self.plot.x + self.plot.width * fx as f32,
            self.plot.y + self.plot.height * (1.0 - fy as f32),
        ))
    }

    /// Consecutive runs of drawable points; a non-finite sample breaks the line.
    fn segments(&self, points: &[(DateTime<Local>, f64)]) -> Vec<Vec<Point>> {
        let mut segments = vec![Vec::new()];
        for &(ts, v) in points {
            match self.map(ts, v) {
                Some(p) => {
                    if let Some(current) = segments.last_mut() {
                        current.push(p);
                    }
                }
                None => {
                    if segments.last().is_some_and(|s| !s.is_empty()) {
                        segments.push(Vec::new());
                    }
                }
            }
        }
        segments.retain(|s| !s.is_empty());
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn projection() -> Projection {
        let start = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Projection {
            start,
            end: start + Duration::seconds(100),
            y: AxisRange::new(0.0, 10.0),
            plot: Rectangle::new(Point::new(10.0, 20.0), Size::new(200.0, 100.0)),
        }
    }

    #[test]
    fn corners_map_to_plot_edges() {
        let p = projection();
        assert_eq!(p.map(p.start, 0.0), Some(Point::new(10.0, 120.0)));
        assert_eq!(p.map(p.end, 10.0), Some(Point::new(210.0, 20.0)));
        assert_eq!(p.map(p.start + Duration::seconds(50), 5.0), Some(Point::new(110.0, 70.0)));
    }

    #[test]
    fn non_finite_values_split_segments() {
        let p = projection();
        let t = |s| p.start + Duration::seconds(s);
        let pts = [(t(0), 1.0), (t(10), 2.0), (t(20), f64::NAN), (t(30), 3.0), (t(40), f64::INFINITY)];
        let segs = p.segments(&pts);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].len(), 2);
        assert_eq!(segs[1].len(), 1);
    }

    #[test]
    fn flat_range_does_not_divide_by_zero() {
        let mut p = projection();
        p.y = AxisRange::new(5.0, 5.0);
        assert!(p.map(p.start, 5.0).is_some_and(|pt| pt.y.is_finite()));
    }
}
