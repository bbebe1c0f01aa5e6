//! iced window for `dewmon`.
//!
//! Owns the application loop and wires together:
//! - the sampling tick (`iced::time::every`), which drives the pipeline
//! - the time-range picker
//! - the close request, which stops ticking and then releases the sensor

use dewmon_config::DewConfig;
use dewmon_core::{
    event::Message as AppMessage, DewError, Result, StatusLine, TimeWindow, Transport,
};
use dewmon_pipeline::{SystemClock, TickOutcome, UpdateLoop};
use dewmon_renderer::{ChartStore, Panel};
use dewmon_serial::SerialTransport;
use dewmon_theme::Theme;
use dewmon_widgets::{ChartWidget, ReadoutWidget, WindowPicker};
use iced::{
    widget::{column, container, row, Column},
    window, Alignment, Element, Length, Size, Subscription, Task,
};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the sensor and run the window until it is closed.
///
/// The port is opened before the event loop starts so that a missing device
/// ends the program with [`DewError::TransportUnavailable`].
pub fn run(config: DewConfig) -> Result<()> {
    let transport = SerialTransport::open(&config.serial)?;
    let pipeline = UpdateLoop::new(
        transport,
        SystemClock,
        &config.sampling,
        config.display.default_window,
    )?;
    let size = Size::new(config.display.width, config.display.height);

    // `boot` is `Fn`; hand the pipeline over exactly once.
    let seed = Mutex::new(Some((pipeline, config)));

    iced::application(
        move || Monitor::boot(&seed),
        Monitor::<SerialTransport>::update,
        Monitor::<SerialTransport>::view,
    )
    .title("Dew Point Monitor")
    .subscription(Monitor::<SerialTransport>::subscription)
    .style(Monitor::<SerialTransport>::style)
    .window_size(size)
    .exit_on_close_request(false)
    .run()
    .map_err(|e| DewError::Ui(e.to_string()))
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Top-level application messages.
#[derive(Debug, Clone)]
pub enum Message {
    /// Propagate a core event-bus message.
    App(AppMessage),
    /// The user asked to close the window.
    CloseRequested(window::Id),
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Monitor<T: Transport> {
    pipeline: Option<UpdateLoop<T>>,
    store:    ChartStore,
    theme:    Theme,
    tick:     Duration,
    window:   TimeWindow,
    latest:   Option<StatusLine>,
    running:  bool,
    picker:   WindowPicker,
    readout:  ReadoutWidget,
    charts:   [ChartWidget; 4],
}

impl<T: Transport + 'static> Monitor<T> {
    fn boot(seed: &Mutex<Option<(UpdateLoop<T>, DewConfig)>>) -> (Self, Task<Message>) {
        let monitor = match seed.lock().ok().and_then(|mut slot| slot.take()) {
            Some((pipeline, config)) => Self::new(Some(pipeline), &config),
            None => {
                warn!("Pipeline already handed out; starting without a sensor");
                Self::new(None, &DewConfig::default())
            }
        };
        (monitor, Task::none())
    }

    fn new(pipeline: Option<UpdateLoop<T>>, config: &DewConfig) -> Self {
        let window = pipeline
            .as_ref()
            .map_or(config.display.default_window, UpdateLoop::window);

        let mut monitor = Self {
            pipeline,
            store:   ChartStore::new(),
            theme:   Theme::from_config(&config.theme),
            tick:    config.sampling.tick(),
            window,
            latest:  None,
            running: true,
            picker:  WindowPicker::new(),
            readout: ReadoutWidget::new(),
            charts:  Panel::ALL.map(ChartWidget::new),
        };

        // Draw empty axes for the initial window before the first sample.
        if let Some(pipeline) = monitor.pipeline.as_mut() {
            pipeline.select_window(window, &mut monitor.store);
        }
        monitor
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::App(msg) => self.handle_app(msg),
            Message::CloseRequested(_) => self.handle_app(AppMessage::Shutdown),
        }
    }

    fn handle_app(&mut self, msg: AppMessage) -> Task<Message> {
        match msg {
            AppMessage::Tick => self.tick(),
            AppMessage::WindowSelected(window) => {
                self.window = window;
                if let Some(pipeline) = self.pipeline.as_mut() {
                    pipeline.select_window(window, &mut self.store);
                }
            }
            AppMessage::Shutdown => return self.shutdown(),
        }
        Task::none()
    }

    fn tick(&mut self) {
        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };
        if let TickOutcome::Ingested(status) = pipeline.tick(&mut self.store) {
            self.latest = Some(status);
        }
    }

    /// Stop ticking first, then release the transport, then leave.
    fn shutdown(&mut self) -> Task<Message> {
        self.running = false;
        if let Some(mut pipeline) = self.pipeline.take() {
            if let Err(e) = pipeline.shutdown() {
                warn!("Failed to close transport: {e}");
            }
        }
        info!("Shutting down");
        iced::exit()
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = f32::from(self.theme.padding);

        let header = row![
            self.picker.view(self.window, &self.theme).map(Message::App),
            self.readout.view(self.latest.as_ref(), &self.theme).map(Message::App),
        ]
        .spacing(gap * 3.0)
        .align_y(Alignment::Center);

        let charts = Column::with_children(
            self.charts
                .iter()
                .map(|chart| chart.view(&self.store, &self.theme).map(Message::App)),
        )
        .spacing(gap)
        .height(Length::Fill);

        container(column![header, charts].spacing(gap))
            .padding(self.theme.padding)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let close = window::close_requests().map(Message::CloseRequested);
        if !self.running {
            return close;
        }

        let tick = iced::time::every(self.tick).map(|_| Message::App(AppMessage::Tick));
        Subscription::batch([tick, close])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.foreground.to_iced(),
        }
    }
}
