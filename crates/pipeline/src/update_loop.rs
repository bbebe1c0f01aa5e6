use crate::{
    buffer::{moving_average, RollingBuffer},
    clock::{Clock, SystemClock},
    parser::{decode_line, parse_record},
    physics,
    window::compute_view,
};
use chrono::{DateTime, Duration, Local};
use dewmon_config::SamplingConfig;
use dewmon_core::{
    DerivedPoint, Reading, RecordError, Renderer, Result, StatusLine, TimeWindow, Transport,
    WindowView,
};
use tracing::{debug, info, warn};

/// Log target for the per-sample status lines.
pub const STATUS_TARGET: &str = "dewmon::status";

/// Where the loop is within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next tick.
    Idle,
    /// Handling one line.
    Processing,
}

/// What a single [`UpdateLoop::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing was waiting on the transport.
    Idle,
    /// A line arrived but was rejected; the buffer is unchanged.
    Malformed(RecordError),
    /// The transport reported an error while reading.
    ReadFailed(String),
    /// The transport has already been released.
    Closed,
    /// A reading was buffered and a fresh view rendered.
    Ingested(StatusLine),
}

/// Single owner of the transport, the rolling history and the window selection.
///
/// Both entry points (`tick` and `select_window`) take `&mut self`, so a
/// caller dispatching them from one thread can never interleave them.
pub struct UpdateLoop<T: Transport, C: Clock = SystemClock> {
    transport: Option<T>,
    clock: C,
    buffer: RollingBuffer,
    window: TimeWindow,
    moving_average_span: Duration,
    phase: Phase,
}

impl<T: Transport, C: Clock> UpdateLoop<T, C> {
    pub fn new(transport: T, clock: C, sampling: &SamplingConfig, window: TimeWindow) -> Result<Self> {
        Ok(Self {
            transport: Some(transport),
            clock,
            buffer: RollingBuffer::with_capacity(sampling.capacity)?,
            window,
            moving_average_span: Duration::seconds(i64::from(sampling.moving_average_secs)),
            phase: Phase::Idle,
        })
    }

    pub fn buffer(&self) -> &RollingBuffer {
        &self.buffer
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Poll the transport once and ingest at most one line.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> TickOutcome {
        let Some(transport) = self.transport.as_mut() else {
            return TickOutcome::Closed;
        };

        match transport.has_data() {
            Ok(true) => {}
            Ok(false) => return TickOutcome::Idle,
            Err(e) => {
                warn!("Transport poll failed: {e}");
                return TickOutcome::ReadFailed(e.to_string());
            }
        }

        self.phase = Phase::Processing;
        let outcome = self.process(renderer);
        self.phase = Phase::Idle;
        outcome
    }

    fn process<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> TickOutcome {
        let raw = match self.transport.as_mut().map(|t| t.read_line()) {
            Some(Ok(raw)) => raw,
            Some(Err(e)) => {
                warn!("Transport read failed: {e}");
                return TickOutcome::ReadFailed(e.to_string());
            }
            None => return TickOutcome::Closed,
        };

        let received_at = self.receipt_time();
        let reading = match decode_line(&raw).and_then(|line| parse_record(line, received_at)) {
            Ok(reading) => reading,
            Err(e) => {
                debug!("Dropping record: {e}");
                return TickOutcome::Malformed(e);
            }
        };

        let derived = self.derive(&reading);
        let status = StatusLine::new(&reading, &derived);
        self.buffer.append(reading, derived);

        renderer.render(&compute_view(&self.buffer, self.window, received_at));

        info!(target: STATUS_TARGET, "{status}");
        info!(target: STATUS_TARGET, "{}", StatusLine::SEPARATOR);
        TickOutcome::Ingested(status)
    }

    /// Change the visible window and redraw immediately.
    pub fn select_window<R: Renderer + ?Sized>(&mut self, window: TimeWindow, renderer: &mut R) {
        if window != self.window {
            debug!("Time window changed: {} -> {}", self.window, window);
        }
        self.window = window;
        renderer.render(&self.current_view());
    }

    /// View of the current selection ending now.
    pub fn current_view(&self) -> WindowView {
        compute_view(&self.buffer, self.window, self.clock.now())
    }

    /// Release the transport. Later calls are no-ops.
    pub fn shutdown(&mut self) -> Result<()> {
        match self.transport.take() {
            Some(transport) => {
                info!("Closing transport");
                transport.close()
            }
            None => Ok(()),
        }
    }

    /// Current wall-clock time, never earlier than the newest buffered entry.
    fn receipt_time(&self) -> DateTime<Local> {
        let now = self.clock.now();
        match self.buffer.latest() {
            Some((last, _)) if last.timestamp > now => {
                debug!("Wall clock stepped back; reusing last timestamp");
                last.timestamp
            }
            _ => now,
        }
    }

    fn derive(&self, reading: &Reading) -> DerivedPoint {
        let mut recent = self
            .buffer
            .recent_temperatures(reading.timestamp - self.moving_average_span);
        // A full buffer overwrites its oldest entry on append; that one no longer counts.
        if self.buffer.len() == self.buffer.capacity() && recent.len() == self.buffer.len() {
            recent.remove(0);
        }
        let avg = moving_average(&recent, reading.temperature);
        physics::derive(reading.temperature, reading.relative_humidity, avg)
    }
}

impl<T: Transport, C: Clock> Drop for UpdateLoop<T, C> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Failed to close transport: {e}");
        }
    }
}
