//! Test doubles shared by the pipeline's unit tests.

use crate::clock::Clock;
use chrono::{DateTime, Duration, Local, TimeZone};
use dewmon_core::{DerivedPoint, DewError, Reading, Renderer, Result, Transport, WindowView};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub fn base() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// `base()` plus `secs` seconds.
pub fn at(secs: i64) -> DateTime<Local> {
    base() + Duration::seconds(secs)
}

pub fn reading(timestamp: DateTime<Local>, temperature: f64, relative_humidity: f64) -> Reading {
    Reading {
        timestamp,
        temperature,
        relative_humidity,
        device_timestamp: String::new(),
        raw_extra: String::new(),
    }
}

pub fn derived(moving_avg_temperature: f64) -> DerivedPoint {
    DerivedPoint {
        dew_point: 10.0,
        absolute_humidity: 9.0,
        moving_avg_temperature,
    }
}

#[derive(Debug, Default)]
pub struct Script {
    pub lines:  VecDeque<Result<Vec<u8>, String>>,
    pub closes: u32,
}

/// In-memory transport fed from a shared script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport(pub Rc<RefCell<Script>>);

impl ScriptedTransport {
    pub fn push(&self, line: &str) {
        self.0.borrow_mut().lines.push_back(Ok(line.as_bytes().to_vec()));
    }

    pub fn push_bytes(&self, bytes: &[u8]) {
        self.0.borrow_mut().lines.push_back(Ok(bytes.to_vec()));
    }

    pub fn push_error(&self, msg: &str) {
        self.0.borrow_mut().lines.push_back(Err(msg.to_string()));
    }

    pub fn closes(&self) -> u32 {
        self.0.borrow().closes
    }
}

impl Transport for ScriptedTransport {
    fn has_data(&mut self) -> Result<bool> {
        Ok(!self.0.borrow().lines.is_empty())
    }

    fn read_line(&mut self) -> Result<Vec<u8>> {
        match self.0.borrow_mut().lines.pop_front() {
            Some(Ok(line)) => Ok(line),
            Some(Err(msg)) => Err(DewError::Transport(msg)),
            None => Err(DewError::Transport("script exhausted".into())),
        }
    }

    fn close(self) -> Result<()> {
        self.0.borrow_mut().closes += 1;
        Ok(())
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock(pub Rc<Cell<DateTime<Local>>>);

impl ManualClock {
    pub fn starting_at(t: DateTime<Local>) -> Self {
        Self(Rc::new(Cell::new(t)))
    }

    pub fn set(&self, t: DateTime<Local>) {
        self.0.set(t);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.0.get()
    }
}

/// Keeps every view it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub views: Vec<WindowView>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &WindowView) {
        self.views.push(view.clone());
    }
}
