use crate::lines::LineAssembler;
use dewmon_config::SerialConfig;
use dewmon_core::{DewError, Result, Transport};
use serialport::SerialPort;
use std::io::{self, Read};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Per-`read` wait on the port; `read_line` loops on it up to its own deadline.
const PORT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Byte source behind a [`SerialTransport`].
pub trait Port: Read {
    /// Bytes that can be read right now without blocking.
    fn bytes_waiting(&self) -> io::Result<u32>;
}

impl Port for Box<dyn SerialPort> {
    fn bytes_waiting(&self) -> io::Result<u32> {
        self.bytes_to_read().map_err(io::Error::from)
    }
}

/// Sensor attached to a serial port, read as newline-delimited records.
pub struct SerialTransport<P: Port = Box<dyn SerialPort>> {
    device: String,
    port: P,
    lines: LineAssembler,
    read_timeout: Duration,
}

impl SerialTransport {
    /// Open `config.device` at `config.baud_rate`.
    ///
    /// Failure is reported as [`DewError::TransportUnavailable`]; callers
    /// should treat it as fatal.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = serialport::new(config.device.as_str(), config.baud_rate)
            .timeout(PORT_POLL_TIMEOUT)
            .open()
            .map_err(|e| DewError::TransportUnavailable {
                device: config.device.clone(),
                reason: e.to_string(),
            })?;

        info!("Opened {} at {} baud", config.device, config.baud_rate);

        Ok(Self::with_port(config.device.clone(), port, config.read_timeout()))
    }
}

impl<P: Port> SerialTransport<P> {
    /// Wrap an already opened port.
    pub fn with_port(device: String, port: P, read_timeout: Duration) -> Self {
        Self {
            device,
            port,
            lines: LineAssembler::new(),
            read_timeout,
        }
    }

    /// Pull whatever the port has (waiting at most one poll timeout).
    fn fill(&mut self) -> Result<usize> {
        let mut chunk = [0u8; 256];
        match self.port.read(&mut chunk) {
            Ok(n) => {
                self.lines.extend(&chunk[..n]);
                Ok(n)
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(DewError::Transport(format!("read {}: {e}", self.device))),
        }
    }
}

impl<P: Port> Transport for SerialTransport<P> {
    fn has_data(&mut self) -> Result<bool> {
        if self.lines.has_line() {
            return Ok(true);
        }
        // A partial line alone is not "data": wait until more bytes arrive.
        let waiting = self
            .port
            .bytes_waiting()
            .map_err(|e| DewError::Transport(format!("poll {}: {e}", self.device)))?;
        Ok(waiting > 0)
    }

    fn read_line(&mut self) -> Result<Vec<u8>> {
        let deadline = Instant::now() + self.read_timeout;
        loop {
            if let Some(line) = self.lines.next_line() {
                return Ok(line);
            }
            self.fill()?;
            if !self.lines.has_line() && Instant::now() >= deadline {
                return Err(DewError::Transport(format!(
                    "no complete line from {} within {} ms",
                    self.device,
                    self.read_timeout.as_millis()
                )));
            }
        }
    }

    fn close(self) -> Result<()> {
        let Self { device, port, .. } = self;
        drop(port);
        debug!("Closed {device}");
        Ok(())
    }
}
