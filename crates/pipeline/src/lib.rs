//! Rolling-window data pipeline: parse → derive → buffer → window → render.

pub mod buffer;
pub mod clock;
pub mod parser;
pub mod physics;
pub mod scheduler;
pub mod update_loop;
pub mod window;

pub use buffer::{RollingBuffer, SnapshotRow};
pub use clock::{Clock, SystemClock};
pub use parser::{decode_line, parse_record};
pub use update_loop::{TickOutcome, UpdateLoop};
pub use window::compute_view;

#[cfg(test)]
pub(crate) mod testing;
