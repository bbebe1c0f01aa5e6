pub mod error;
pub mod event;
pub mod render;
pub mod state;
pub mod transport;

pub use error::{DewError, RecordError, Result};
pub use event::Message;
pub use render::{Renderer, WindowView};
pub use state::{DerivedPoint, Reading, StatusLine, TimeWindow};
pub use transport::Transport;
