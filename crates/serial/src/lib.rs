pub mod client;
pub mod lines;

pub use client::{Port, SerialTransport};
pub use lines::LineAssembler;
