use crate::error::Result;

/// Line-oriented source of raw sensor records.
///
/// Implementations are owned by a single update loop and polled from one
/// thread; neither call may block indefinitely.
pub trait Transport {
    /// Non-blocking check for pending input.
    fn has_data(&mut self) -> Result<bool>;

    /// Read one newline-delimited record, without the terminator.
    ///
    /// Only called after `has_data` returned `true`; may wait for the rest of
    /// a partially received line, bounded by the implementation's timeout.
    fn read_line(&mut self) -> Result<Vec<u8>>;

    /// Release the underlying device.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}
