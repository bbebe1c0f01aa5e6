use crate::state::TimeWindow;

/// All messages (events) that can flow through the application event loop.
///
/// Sources:
/// - Timer subscription / scheduler ticker → `Tick`
/// - Window picker or stdin                → `WindowSelected`
/// - Window close / Ctrl-C                 → `Shutdown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Periodic poll of the transport.
    Tick,
    /// User picked a new visible time window.
    WindowSelected(TimeWindow),
    /// Orderly shutdown: stop ticking, then release the transport.
    Shutdown,
}
