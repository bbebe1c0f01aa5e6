/// Accumulates raw bytes and hands back complete `\n`-terminated lines.
#[derive(Debug, Default)]
pub struct LineAssembler {
    pending: Vec<u8>,
}

impl LineAssembler {
    /// Upper bound on a line without a terminator before it is discarded.
    pub const MAX_PENDING: usize = 4096;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        if self.pending.len() > Self::MAX_PENDING && !self.has_line() {
            tracing::warn!(
                "Discarding {} bytes without a line terminator",
                self.pending.len()
            );
            self.pending.clear();
        }
    }

    /// Whether a complete line is buffered.
    pub fn has_line(&self) -> bool {
        self.pending.contains(&b'\n')
    }

    /// Whether any bytes (complete or partial) are buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the next complete line without its `\n`.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        Some(line)
    }
}
