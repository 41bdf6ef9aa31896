//! Loop-owned polling state: the time cursor and the dedup memory

/// Class of an outgoing message; each class is deduplicated on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Status,
    Error,
}

/// Everything the poll loop remembers between cycles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (Unix seconds) of the next poll window
    pub cursor: i64,
    pub last_status_message: Option<String>,
    pub last_error_message: Option<String>,
    pub consecutive_failures: u32,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    /// Move the cursor to the server's clock
    pub fn advance_cursor(&mut self, current_date: i64) {
        self.cursor = current_date;
    }

    /// Whether `text` repeats the last message of the same kind
    pub fn is_duplicate(&self, kind: MessageKind, text: &str) -> bool {
        self.last_message(kind) == Some(text)
    }

    pub fn last_message(&self, kind: MessageKind) -> Option<&str> {
        match kind {
            MessageKind::Status => self.last_status_message.as_deref(),
            MessageKind::Error => self.last_error_message.as_deref(),
        }
    }

    /// Remember `text` as the last message sent for its kind
    pub fn remember(&mut self, kind: MessageKind, text: &str) {
        let slot = match kind {
            MessageKind::Status => &mut self.last_status_message,
            MessageKind::Error => &mut self.last_error_message,
        };
        *slot = Some(text.to_string());
    }

    /// Track the failure streak, returning its new length
    pub fn record_cycle(&mut self, kind: MessageKind) -> u32 {
        match kind {
            MessageKind::Status => self.consecutive_failures = 0,
            MessageKind::Error => self.consecutive_failures += 1,
        }
        self.consecutive_failures
    }
}
