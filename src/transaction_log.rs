// Transaction Log: append-only audit trail of every state mutation

use chrono::{DateTime, Local, TimeZone};

// Same layout as the C `ctime` calendar string, minus the trailing newline
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    entries: Vec<String>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    // Stamp the message with the current wall-clock time
    pub fn record(&mut self, message: &str) {
        self.record_at(Local::now(), message);
    }

    pub fn record_at<Tz>(&mut self, time: DateTime<Tz>, message: &str)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let timestamp = time.format(TIMESTAMP_FORMAT).to_string();
        tracing::debug!(%timestamp, entry = message, "transaction recorded");
        self.entries.push(format!("{} - {}", timestamp, message));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("\nTransaction Logs:\n");
        if self.entries.is_empty() {
            out.push_str("No transactions recorded yet.\n");
            return out;
        }
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }
}
