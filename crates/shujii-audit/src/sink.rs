use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use crate::error::AuditError;
use crate::events::UsageEvent;

/// Destination for usage events.
pub trait EventSink: Send + Sync {
    fn write(&self, event: &UsageEvent) -> Result<(), AuditError>;
}

/// Emits each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn write(&self, event: &UsageEvent) -> Result<(), AuditError> {
        info!(
            usage.timestamp = %event.timestamp,
            usage.event_type = %event.event_type,
            usage.app = %event.app,
            usage.path = %event.path,
            "usage event"
        );
        Ok(())
    }
}

/// Appends one JSON object per line to a file, creating it if needed.
#[derive(Debug)]
pub struct JsonlFileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for JsonlFileSink {
    fn write(&self, event: &UsageEvent) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let _guard = self.lock.lock().map_err(|_| AuditError::Poisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
