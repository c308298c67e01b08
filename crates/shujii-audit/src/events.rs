use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use jiff::tz::{self, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::sink::EventSink;

/// Timestamps are recorded in Japan Standard Time.
const JST_OFFSET_HOURS: i8 = 9;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Visit,
    ClickStart,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Visit => "visit",
            EventType::ClickStart => "click_start",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One usage event, as written to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Local time in JST, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub event_type: EventType,
    /// Application tag, fixed per deployment.
    pub app: String,
    pub path: String,
}

impl UsageEvent {
    pub fn new(event_type: EventType, app: impl Into<String>, path: impl Into<String>) -> Self {
        Self::at(Timestamp::now(), event_type, app, path)
    }

    pub fn at(
        timestamp: Timestamp,
        event_type: EventType,
        app: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: format_jst(timestamp),
            event_type,
            app: app.into(),
            path: path.into(),
        }
    }
}

pub fn format_jst(timestamp: Timestamp) -> String {
    let jst = TimeZone::fixed(tz::offset(JST_OFFSET_HOURS));
    timestamp.to_zoned(jst).strftime(TIMESTAMP_FORMAT).to_string()
}

/// Records usage events to an optional sink.
///
/// Sink failures are logged and dropped; [`EventLog::record`] never reports
/// an error to the caller.
#[derive(Clone)]
pub struct EventLog {
    app: String,
    sink: Option<Arc<dyn EventSink>>,
}

impl EventLog {
    pub fn new(app: impl Into<String>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            app: app.into(),
            sink: Some(sink),
        }
    }

    /// An event log that records nothing.
    pub fn disabled() -> Self {
        Self {
            app: String::new(),
            sink: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn record(&self, event_type: EventType, path: &str) {
        let Some(sink) = &self.sink else {
            return;
        };

        let event = UsageEvent::new(event_type, self.app.as_str(), path);
        if let Err(e) = sink.write(&event) {
            warn!(
                error = %e,
                event_type = %event_type,
                path = %path,
                "failed to record usage event"
            );
        }
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("app", &self.app)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
