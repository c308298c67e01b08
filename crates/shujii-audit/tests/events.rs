use std::sync::{Arc, Mutex};

use jiff::Timestamp;
use shujii_audit::error::AuditError;
use shujii_audit::events::{EventLog, EventType, UsageEvent, format_jst};
use shujii_audit::sink::{EventSink, JsonlFileSink, TracingSink};

#[derive(Default)]
struct MemorySink {
    events: Mutex<Vec<UsageEvent>>,
}

impl EventSink for MemorySink {
    fn write(&self, event: &UsageEvent) -> Result<(), AuditError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

struct BrokenSink;

impl EventSink for BrokenSink {
    fn write(&self, _event: &UsageEvent) -> Result<(), AuditError> {
        Err(AuditError::Io(std::io::Error::other("disk full")))
    }
}

#[test]
fn timestamps_are_in_jst() {
    let ts: Timestamp = "2024-03-31T15:30:00Z".parse().unwrap();
    assert_eq!(format_jst(ts), "2024-04-01 00:30:00");
}

#[test]
fn event_type_wire_names() {
    assert_eq!(serde_json::to_string(&EventType::Visit).unwrap(), "\"visit\"");
    assert_eq!(
        serde_json::to_string(&EventType::ClickStart).unwrap(),
        "\"click_start\""
    );
    let parsed: EventType = serde_json::from_str("\"click_start\"").unwrap();
    assert_eq!(parsed, EventType::ClickStart);
}

#[test]
fn record_fills_app_and_path() {
    let sink = Arc::new(MemorySink::default());
    let log = EventLog::new("it-doctor", sink.clone());

    log.record(EventType::Visit, "/");
    log.record(EventType::ClickStart, "/diagnosis");

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_type, EventType::Visit);
    assert_eq!(events[0].app, "it-doctor");
    assert_eq!(events[1].path, "/diagnosis");
    assert_eq!(events[1].timestamp.len(), "2024-04-01 00:30:00".len());
}

#[test]
fn sink_failures_are_swallowed() {
    let log = EventLog::new("it-doctor", Arc::new(BrokenSink));
    log.record(EventType::Visit, "/");
}

#[test]
fn disabled_log_records_nothing() {
    let log = EventLog::disabled();
    assert!(!log.is_enabled());
    log.record(EventType::Visit, "/");
}

#[test]
fn tracing_sink_accepts_events() {
    let event = UsageEvent::new(EventType::Visit, "it-doctor", "/");
    assert!(TracingSink.write(&event).is_ok());
}

#[test]
fn jsonl_sink_appends_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let log = EventLog::new("it-doctor", Arc::new(JsonlFileSink::new(&path)));

    log.record(EventType::Visit, "/");
    log.record(EventType::ClickStart, "/diagnosis");

    let contents = std::fs::read_to_string(&path).unwrap();
    let events: Vec<UsageEvent> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event_type, EventType::ClickStart);
    assert_eq!(events[1].app, "it-doctor");
}

#[test]
fn jsonl_sink_reports_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let sink = JsonlFileSink::new(dir.path().join("missing").join("events.jsonl"));
    let event = UsageEvent::new(EventType::Visit, "it-doctor", "/");
    assert!(matches!(sink.write(&event), Err(AuditError::Io(_))));
}
