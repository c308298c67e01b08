#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use lopdf::Document;
use lopdf::content::Content;
use shujii_audit::error::AuditError;
use shujii_audit::events::UsageEvent;
use shujii_audit::sink::EventSink;
use shujii_bedrock::error::BedrockError;
use shujii_bedrock::narrative::NarrativeGenerator;

/// Model output with the usual decoration: a heading, an orphan number,
/// emphasis and a Markdown list.
pub const DECORATED_NARRATIVE: &str = "## 総評\n\
                                       1.\n\
                                       回復期に入っています。\n\
                                       2. **症状**は軽微です。\n\
                                       - マスター更新を継続しましょう";

pub struct FixedGenerator {
    pub text: String,
    pub calls: AtomicUsize,
}

impl FixedGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NarrativeGenerator for FixedGenerator {
    async fn generate(&self, _system_prompt: &str, _prompt: &str) -> Result<String, BedrockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

pub struct FailingGenerator {
    pub calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl NarrativeGenerator for FailingGenerator {
    async fn generate(&self, _system_prompt: &str, _prompt: &str) -> Result<String, BedrockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BedrockError::Invocation("throttled".to_string()))
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub events: Mutex<Vec<UsageEvent>>,
}

impl EventSink for MemorySink {
    fn write(&self, event: &UsageEvent) -> Result<(), AuditError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Text lines of every page, in drawing order.
pub fn pdf_pages(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .map(|op| {
                    let bytes = op.operands[0].as_str().unwrap();
                    let units: Vec<u16> = bytes
                        .chunks(2)
                        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                        .collect();
                    String::from_utf16(&units).unwrap()
                })
                .collect()
        })
        .collect()
}

pub fn pdf_text(bytes: &[u8]) -> String {
    pdf_pages(bytes)
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
}
