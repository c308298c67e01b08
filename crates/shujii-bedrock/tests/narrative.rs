use std::sync::atomic::{AtomicUsize, Ordering};

use shujii_bedrock::error::BedrockError;
use shujii_bedrock::narrative::{
    FALLBACK_MARKER, NarrativeClient, NarrativeGenerator, NarrativeStatus,
};
use shujii_bedrock::prompt::SYSTEM_PROMPT;

struct FixedGenerator {
    text: &'static str,
    calls: AtomicUsize,
}

impl NarrativeGenerator for FixedGenerator {
    async fn generate(&self, system_prompt: &str, _prompt: &str) -> Result<String, BedrockError> {
        assert_eq!(system_prompt, SYSTEM_PROMPT);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

struct FailingGenerator {
    calls: AtomicUsize,
}

impl NarrativeGenerator for FailingGenerator {
    async fn generate(&self, _system_prompt: &str, _prompt: &str) -> Result<String, BedrockError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BedrockError::Invocation("quota exceeded".to_string()))
    }
}

#[tokio::test]
async fn successful_generation_is_tagged_generated() {
    let client = NarrativeClient::new(FixedGenerator {
        text: "1. 総評です。",
        calls: AtomicUsize::new(0),
    });

    let narrative = client.generate("prompt").await;

    assert_eq!(narrative.text, "1. 総評です。");
    assert_eq!(narrative.status, NarrativeStatus::Generated);
    assert!(!narrative.is_fallback());
    assert_eq!(client.generator().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failure_becomes_marked_fallback_without_retry() {
    let client = NarrativeClient::new(FailingGenerator {
        calls: AtomicUsize::new(0),
    });

    let narrative = client.generate("prompt").await;

    assert!(narrative.is_fallback());
    assert!(narrative.text.starts_with(FALLBACK_MARKER));
    assert!(narrative.text.contains("quota exceeded"));
    match &narrative.status {
        NarrativeStatus::Fallback { reason } => assert!(reason.contains("quota exceeded")),
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(client.generator().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fallback_text_is_deterministic() {
    let a = shujii_bedrock::narrative::fallback_text("timeout");
    let b = shujii_bedrock::narrative::fallback_text("timeout");
    assert_eq!(a, b);
    assert!(a.contains("エラー内容：timeout"));
}
