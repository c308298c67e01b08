use std::env;
use std::path::PathBuf;

use shujii_bedrock::narrative::DEFAULT_MODEL_ID;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_APP_TAG: &str = "it-doctor";

/// Where usage events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLogTarget {
    /// Structured `tracing` records (the default).
    Tracing,
    /// One JSON object per line appended to this file.
    File(PathBuf),
    Disabled,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub model_id: String,
    pub region: String,
    pub app_tag: String,
    pub event_log: EventLogTarget,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset and empty values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let event_log = match var("SHUJII_EVENT_LOG") {
            None => EventLogTarget::Tracing,
            Some(v) if v.eq_ignore_ascii_case("off") => EventLogTarget::Disabled,
            Some(v) if v.eq_ignore_ascii_case("tracing") => EventLogTarget::Tracing,
            Some(path) => EventLogTarget::File(PathBuf::from(path)),
        };

        Self {
            model_id: var("SHUJII_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            app_tag: var("SHUJII_APP_TAG").unwrap_or_else(|| DEFAULT_APP_TAG.to_string()),
            event_log,
        }
    }
}
