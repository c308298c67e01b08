use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use tracing_subscriber::EnvFilter;

use shujii_audit::events::EventLog;
use shujii_audit::sink::{JsonlFileSink, TracingSink};
use shujii_bedrock::narrative::BedrockNarrator;
use shujii_lambda::config::{EventLogTarget, LambdaConfig};
use shujii_lambda::pipeline::DiagnosisPipeline;
use shujii_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = LambdaConfig::from_env();
    tracing::info!(
        model_id = %config.model_id,
        region = %config.region,
        app = %config.app_tag,
        "starting diagnosis service"
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;
    let narrator = BedrockNarrator::new(&sdk_config, config.model_id.clone());
    let pipeline = DiagnosisPipeline::new(narrator)?;

    let events = match &config.event_log {
        EventLogTarget::Tracing => EventLog::new(config.app_tag.clone(), Arc::new(TracingSink)),
        EventLogTarget::File(path) => {
            EventLog::new(config.app_tag.clone(), Arc::new(JsonlFileSink::new(path)))
        }
        EventLogTarget::Disabled => EventLog::disabled(),
    };

    let app = shujii_lambda::app(AppState::new(pipeline, events));

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
