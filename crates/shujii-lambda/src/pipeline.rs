//! The diagnosis pipeline: classify, build the prompt, generate the
//! narrative, sanitize it and render the document, in that order.

use tracing::{info, warn};

use shujii_bedrock::error::BedrockError;
use shujii_bedrock::narrative::{Narrative, NarrativeClient, NarrativeGenerator};
use shujii_bedrock::prompt::PromptBuilder;
use shujii_core::classify::classify;
use shujii_core::models::answer::AnswerSet;
use shujii_core::models::category::Classification;
use shujii_export::error::ExportError;
use shujii_export::render::{ReportContent, render_report};
use shujii_export::sanitize::sanitize;
use shujii_export::styles::DocumentStyles;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub classification: Classification,
    /// The narrative as generated (or the fallback text).
    pub narrative: Narrative,
    /// The narrative after sanitization, as drawn in the document.
    pub sanitized_narrative: String,
    /// The complete PDF.
    pub document: Vec<u8>,
}

/// Built once per process and shared by every request.
pub struct DiagnosisPipeline<G> {
    narrator: NarrativeClient<G>,
    prompts: PromptBuilder,
    styles: DocumentStyles,
}

impl<G: NarrativeGenerator> DiagnosisPipeline<G> {
    pub fn new(generator: G) -> Result<Self, BedrockError> {
        Ok(Self {
            narrator: NarrativeClient::new(generator),
            prompts: PromptBuilder::new()?,
            styles: DocumentStyles::default(),
        })
    }

    pub fn with_styles(mut self, styles: DocumentStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn generator(&self) -> &G {
        self.narrator.generator()
    }

    /// Run the whole pipeline for one answer set.
    ///
    /// Generation failures never fail the run; they produce the fallback
    /// narrative instead. The only error left is a document that cannot be
    /// encoded.
    pub async fn run(&self, answers: &AnswerSet) -> Result<Diagnosis, ExportError> {
        let classification = classify(answers);
        info!(
            score = classification.score,
            category = %classification.category,
            "answers classified"
        );

        let narrative = match self.prompts.build(&classification, answers) {
            Ok(prompt) => self.narrator.generate(&prompt).await,
            Err(e) => {
                warn!(error = %e, "prompt construction failed, using fallback text");
                Narrative::fallback(&e)
            }
        };

        let sanitized_narrative = sanitize(&narrative.text);
        let document = render_report(
            &ReportContent {
                classification,
                narrative: &sanitized_narrative,
                answers: Some(answers),
            },
            &self.styles,
        )?;

        info!(
            bytes = document.len(),
            fallback = narrative.is_fallback(),
            "diagnosis document rendered"
        );

        Ok(Diagnosis {
            classification,
            narrative,
            sanitized_narrative,
            document,
        })
    }
}
