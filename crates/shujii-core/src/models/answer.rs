use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::question::{
    FREE_TEXT_COUNT, FREE_TEXT_QUESTIONS, FreeTextQuestion, NOT_PROVIDED, Question,
    YES_NO_COUNT, YES_NO_QUESTIONS, free_text_index, yes_no_index,
};
use crate::error::CoreError;

/// Answers to the two free-text questions, in catalogue order.
///
/// Stored trimmed; an empty string means the question was left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreeText([String; FREE_TEXT_COUNT]);

impl FreeText {
    pub fn new(current_issue: impl Into<String>, wish: impl Into<String>) -> Self {
        Self([
            current_issue.into().trim().to_string(),
            wish.into().trim().to_string(),
        ])
    }

    /// The raw (trimmed) answer for `id`, empty if unanswered or unknown.
    pub fn get(&self, id: &str) -> &str {
        free_text_index(id).map_or("", |i| self.0[i].as_str())
    }

    /// The answer for `id`, or [`NOT_PROVIDED`] when it was left blank.
    pub fn display(&self, id: &str) -> &str {
        match self.get(id) {
            "" => NOT_PROVIDED,
            text => text,
        }
    }

    /// Iterate questions with their display text, in catalogue order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static FreeTextQuestion, &str)> {
        FREE_TEXT_QUESTIONS
            .iter()
            .map(move |q| (q, self.display(q.id)))
    }
}

/// One validated questionnaire response.
///
/// The yes/no answers are a fixed-size array, so the length invariant holds
/// by construction; order follows [`YES_NO_QUESTIONS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    yes_no: [bool; YES_NO_COUNT],
    free_text: FreeText,
}

impl AnswerSet {
    pub fn new(yes_no: [bool; YES_NO_COUNT], free_text: FreeText) -> Self {
        Self { yes_no, free_text }
    }

    /// Build from a slice, rejecting anything that is not exactly
    /// [`YES_NO_COUNT`] long.
    pub fn from_slice(yes_no: &[bool], free_text: FreeText) -> Result<Self, CoreError> {
        let yes_no = <[bool; YES_NO_COUNT]>::try_from(yes_no).map_err(|_| {
            CoreError::WrongAnswerCount {
                expected: YES_NO_COUNT,
                actual: yes_no.len(),
            }
        })?;
        Ok(Self::new(yes_no, free_text))
    }

    pub fn yes_no(&self) -> &[bool; YES_NO_COUNT] {
        &self.yes_no
    }

    pub fn free_text(&self) -> &FreeText {
        &self.free_text
    }

    /// Parse a JSON-encoded [`AnswerSubmission`] and validate it.
    pub fn from_json(json: &[u8]) -> Result<Self, CoreError> {
        let submission: AnswerSubmission = serde_json::from_slice(json)?;
        Self::try_from(submission)
    }

    /// Pair every yes/no question with its answer, in catalogue order.
    pub fn answers(&self) -> impl Iterator<Item = (&'static Question, bool)> + '_ {
        YES_NO_QUESTIONS.iter().zip(self.yes_no.iter().copied())
    }
}

/// The shape a form submission arrives in, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    pub answers: YesNoAnswers,
    #[serde(default)]
    pub free_text: HashMap<String, String>,
}

/// Yes/no answers either as an ordered list or keyed by question id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum YesNoAnswers {
    Ordered(Vec<bool>),
    ById(BTreeMap<String, bool>),
}

impl TryFrom<AnswerSubmission> for AnswerSet {
    type Error = CoreError;

    fn try_from(submission: AnswerSubmission) -> Result<Self, Self::Error> {
        let yes_no = match submission.answers {
            YesNoAnswers::Ordered(list) => list,
            YesNoAnswers::ById(map) => {
                if let Some(unknown) = map.keys().find(|id| yes_no_index(id).is_none()) {
                    return Err(CoreError::UnknownQuestion(unknown.clone()));
                }
                YES_NO_QUESTIONS
                    .iter()
                    .map(|q| {
                        map.get(q.id)
                            .copied()
                            .ok_or_else(|| CoreError::MissingAnswer(q.id.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        if let Some(unknown) = submission
            .free_text
            .keys()
            .find(|id| free_text_index(id).is_none())
        {
            return Err(CoreError::UnknownQuestion(unknown.clone()));
        }

        let text_for = |id: &str| submission.free_text.get(id).cloned().unwrap_or_default();
        let free_text = FreeText::new(
            text_for(FREE_TEXT_QUESTIONS[0].id),
            text_for(FREE_TEXT_QUESTIONS[1].id),
        );

        AnswerSet::from_slice(&yes_no, free_text)
    }
}
