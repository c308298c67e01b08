//! Instruction prompt for the narrative model.
//!
//! The prompt asks for a numbered four-part structure ([`NUMBERED_SECTIONS`])
//! with each number on the same line as its body. The export sanitizer
//! relies on this: its numbered-list rejoin rule repairs the cases where the
//! model still puts a bare `1.` on its own line, and its heading rules strip
//! the `#` / `**` decoration the prompt asks the model to avoid. Changing the
//! requested structure here means revisiting those sanitizer rules.

use serde::Serialize;
use tera::{Context, Tera};

use shujii_core::models::answer::AnswerSet;
use shujii_core::models::category::{Classification, MAX_SCORE};
use shujii_core::models::question::NOT_PROVIDED;

use crate::error::BedrockError;

/// System instruction sent alongside every prompt.
pub const SYSTEM_PROMPT: &str = "あなたは製造業のIT主治医です。";

/// Requested narrative length.
pub const LENGTH_BAND: &str = "600〜800字";

/// The sections the narrative must follow, in order. Rendered as `1.`..`4.`.
pub const NUMBERED_SECTIONS: [&str; 4] = [
    "診断結果の総評（タイプ名＋どんな状態かのイメージ）",
    "10問から読み取れる具体的な“症状”（特に弱い部分やリスク）",
    "自由記述（Q11・Q12）から読み取れる課題や背景の整理",
    "主治医としての処方箋（今後3〜6ヶ月で取り組むべき改善ステップを3つ程度）",
];

/// Topics the narrative must not discuss.
pub const PROHIBITED_TOPICS: [&str; 5] = [
    "特定のメーカー名・製品名・サービス名の推奨や批判",
    "具体的な費用・見積金額・投資額の提示",
    "法律・税務・労務に関する断定的な助言",
    "個人や部署を名指しで責める表現",
    "会社名・担当者名などの個人情報の問い合わせ",
];

/// Free-text answers are cut to this many characters before templating.
const FREE_TEXT_LIMIT: usize = 1000;

const TEMPLATE_NAME: &str = "diagnosis_prompt";

const PROMPT_TEMPLATE: &str = r#"あなたは「製造業のIT主治医」として、現場のシステム運用状態を診断し、
経営者・工場長にも分かりやすく説明する専門家です。

これから、ある工場の「IT主治医診断」の結果をお伝えします。
{{ length_band }}程度の日本語で、以下の構成に沿ってコメントを作成してください。

【診断情報】
- スコア: {{ score }} / {{ max_score }}
- タイプ: {{ type_label }}
- Yes/No 質問の結果:
{% for q in questions -%}
{{ q.id }}: {{ q.text }} → {{ q.answer }}
{% endfor %}
【自由記述】
{% for f in free_text -%}
- {{ f.title }}: {{ f.answer }}
{% endfor %}
【コメントの構成】
{% for section in sections -%}
{{ loop.index }}. {{ section }}
{% endfor %}
【書式】
- 見出しに「#」や「**」などの記号は使わない
- 各構成の番号は「1. 」の形式で、番号と本文を同じ行に書く
- 箇条書きは適宜使ってよい

【トーン】
- 専門用語はできるだけ避け、中堅製造業の経営者・工場長が読んで理解できる文章にする
- いたずらに不安をあおらず、「何から取り組めばよいか」が前向きに分かる表現にする

【禁止事項】
{% for topic in prohibited -%}
- {{ topic }}
{% endfor %}
では、この条件に沿ってコメントを書いてください。
"#;

#[derive(Serialize)]
struct PromptQuestion {
    id: &'static str,
    text: &'static str,
    answer: &'static str,
}

#[derive(Serialize)]
struct PromptFreeText {
    title: &'static str,
    answer: String,
}

/// Builds the instruction prompt from a classification and its answers.
///
/// Construction is deterministic: the same inputs always yield the same
/// string.
pub struct PromptBuilder {
    tera: Tera,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, BedrockError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, PROMPT_TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn build(
        &self,
        classification: &Classification,
        answers: &AnswerSet,
    ) -> Result<String, BedrockError> {
        let questions: Vec<PromptQuestion> = answers
            .answers()
            .map(|(q, yes)| PromptQuestion {
                id: q.id,
                text: q.text,
                answer: if yes { "Yes" } else { "No" },
            })
            .collect();

        let free_text: Vec<PromptFreeText> = answers
            .free_text()
            .entries()
            .map(|(q, text)| PromptFreeText {
                title: q.title,
                answer: clean_free_text(text),
            })
            .collect();

        let mut context = Context::new();
        context.insert("length_band", LENGTH_BAND);
        context.insert("score", &classification.score);
        context.insert("max_score", &MAX_SCORE);
        context.insert("type_label", classification.category.label());
        context.insert("questions", &questions);
        context.insert("free_text", &free_text);
        context.insert("sections", &NUMBERED_SECTIONS);
        context.insert("prohibited", &PROHIBITED_TOPICS);

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Flatten a free-text answer onto one line and cap its length, so a
/// respondent cannot break the prompt's list structure.
fn clean_free_text(text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(FREE_TEXT_LIMIT)
        .collect();

    match flattened.trim() {
        "" => NOT_PROVIDED.to_string(),
        trimmed => trimmed.to_string(),
    }
}
