use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Highest possible score: one point per yes/no question.
pub const MAX_SCORE: u8 = 10;

/// Severity category of a diagnosis. `A` is the most severe, `E` the
/// healthiest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum Category {
    A,
    B,
    C,
    D,
    E,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::A,
        Category::B,
        Category::C,
        Category::D,
        Category::E,
    ];

    /// Map a score to its category. Total over `u8`; anything above the
    /// last threshold is `E`.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => Category::A,
            4..=5 => Category::B,
            6..=7 => Category::C,
            8..=9 => Category::D,
            _ => Category::E,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
            Category::D => "D",
            Category::E => "E",
        }
    }

    /// Display label. Contains pictographs the PDF font cannot draw; the
    /// renderer strips those itself.
    pub fn label(self) -> &'static str {
        match self {
            Category::A => "🚨 IT機能不全・重篤（ICU行き）",
            Category::B => "⚠️ メタボリック・システム症候群",
            Category::C => "💊 慢性・属人化疲労",
            Category::D => "🏃 リハビリ順調・回復期",
            Category::E => "💪 健康優良・アスリート企業",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::A => {
                "システム運用がほぼ機能しておらず、現場も管理も疲弊している重症レベルです。"
            }
            Category::B => {
                "表面上は動いているものの、ムダな二重入力や属人化が積み重なり、慢性的な負荷が高い状態です。"
            }
            Category::C => {
                "一部ではうまく活用されているものの、人に依存した運用や更新の遅れがボトルネックになっています。"
            }
            Category::D => {
                "仕組みづくりは一定進んでおり、あと一歩のテコ入れで“自走モード”に入れる状態です。"
            }
            Category::E => {
                "現場と経営が同じデータを見て動けている、理想的な運用状態に近い企業です。"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of classifying one answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub score: u8,
    pub category: Category,
}

impl Classification {
    /// Fixed-format score string, e.g. `8 / 10`.
    pub fn score_display(&self) -> String {
        format!("{} / {}", self.score, MAX_SCORE)
    }
}
