use serde::Serialize;

/// Number of yes/no questions in the diagnosis.
pub const YES_NO_COUNT: usize = 10;

/// Number of free-text questions in the diagnosis.
pub const FREE_TEXT_COUNT: usize = 2;

/// Marker substituted for an unanswered free-text question, wherever the
/// answer is shown to a reader or sent to the model.
pub const NOT_PROVIDED: &str = "（未記入）";

/// A yes/no question. The position in [`YES_NO_QUESTIONS`] is the axis order
/// of the radar chart and the display order everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
}

/// A free-text question together with the short title used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeTextQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub title: &'static str,
}

pub static YES_NO_QUESTIONS: [Question; YES_NO_COUNT] = [
    Question {
        id: "Q1",
        text: "現場がシステム操作について、担当者が休んでも「代わりの人がすぐに操作できる」状態ですか？",
    },
    Question {
        id: "Q2",
        text: "現場での実績入力（進捗・出来高・不良など）は、抜け漏れなく運用できていますか？",
    },
    Question {
        id: "Q3",
        text: "品番・工程・標準時間などのマスターデータは、継続的に更新されていますか？",
    },
    Question {
        id: "Q4",
        text: "システムの工程順序やリードタイムは現場実態と一致していますか？",
    },
    Question {
        id: "Q5",
        text: "現場の社員は「システムを使うと仕事がラクになる」と感じていますか？",
    },
    Question {
        id: "Q6",
        text: "経営会議では「Excelで加工し直した資料」ではなく、システムデータそのままを使っていますか？",
    },
    Question {
        id: "Q7",
        text: "現場や管理部門からの改善要求は定期的に吸い上げられ、システム改修につながっていますか？",
    },
    Question {
        id: "Q8",
        text: "製造・生産管理・品質・営業が“同じデータ”を見て意思疎通できていますか？",
    },
    Question {
        id: "Q9",
        text: "新人教育・引き継ぎの仕組みは運用されていますか？",
    },
    Question {
        id: "Q10",
        text: "経営層はシステム運用を“現場改善の中心”として位置づけていますか？",
    },
];

pub static FREE_TEXT_QUESTIONS: [FreeTextQuestion; FREE_TEXT_COUNT] = [
    FreeTextQuestion {
        id: "Q11",
        text: "現在、生産管理システムやIT運用で「最も困っていること」は何ですか？",
        title: "Q11 現在の困りごと",
    },
    FreeTextQuestion {
        id: "Q12",
        text: "もし“魔法のように”一つだけ改善できるとしたら、どこを変えたいですか？",
        title: "Q12 改善したい点",
    },
];

/// Position of a yes/no question id in the catalogue.
pub fn yes_no_index(id: &str) -> Option<usize> {
    YES_NO_QUESTIONS.iter().position(|q| q.id == id)
}

/// Position of a free-text question id in the catalogue.
pub fn free_text_index(id: &str) -> Option<usize> {
    FREE_TEXT_QUESTIONS.iter().position(|q| q.id == id)
}
