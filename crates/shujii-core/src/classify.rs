use crate::models::answer::AnswerSet;
use crate::models::category::{Category, Classification};

/// Score an answer set and assign its category.
///
/// The score is the number of "yes" answers. The category thresholds are
/// fixed in [`Category::from_score`] and are never taken from the caller.
pub fn classify(answers: &AnswerSet) -> Classification {
    let score = answers.yes_no().iter().filter(|&&yes| yes).count() as u8;
    Classification {
        score,
        category: Category::from_score(score),
    }
}
