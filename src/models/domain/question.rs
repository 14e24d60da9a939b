use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    // Older documents may lack it or carry garbage; such questions never score.
    #[serde(default)]
    pub correct_answer: Option<i32>,
}

impl Question {
    pub fn new(question: &str, options: [&str; OPTION_COUNT], correct_answer: usize) -> Self {
        Question {
            question: question.to_string(),
            options: options.map(str::to_string),
            correct_answer: i32::try_from(correct_answer).ok(),
        }
    }

    /// The correct option, if the stored index is usable.
    pub fn correct_index(&self) -> Option<usize> {
        self.correct_answer
            .and_then(|idx| usize::try_from(idx).ok())
            .filter(|idx| *idx < OPTION_COUNT)
    }

    pub fn is_correct(&self, selected_index: usize) -> bool {
        self.correct_index() == Some(selected_index)
    }

    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && self.options.iter().all(|opt| !opt.trim().is_empty())
    }
}
