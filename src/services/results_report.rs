use crate::models::domain::{Quiz, QuizResult};

#[derive(Clone, Debug, PartialEq)]
pub struct QuizSummary {
    pub quiz_id: String,
    pub title: String,
    pub attempts: usize,
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsReport {
    pub total_quizzes: usize,
    pub total_attempts: usize,
    pub quizzes: Vec<QuizSummary>,
}

pub fn summarize_quiz(quiz: &Quiz, results: &[QuizResult]) -> QuizSummary {
    let percentages: Vec<f64> = results
        .iter()
        .filter(|r| r.quiz_id == quiz.id)
        .map(|r| r.percentage)
        .collect();

    let attempts = percentages.len();
    let (highest, lowest, average) = if attempts == 0 {
        (0.0, 0.0, 0.0)
    } else {
        (
            percentages.iter().copied().fold(f64::MIN, f64::max),
            percentages.iter().copied().fold(f64::MAX, f64::min),
            percentages.iter().sum::<f64>() / attempts as f64,
        )
    };

    QuizSummary {
        quiz_id: quiz.id.clone(),
        title: quiz.title.clone(),
        attempts,
        highest,
        lowest,
        average,
    }
}

/// Per-quiz aggregates in catalog order.
pub fn build_report(quizzes: &[Quiz], results: &[QuizResult]) -> ResultsReport {
    ResultsReport {
        total_quizzes: quizzes.len(),
        total_attempts: results.len(),
        quizzes: quizzes.iter().map(|q| summarize_quiz(q, results)).collect(),
    }
}

pub fn results_for_user<'a>(results: &'a [QuizResult], user_id: &str) -> Vec<&'a QuizResult> {
    results.iter().filter(|r| r.user_id == user_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{capitals_quiz, result_for};

    #[test]
    fn summary_of_unattempted_quiz_is_zero() {
        let quiz = capitals_quiz("quiz-1", "teacher-1");
        let summary = summarize_quiz(&quiz, &[]);

        assert_eq!(summary.attempts, 0);
        assert_eq!(summary.highest, 0.0);
        assert_eq!(summary.lowest, 0.0);
    }

    #[test]
    fn report_aggregates_per_quiz() {
        let quizzes = vec![
            capitals_quiz("quiz-1", "teacher-1"),
            capitals_quiz("quiz-2", "teacher-1"),
        ];
        let results = vec![
            result_for("r-1", "quiz-1", "s-1", 1, 4),
            result_for("r-2", "quiz-1", "s-2", 3, 4),
            result_for("r-3", "quiz-2", "s-1", 2, 2),
        ];

        let report = build_report(&quizzes, &results);

        assert_eq!(report.total_quizzes, 2);
        assert_eq!(report.total_attempts, 3);
        let first = &report.quizzes[0];
        assert_eq!(first.attempts, 2);
        assert_eq!(first.highest, 75.0);
        assert_eq!(first.lowest, 25.0);
        assert_eq!(first.average, 50.0);
        assert_eq!(report.quizzes[1].highest, 100.0);
    }

    #[test]
    fn results_for_user_filters() {
        let results = vec![
            result_for("r-1", "quiz-1", "s-1", 1, 1),
            result_for("r-2", "quiz-1", "s-2", 1, 1),
        ];
        let mine = results_for_user(&results, "s-2");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "r-2");
    }
}
