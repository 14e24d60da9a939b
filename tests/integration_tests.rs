use quizdesk::models::domain::{Question, Quiz, QuizResult};
use serde_json::json;

#[tokio::test]
async fn test_quiz_document_uses_camel_case_fields() {
    let raw = json!({
        "id": "quiz-1",
        "title": "Capitals",
        "description": "European capitals",
        "createdBy": "teacher-1",
        "questions": [{
            "question": "Capital of France?",
            "options": ["Paris", "Rome", "Berlin", "Madrid"],
            "correctAnswer": 0
        }],
        "createdAt": "2024-05-01T10:00:00Z"
    });

    let quiz: Quiz = serde_json::from_value(raw).unwrap();

    assert!(quiz.is_active);
    assert_eq!(quiz.created_by, "teacher-1");
    assert_eq!(quiz.questions[0].correct_index(), Some(0));
    assert!(quiz.updated_at.is_none());

    let encoded = serde_json::to_value(&quiz).unwrap();
    assert_eq!(encoded["createdBy"], "teacher-1");
    assert!(encoded.get("updatedAt").is_none());
}

#[tokio::test]
async fn test_legacy_question_without_answer_key_never_scores() {
    let question: Question = serde_json::from_value(json!({
        "question": "Capital of Spain?",
        "options": ["Paris", "Rome", "Berlin", "Madrid"]
    }))
    .unwrap();

    assert_eq!(question.correct_index(), None);
    assert!((0..4).all(|idx| !question.is_correct(idx)));
}

#[tokio::test]
async fn test_result_document_round_trip() {
    let raw = json!({
        "id": "r-1",
        "quizId": "quiz-1",
        "quizTitle": "Capitals",
        "userId": "student-1",
        "userName": "Sam",
        "answers": [{ "questionIndex": 0, "selectedIndex": 1, "correct": false }],
        "score": 0,
        "totalQuestions": 1,
        "percentage": 0.0,
        "completedAt": "2024-05-01T10:05:00Z"
    });

    let result: QuizResult = serde_json::from_value(raw.clone()).unwrap();
    assert!(result.belongs_to("student-1", "quiz-1"));
    assert!(!result.answers[0].correct);

    assert_eq!(serde_json::to_value(&result).unwrap()["quizId"], raw["quizId"]);
}

#[cfg(test)]
mod sync_tests {
    use quizdesk::models::domain::QuizResult;

    #[test]
    fn test_result_without_optional_fields_still_loads() {
        let result: QuizResult = serde_json::from_str(
            r#"{"id":"r-2","quizId":"quiz-1","userId":"s-1","score":1,"totalQuestions":2,"percentage":50.0,"completedAt":"2024-05-01T10:05:00Z"}"#,
        )
        .unwrap();

        assert!(result.quiz_title.is_empty());
        assert!(result.answers.is_empty());
    }
}
