use std::ops::BitOr;

/// Screens the client can show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Login,
    Register,
    Dashboard,
    CreateQuiz,
    EditQuiz(String),
    TakeQuiz(String),
    Results,
}

/// Caches a caller should re-read after an operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Invalidation {
    pub quizzes: bool,
    pub results: bool,
}

impl Invalidation {
    pub const NONE: Invalidation = Invalidation {
        quizzes: false,
        results: false,
    };
    pub const QUIZZES: Invalidation = Invalidation {
        quizzes: true,
        results: false,
    };
    pub const RESULTS: Invalidation = Invalidation {
        quizzes: false,
        results: true,
    };
    pub const ALL: Invalidation = Invalidation {
        quizzes: true,
        results: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.quizzes && !self.results
    }
}

impl BitOr for Invalidation {
    type Output = Invalidation;

    fn bitor(self, rhs: Invalidation) -> Invalidation {
        Invalidation {
            quizzes: self.quizzes || rhs.quizzes,
            results: self.results || rhs.results,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    pub fn current(&self) -> &View {
        &self.current
    }

    pub fn go_to_login(&mut self) -> Invalidation {
        self.current = View::Login;
        Invalidation::NONE
    }

    pub fn go_to_register(&mut self) -> Invalidation {
        self.current = View::Register;
        Invalidation::NONE
    }

    pub fn go_to_dashboard(&mut self) -> Invalidation {
        self.current = View::Dashboard;
        Invalidation::NONE
    }

    pub fn go_to_create_quiz(&mut self) -> Invalidation {
        self.current = View::CreateQuiz;
        Invalidation::NONE
    }

    pub fn go_to_edit_quiz(&mut self, quiz_id: &str) -> Invalidation {
        self.current = View::EditQuiz(quiz_id.to_string());
        Invalidation::NONE
    }

    pub fn go_to_take_quiz(&mut self, quiz_id: &str) -> Invalidation {
        self.current = View::TakeQuiz(quiz_id.to_string());
        Invalidation::NONE
    }

    /// The results page always shows a freshly reconciled ledger.
    pub fn go_to_results(&mut self) -> Invalidation {
        self.current = View::Results;
        Invalidation::RESULTS
    }

    /// Leaves any view that refers to `quiz_id`.
    pub fn forget_quiz(&mut self, quiz_id: &str) {
        let refers = match &self.current {
            View::EditQuiz(id) | View::TakeQuiz(id) => id == quiz_id,
            _ => false,
        };
        if refers {
            self.current = View::Dashboard;
        }
    }

    pub fn viewed_quiz(&self) -> Option<&str> {
        match &self.current {
            View::EditQuiz(id) | View::TakeQuiz(id) => Some(id),
            _ => None,
        }
    }
}
