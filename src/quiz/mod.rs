//! Sleep-habits questionnaire.
//!
//! The quiz walks through the question bank once. Answering the last
//! question moves it into a terminal `Completed` state and yields the
//! answers exactly once; only `reset` starts it over.

mod questions;

use thiserror::Error;
use tracing::debug;

pub use questions::{SleepQuestion, QUESTIONS};

/// Errors returned by quiz operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The quiz is finished; reset it to answer again.
    #[error("the quiz is already completed")]
    AlreadyCompleted,

    /// The option index is out of range for the current question.
    #[error("option {option} is not valid (question has {count} options)")]
    InvalidOption { option: usize, count: usize },
}

/// Where the quiz is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for an answer to the question at `index`
    InProgress { index: usize },
    /// Every question has been answered
    Completed,
}

/// What happened after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// The next question is ready.
    Advanced { index: usize },
    /// The final question was answered.
    Completed { answers: Vec<usize> },
}

/// A run through the question bank.
#[derive(Debug, Clone)]
pub struct SleepQuiz {
    questions: &'static [SleepQuestion],
    answers: Vec<usize>,
    state: QuizState,
}

impl Default for SleepQuiz {
    fn default() -> Self {
        Self::new()
    }
}

impl SleepQuiz {
    /// Creates a quiz over the standard question bank.
    pub fn new() -> Self {
        Self::with_questions(&QUESTIONS)
    }

    /// Creates a quiz over a custom question list.
    pub fn with_questions(questions: &'static [SleepQuestion]) -> Self {
        Self {
            questions,
            answers: Vec::with_capacity(questions.len()),
            state: initial_state(questions),
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuizState::Completed
    }

    /// Answers given so far, as option indices.
    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn questions(&self) -> &'static [SleepQuestion] {
        self.questions
    }

    /// Returns the question awaiting an answer.
    pub fn current_question(&self) -> Option<&'static SleepQuestion> {
        match self.state {
            QuizState::InProgress { index } => self.questions.get(index),
            QuizState::Completed => None,
        }
    }

    /// Returns (answered, total).
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    /// Records an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyCompleted` once the quiz is finished and
    /// `QuizError::InvalidOption` for an out-of-range option. The quiz is
    /// unchanged on error.
    pub fn answer(&mut self, option: usize) -> Result<QuizEvent, QuizError> {
        let index = match self.state {
            QuizState::InProgress { index } => index,
            QuizState::Completed => return Err(QuizError::AlreadyCompleted),
        };
        let question = self.questions.get(index).ok_or(QuizError::AlreadyCompleted)?;
        let count = question.options.len();
        if option >= count {
            return Err(QuizError::InvalidOption { option, count });
        }

        self.answers.push(option);
        let next = index + 1;
        if next < self.questions.len() {
            self.state = QuizState::InProgress { index: next };
            Ok(QuizEvent::Advanced { index: next })
        } else {
            self.state = QuizState::Completed;
            debug!("Quiz completed with {} answers", self.answers.len());
            Ok(QuizEvent::Completed {
                answers: self.answers.clone(),
            })
        }
    }

    /// Clears all answers and returns to the first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.state = initial_state(self.questions);
    }
}

/// Pairs saved answers with the question bank's texts.
///
/// Answers beyond the bank or with an out-of-range option are skipped.
pub fn answered_pairs(answers: &[usize]) -> Vec<(&'static str, &'static str)> {
    QUESTIONS
        .iter()
        .zip(answers)
        .filter_map(|(question, &option)| {
            question
                .options
                .get(option)
                .map(|answer| (question.question, *answer))
        })
        .collect()
}

fn initial_state(questions: &[SleepQuestion]) -> QuizState {
    if questions.is_empty() {
        QuizState::Completed
    } else {
        QuizState::InProgress { index: 0 }
    }
}
