//! Multiple-choice quiz flow.
//!
//! The quiz walks through a fixed bank of questions in order. Each question
//! is answered once, which locks its options and reveals the correct answer,
//! then the learner moves on. After the last question the score is shown and
//! the quiz can be restarted from the top.
//!
//! ```
//! use ecosim_logic::quiz::Quiz;
//!
//! let mut quiz = Quiz::default();
//! let feedback = quiz.answer("Producer").unwrap();
//! assert!(feedback.correct);
//! quiz.next().unwrap();
//! assert_eq!(quiz.question_number(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    pub fn new(question: &str, options: &[&str], answer: &str) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// The built-in ecosystem question bank.
pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::new(
            "Which organisms make their own food through photosynthesis?",
            &["Consumer", "Producer", "Decomposer", "Abiotic factor"],
            "Producer",
        ),
        QuizQuestion::new(
            "How does the amount of energy change moving up the food chain?",
            &["It increases", "It stays the same", "It decreases", "It is unrelated"],
            "It decreases",
        ),
        QuizQuestion::new(
            "What breaks down dead organisms and waste, returning matter to nature?",
            &["Producer", "Consumer", "Decomposer", "Predator"],
            "Decomposer",
        ),
        QuizQuestion::new(
            "Which of these is NOT a human-caused disturbance of an ecosystem?",
            &["Wildfire", "Habitat destruction", "Pollution", "Invasive species"],
            "Wildfire",
        ),
    ]
}

/// Where the learner is within the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    /// Options are open.
    Asking,
    /// Options are locked and feedback is shown.
    Answered(AnswerFeedback),
    /// All questions done, results shown.
    Finished,
}

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub selected: String,
    pub correct_answer: String,
}

/// Quiz progress over a question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    index: usize,
    score: u32,
    phase: QuizPhase,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(default_questions())
    }
}

impl Quiz {
    /// Start a quiz. An empty bank is finished immediately.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let phase = if questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::Asking
        };
        Self {
            questions,
            index: 0,
            score: 0,
            phase,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 1-based number of the current question, as shown to the learner.
    pub fn question_number(&self) -> usize {
        self.index + 1
    }

    /// The question on screen, `None` once finished.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Finished => None,
            _ => self.questions.get(self.index),
        }
    }

    /// Answer the current question with the text of one of its options.
    pub fn answer(&mut self, option: &str) -> Result<AnswerFeedback, QuizError> {
        match self.phase {
            QuizPhase::Asking => {}
            QuizPhase::Answered(_) => return Err(QuizError::AlreadyAnswered),
            QuizPhase::Finished => return Err(QuizError::Finished),
        }
        let question = self
            .questions
            .get(self.index)
            .ok_or(QuizError::Finished)?;
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }

        let correct = option == question.answer;
        if correct {
            self.score += 1;
        }
        let feedback = AnswerFeedback {
            correct,
            selected: option.to_string(),
            correct_answer: question.answer.clone(),
        };
        log::debug!(
            "quiz q{} answered {:?} (correct={})",
            self.question_number(),
            option,
            correct
        );
        self.phase = QuizPhase::Answered(feedback.clone());
        Ok(feedback)
    }

    /// Move past an answered question. Returns the new phase.
    pub fn next(&mut self) -> Result<&QuizPhase, QuizError> {
        match self.phase {
            QuizPhase::Answered(_) => {}
            QuizPhase::Asking => return Err(QuizError::NotAnswered),
            QuizPhase::Finished => return Err(QuizError::Finished),
        }
        self.index += 1;
        self.phase = if self.index < self.questions.len() {
            QuizPhase::Asking
        } else {
            log::info!("quiz finished: {}/{}", self.score, self.questions.len());
            QuizPhase::Finished
        };
        Ok(&self.phase)
    }

    /// `(score, total)` once the quiz is finished.
    pub fn results(&self) -> Option<(u32, usize)> {
        match self.phase {
            QuizPhase::Finished => Some((self.score, self.questions.len())),
            _ => None,
        }
    }

    /// Back to the first question with a zero score.
    pub fn restart(&mut self) {
        self.index = 0;
        self.score = 0;
        self.phase = if self.questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::Asking
        };
    }
}

/// Quiz action attempted in the wrong phase, or with a bad option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    AlreadyAnswered,
    NotAnswered,
    Finished,
    UnknownOption(String),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::AlreadyAnswered => write!(f, "question already answered"),
            QuizError::NotAnswered => write!(f, "question not answered yet"),
            QuizError::Finished => write!(f, "quiz is finished"),
            QuizError::UnknownOption(o) => write!(f, "not an option: {}", o),
        }
    }
}

impl std::error::Error for QuizError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Vec<String> {
        default_questions().into_iter().map(|q| q.answer).collect()
    }

    #[test]
    fn test_default_bank_is_well_formed() {
        let bank = default_questions();
        assert_eq!(bank.len(), 4);
        for q in &bank {
            assert_eq!(q.options.len(), 4);
            assert!(q.has_option(&q.answer), "{}", q.question);
        }
    }

    #[test]
    fn test_perfect_run() {
        let mut quiz = Quiz::default();
        for answer in answers() {
            assert!(quiz.answer(&answer).unwrap().correct);
            quiz.next().unwrap();
        }
        assert_eq!(quiz.phase(), &QuizPhase::Finished);
        assert_eq!(quiz.results(), Some((4, 4)));
        assert!(quiz.current_question().is_none());
    }

    #[test]
    fn test_wrong_answer_reveals_correct_one() {
        let mut quiz = Quiz::default();
        let feedback = quiz.answer("Consumer").unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "Producer");
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_options_lock_after_answer() {
        let mut quiz = Quiz::default();
        quiz.answer("Consumer").unwrap();
        assert_eq!(quiz.answer("Producer"), Err(QuizError::AlreadyAnswered));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut quiz = Quiz::default();
        assert_eq!(quiz.next().err(), Some(QuizError::NotAnswered));
        assert_eq!(quiz.question_number(), 1);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut quiz = Quiz::default();
        assert!(matches!(
            quiz.answer("Sunlight"),
            Err(QuizError::UnknownOption(_))
        ));
        assert_eq!(quiz.phase(), &QuizPhase::Asking);
    }

    #[test]
    fn test_restart_resets_score() {
        let mut quiz = Quiz::default();
        for answer in answers() {
            quiz.answer(&answer).unwrap();
            quiz.next().unwrap();
        }
        assert_eq!(quiz.answer("Producer"), Err(QuizError::Finished));
        quiz.restart();
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.question_number(), 1);
        assert_eq!(quiz.phase(), &QuizPhase::Asking);
        assert!(quiz.results().is_none());
    }

    #[test]
    fn test_empty_bank_is_finished() {
        let quiz = Quiz::new(Vec::new());
        assert_eq!(quiz.results(), Some((0, 0)));
    }
}
