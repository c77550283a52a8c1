//! Quiz core: question generation, answer scoring and the in-session answer log.

pub mod generator;
pub mod scorer;
pub mod session;
pub mod setup;

pub use generator::{
  generate_questions, generate_questions_with, DistractorFallback, GeneratorOptions,
};
pub use scorer::{incorrect_answers, score, Grade, ScoreSummary};
pub use session::{QuizSession, SessionError};
pub use setup::question_count_options;
