pub mod explanation;
pub mod generation_request;
pub mod quiz;
pub mod quiz_question;
pub mod quiz_share;
pub use explanation::{ExplanationRecord, ExplanationRequest};
pub use generation_request::{Difficulty, GameType, GenerationRequest};
pub use quiz::Quiz;
pub use quiz_question::{QuizQuestion, ValidatedQuestion};
pub use quiz_share::{QuizShare, ShareStatus};
