pub mod quiz_repository;
pub mod share_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use share_repository::{MongoShareRepository, ShareRepository};
