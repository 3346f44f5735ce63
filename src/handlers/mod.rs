pub mod quiz_handler;
pub mod share_handler;

use actix_web::web;

pub use quiz_handler::{
    create_quiz, delete_quiz, explain_quiz, get_quiz, health_check, list_all_quizzes,
    list_owner_quizzes, record_outcomes, update_quiz,
};
pub use share_handler::{accept_share, deny_share, pending_shares, share_quiz, shared_quizzes};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(create_quiz)
        .service(explain_quiz)
        .service(list_all_quizzes)
        .service(get_quiz)
        .service(list_owner_quizzes)
        .service(update_quiz)
        .service(record_outcomes)
        .service(delete_quiz)
        .service(share_quiz)
        .service(accept_share)
        .service(deny_share)
        .service(pending_shares)
        .service(shared_quizzes);
}
