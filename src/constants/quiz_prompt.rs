use once_cell::sync::Lazy;
use serde_json::json;

pub const MAX_ANSWER_WORDS: usize = 15;
pub const MAX_EXPLANATION_WORDS: usize = 120;

/// Decoding stop sequences that cut off role-play continuations.
pub const STOP_SEQUENCES: [&str; 2] = [" Human:", " AI:"];

pub const FORMAT_RULES: &str = "Respond with a single JSON array and nothing else. \
Do not put quotation marks or the escape character \\ inside any output field.";

/// One illustrative multiple choice record; word limits are stated in prose only.
pub static MCQ_OUTPUT_TEMPLATE: Lazy<String> = Lazy::new(|| {
    let option = |n: usize| format!("option{} with max length of {} words", n, MAX_ANSWER_WORDS);
    json!([{
        "question": "question",
        "answer": format!("answer with max length of {} words", MAX_ANSWER_WORDS),
        "options": [option(1), option(2), option(3), option(4)],
    }])
    .to_string()
});

pub static OPEN_ENDED_OUTPUT_TEMPLATE: Lazy<String> = Lazy::new(|| {
    json!([{
        "question": "question",
        "answer": format!("answer with max length of {} words", MAX_ANSWER_WORDS),
    }])
    .to_string()
});

pub static EXPLANATION_OUTPUT_TEMPLATE: Lazy<String> = Lazy::new(|| {
    json!([{
        "explanation": format!("explanation with max length of {} words", MAX_EXPLANATION_WORDS),
    }])
    .to_string()
});

pub const MCQ_SYSTEM_INTRO: &str = "You are a helpful AI that generates multiple choice quiz questions. \
Every question has exactly four options and one of them is the answer. \
Store all questions, answers and options in one JSON array.";

pub const OPEN_ENDED_SYSTEM_INTRO: &str = "You are a helpful AI that generates open ended quiz questions \
with a short model answer for each. Store all questions and answers in one JSON array.";

pub const EXPLANATION_SYSTEM_INTRO: &str = "You are a helpful AI that writes in depth explanations for \
incorrectly answered quiz questions. Write exactly one explanation per directive, in the same order \
as the directives, and store all explanations in one JSON array.";
