use crate::{
    constants::quiz_prompt::{
        EXPLANATION_OUTPUT_TEMPLATE, EXPLANATION_SYSTEM_INTRO, FORMAT_RULES, MAX_ANSWER_WORDS,
        MAX_EXPLANATION_WORDS, MCQ_OUTPUT_TEMPLATE, MCQ_SYSTEM_INTRO, OPEN_ENDED_OUTPUT_TEMPLATE,
        OPEN_ENDED_SYSTEM_INTRO,
    },
    models::domain::{ExplanationRequest, GameType, GenerationRequest},
};

/// System and user instruction pair sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn quiz(request: &GenerationRequest) -> Prompt {
        let (intro, template) = match request.game_type {
            GameType::Mcq => (MCQ_SYSTEM_INTRO, MCQ_OUTPUT_TEMPLATE.as_str()),
            GameType::OpenEnded => (OPEN_ENDED_SYSTEM_INTRO, OPEN_ENDED_OUTPUT_TEMPLATE.as_str()),
        };

        let system = format!(
            "{intro} The length of each answer should not be more than {MAX_ANSWER_WORDS} words.\n\
             You are to output the following in json format: {template}\n{FORMAT_RULES}"
        );

        let user = format!(
            "You are to generate a random {} question {} {} quiz about {} for a {}",
            request.count,
            request.difficulty.as_str(),
            request.game_type.prompt_label(),
            request.subject,
            request.grade_level
        );

        Prompt { system, user }
    }

    /// One directive per incorrect question, concatenated into a single prompt.
    pub fn explanations(batch: &[ExplanationRequest], grade_level: &str) -> Prompt {
        let system = format!(
            "{EXPLANATION_SYSTEM_INTRO} The length of each explanation should not be more than \
             {MAX_EXPLANATION_WORDS} words. Return exactly {} entries.\n\
             You are to output the following in json format: {}\n{FORMAT_RULES}",
            batch.len(),
            EXPLANATION_OUTPUT_TEMPLATE.as_str()
        );

        let user = batch
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "{}. Explain why '{}' is wrong for the question: '{}', and instead, describe why '{}' \
                     is the right answer, using words that a {} student can easily understand.",
                    i + 1,
                    item.user_answer,
                    item.question,
                    item.answer,
                    grade_level
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Prompt { system, user }
    }
}
