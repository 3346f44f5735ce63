use async_graphql::{Context, Object, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    graphql::helpers::{extended, parse_id},
    models::{
        domain::{ExplanationRecord, Quiz, QuizShare},
        dto::{
            request::{GenerateQuizRequestDto, RecordOutcomesRequestDto, ShareQuizRequestDto},
            response::QuizCreatedResponse,
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn generate_quiz(
        &self,
        ctx: &Context<'_>,
        owner_id: ID,
        input: GenerateQuizRequestDto,
    ) -> async_graphql::Result<QuizCreatedResponse> {
        let state = ctx.data::<AppState>()?;
        let owner_id = extended(parse_id(&owner_id))?;
        extended(input.validate().map_err(AppError::from))?;

        let quiz_id = extended(
            state
                .quiz_service
                .generate_quiz(&owner_id, input.into())
                .await,
        )?;

        Ok(QuizCreatedResponse::new(quiz_id))
    }

    async fn generate_explanations(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
    ) -> async_graphql::Result<Vec<ExplanationRecord>> {
        let state = ctx.data::<AppState>()?;
        let quiz_id = extended(parse_id(&quiz_id))?;

        extended(
            state
                .explanation_service
                .generate_explanations(&quiz_id)
                .await,
        )
    }

    async fn record_outcomes(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        input: RecordOutcomesRequestDto,
    ) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let quiz_id = extended(parse_id(&quiz_id))?;

        extended(state.quiz_service.record_outcomes(&quiz_id, input).await)
    }

    async fn share_quiz(
        &self,
        ctx: &Context<'_>,
        input: ShareQuizRequestDto,
    ) -> async_graphql::Result<QuizShare> {
        let state = ctx.data::<AppState>()?;
        extended(state.share_service.share_quiz(input).await)
    }

    async fn accept_share(&self, ctx: &Context<'_>, share_id: ID) -> async_graphql::Result<QuizShare> {
        let state = ctx.data::<AppState>()?;
        let share_id = extended(parse_id(&share_id))?;

        extended(state.share_service.accept_share(&share_id).await)
    }

    async fn deny_share(&self, ctx: &Context<'_>, share_id: ID) -> async_graphql::Result<QuizShare> {
        let state = ctx.data::<AppState>()?;
        let share_id = extended(parse_id(&share_id))?;

        extended(state.share_service.deny_share(&share_id).await)
    }
}
