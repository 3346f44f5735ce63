use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::{extended, parse_id},
    models::{
        domain::{Quiz, QuizShare},
        dto::response::PaginatedQuizzes,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let id = extended(parse_id(&id))?;

        extended(state.quiz_service.get_quiz(&id).await)
    }

    /// Quizzes owned by `owner_id`, newest first.
    async fn quizzes(
        &self,
        ctx: &Context<'_>,
        owner_id: ID,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<PaginatedQuizzes> {
        let state = ctx.data::<AppState>()?;
        let owner_id = extended(parse_id(&owner_id))?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        extended(
            state
                .quiz_service
                .list_quizzes_by_owner(&owner_id, offset, limit)
                .await,
        )
    }

    /// Every stored quiz, newest first.
    async fn all_quizzes(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<PaginatedQuizzes> {
        let state = ctx.data::<AppState>()?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        extended(state.quiz_service.list_all_quizzes(offset, limit).await)
    }

    async fn pending_shares(
        &self,
        ctx: &Context<'_>,
        receiver_id: ID,
    ) -> async_graphql::Result<Vec<QuizShare>> {
        let state = ctx.data::<AppState>()?;
        let receiver_id = extended(parse_id(&receiver_id))?;

        extended(state.share_service.pending_shares(&receiver_id).await)
    }

    /// Quizzes other users shared with `receiver_id` that were accepted.
    async fn shared_quizzes(
        &self,
        ctx: &Context<'_>,
        receiver_id: ID,
    ) -> async_graphql::Result<Vec<Quiz>> {
        let state = ctx.data::<AppState>()?;
        let receiver_id = extended(parse_id(&receiver_id))?;

        extended(state.share_service.shared_quizzes(&receiver_id).await)
    }
}
