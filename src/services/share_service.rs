use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizShare, ShareStatus},
        dto::request::ShareQuizRequestDto,
    },
    repositories::{QuizRepository, ShareRepository},
    services::notification_service::{Notifier, QuizEvent},
};

/// Quiz sharing between users. A share starts pending and is answered once,
/// with either accept or deny.
pub struct ShareService {
    shares: Arc<dyn ShareRepository>,
    quizzes: Arc<dyn QuizRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ShareService {
    pub fn new(
        shares: Arc<dyn ShareRepository>,
        quizzes: Arc<dyn QuizRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            shares,
            quizzes,
            notifier,
        }
    }

    pub async fn share_quiz(&self, request: ShareQuizRequestDto) -> AppResult<QuizShare> {
        request.validate()?;

        if request.sender_id == request.receiver_id {
            return Err(AppError::ValidationError(
                "A quiz cannot be shared with its sender".to_string(),
            ));
        }

        if self.quizzes.find_by_id(&request.quiz_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                request.quiz_id
            )));
        }

        let share = self
            .shares
            .create(QuizShare::pending(
                &request.sender_id,
                &request.receiver_id,
                &request.quiz_id,
            ))
            .await?;

        log::info!(
            "Quiz {} shared by {} with {}",
            share.quiz_id,
            share.sender_id,
            share.receiver_id
        );

        if let Err(e) = self.notifier.broadcast(QuizEvent::quiz_shared(&share)) {
            log::debug!("Share {} stored without notification: {}", share.id, e);
        }

        Ok(share)
    }

    pub async fn accept_share(&self, share_id: &str) -> AppResult<QuizShare> {
        self.respond(share_id, ShareStatus::Accepted).await
    }

    pub async fn deny_share(&self, share_id: &str) -> AppResult<QuizShare> {
        self.respond(share_id, ShareStatus::Denied).await
    }

    async fn respond(&self, share_id: &str, status: ShareStatus) -> AppResult<QuizShare> {
        let share = self
            .shares
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Share with id '{}' not found", share_id)))?;

        if !share.is_pending() {
            return Err(already_answered(&share));
        }

        // A concurrent answer can still win between the read and the update.
        let updated = self
            .shares
            .respond(share_id, status)
            .await?
            .ok_or_else(|| already_answered(&share))?;

        log::info!("Share {} {}", updated.id, updated.status.as_str());
        Ok(updated)
    }

    pub async fn pending_shares(&self, receiver_id: &str) -> AppResult<Vec<QuizShare>> {
        self.shares
            .list_for_receiver(receiver_id, ShareStatus::Pending)
            .await
    }

    /// Quizzes behind the receiver's accepted shares. Shares whose quiz was
    /// deleted are skipped.
    pub async fn shared_quizzes(&self, receiver_id: &str) -> AppResult<Vec<Quiz>> {
        let accepted = self
            .shares
            .list_for_receiver(receiver_id, ShareStatus::Accepted)
            .await?;

        let mut quizzes = Vec::with_capacity(accepted.len());
        for share in accepted {
            match self.quizzes.find_by_id(&share.quiz_id).await? {
                Some(quiz) => quizzes.push(quiz),
                None => log::warn!(
                    "Accepted share {} points at missing quiz {}",
                    share.id,
                    share.quiz_id
                ),
            }
        }
        Ok(quizzes)
    }
}

fn already_answered(share: &QuizShare) -> AppError {
    AppError::ValidationError(format!("Share '{}' was already answered", share.id))
}
