#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use studyset_server::{
    errors::{AppError, AppResult},
    models::domain::{ExplanationRecord, Quiz, QuizShare, ShareStatus},
    repositories::{QuizRepository, ShareRepository},
    services::{
        completion_client::{CompletionClient, DecodingParams},
        notification_service::{Notifier, QuizEvent},
        prompt_builder::Prompt,
    },
};

/// Replays a fixed list of replies, one per call.
pub struct ScriptedCompletionClient {
    replies: Mutex<VecDeque<AppResult<String>>>,
    calls: AtomicUsize,
}

impl ScriptedCompletionClient {
    pub fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn repeating(reply: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(reply.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, _prompt: &Prompt, _params: &DecodingParams) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::ExternalService("script exhausted".to_string())))
    }
}

fn quiz_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Quiz with id '{}' not found", id))
}

fn page(mut items: Vec<Quiz>, offset: i64, limit: i64) -> (Vec<Quiz>, i64) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = items.len() as i64;
    let page = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();
    (page, total)
}

/// Same update semantics as the Mongo repository: only editable fields change.
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
    saves: AtomicUsize,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn save_quiz(&self, quiz: Quiz) -> AppResult<String> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let id = quiz.id.clone();
        self.quizzes.write().await.insert(id.clone(), quiz);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let items = quizzes
            .values()
            .filter(|q| q.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(page(items, offset, limit))
    }

    async fn list_all(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let items = self.quizzes.read().await.values().cloned().collect();
        Ok(page(items, offset, limit))
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let existing = quizzes.get_mut(&quiz.id).ok_or_else(|| quiz_not_found(&quiz.id))?;

        existing.title = quiz.title;
        existing.description = quiz.description;
        existing.questions = quiz.questions;
        existing.modified_at = Some(quiz.modified_at.unwrap_or_else(Utc::now));
        if quiz.score.is_some() {
            existing.score = quiz.score;
        }
        if quiz.time_taken.is_some() {
            existing.time_taken = quiz.time_taken;
        }
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.quizzes
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| quiz_not_found(id))
    }

    async fn attach_explanations(
        &self,
        quiz_id: &str,
        explanations: Vec<ExplanationRecord>,
    ) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes.get_mut(quiz_id).ok_or_else(|| quiz_not_found(quiz_id))?;
        quiz.explanations = Some(explanations);
        Ok(())
    }

    async fn load_cached_explanations(
        &self,
        quiz_id: &str,
    ) -> AppResult<Option<Vec<ExplanationRecord>>> {
        Ok(self
            .quizzes
            .read()
            .await
            .get(quiz_id)
            .and_then(|q| q.explanations.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryShareRepository {
    shares: RwLock<HashMap<String, QuizShare>>,
}

impl InMemoryShareRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareRepository for InMemoryShareRepository {
    async fn create(&self, share: QuizShare) -> AppResult<QuizShare> {
        self.shares
            .write()
            .await
            .insert(share.id.clone(), share.clone());
        Ok(share)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizShare>> {
        Ok(self.shares.read().await.get(id).cloned())
    }

    async fn respond(&self, id: &str, status: ShareStatus) -> AppResult<Option<QuizShare>> {
        let mut shares = self.shares.write().await;
        Ok(shares.get_mut(id).filter(|s| s.is_pending()).map(|share| {
            share.status = status;
            share.responded_at = Some(Utc::now());
            share.clone()
        }))
    }

    async fn list_for_receiver(
        &self,
        receiver_id: &str,
        status: ShareStatus,
    ) -> AppResult<Vec<QuizShare>> {
        Ok(self
            .shares
            .read()
            .await
            .values()
            .filter(|s| s.receiver_id == receiver_id && s.status == status)
            .cloned()
            .collect())
    }
}

pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn broadcast(&self, _event: QuizEvent) -> AppResult<usize> {
        Err(AppError::InternalError("notification channel closed".to_string()))
    }
}
