use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    Collection,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{ExplanationRecord, Quiz},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Persists a fully validated quiz and returns its id.
    async fn save_quiz(&self, quiz: Quiz) -> AppResult<String>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_by_owner(&self, owner_id: &str, offset: i64, limit: i64)
        -> AppResult<(Vec<Quiz>, i64)>;
    async fn list_all(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    /// Writes the editable fields of `quiz` and returns the stored document.
    /// Identity, ownership and cached explanations are left untouched.
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn attach_explanations(
        &self,
        quiz_id: &str,
        explanations: Vec<ExplanationRecord>,
    ) -> AppResult<()>;
    async fn load_cached_explanations(
        &self,
        quiz_id: &str,
    ) -> AppResult<Option<Vec<ExplanationRecord>>>;
}

/// `$set` document for the fields an edit or a play-through may change.
pub fn update_document(quiz: &Quiz) -> AppResult<Document> {
    let mut set = doc! {
        "title": &quiz.title,
        "description": &quiz.description,
        "questions": to_bson(&quiz.questions)?,
        "modified_at": to_bson(&quiz.modified_at.unwrap_or_else(Utc::now))?,
    };
    if let Some(score) = quiz.score {
        set.insert("score", score);
    }
    if let Some(time_taken) = quiz.time_taken {
        set.insert("time_taken", time_taken);
    }

    Ok(doc! { "$set": set })
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Quiz with id '{}' not found", id))
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.quizzes(),
        }
    }

    async fn page(&self, filter: Document, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let items: Vec<Quiz> = self
            .collection
            .find(filter)
            .skip(offset.max(0) as u64)
            .limit(limit)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((items, total))
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn save_quiz(&self, quiz: Quiz) -> AppResult<String> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz.id)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        self.page(doc! { "owner_id": owner_id }, offset, limit).await
    }

    async fn list_all(&self, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        self.page(doc! {}, offset, limit).await
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let filter = doc! { "id": &quiz.id };
        let result = self
            .collection
            .update_one(filter.clone(), update_document(&quiz)?)
            .await?;

        if result.matched_count == 0 {
            return Err(not_found(&quiz.id));
        }

        self.collection
            .find_one(filter)
            .await?
            .ok_or_else(|| not_found(&quiz.id))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn attach_explanations(
        &self,
        quiz_id: &str,
        explanations: Vec<ExplanationRecord>,
    ) -> AppResult<()> {
        let explanations = to_bson(&explanations)?;

        let result = self
            .collection
            .update_one(
                doc! { "id": quiz_id },
                doc! { "$set": { "explanations": explanations } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(not_found(quiz_id));
        }
        Ok(())
    }

    async fn load_cached_explanations(
        &self,
        quiz_id: &str,
    ) -> AppResult<Option<Vec<ExplanationRecord>>> {
        let quiz = self.collection.find_one(doc! { "id": quiz_id }).await?;
        Ok(quiz.and_then(|q| q.explanations))
    }
}
