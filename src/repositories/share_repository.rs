use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuizShare, ShareStatus},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn create(&self, share: QuizShare) -> AppResult<QuizShare>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizShare>>;
    /// Moves a pending share to `status`. Returns `None` when the share is
    /// missing or was already answered.
    async fn respond(&self, id: &str, status: ShareStatus) -> AppResult<Option<QuizShare>>;
    async fn list_for_receiver(
        &self,
        receiver_id: &str,
        status: ShareStatus,
    ) -> AppResult<Vec<QuizShare>>;
}

pub struct MongoShareRepository {
    collection: Collection<QuizShare>,
}

impl MongoShareRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.shares(),
        }
    }
}

#[async_trait]
impl ShareRepository for MongoShareRepository {
    async fn create(&self, share: QuizShare) -> AppResult<QuizShare> {
        self.collection.insert_one(&share).await?;
        log::debug!("Stored share {} of quiz {}", share.id, share.quiz_id);
        Ok(share)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizShare>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn respond(&self, id: &str, status: ShareStatus) -> AppResult<Option<QuizShare>> {
        let filter = doc! { "id": id, "status": ShareStatus::Pending.as_str() };
        let update = doc! {
            "$set": {
                "status": status.as_str(),
                "responded_at": to_bson(&Utc::now())?,
            }
        };

        let result = self.collection.update_one(filter, update).await?;
        if result.matched_count == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn list_for_receiver(
        &self,
        receiver_id: &str,
        status: ShareStatus,
    ) -> AppResult<Vec<QuizShare>> {
        let shares = self
            .collection
            .find(doc! { "receiver_id": receiver_id, "status": status.as_str() })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(shares)
    }
}
