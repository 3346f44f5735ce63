use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Quiz, QuizShare},
};

const APP_NAME: &str = "studyset-server";

/// Handle to the studyset database and its typed collections.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
    quizzes_collection: String,
    shares_collection: String,
}

impl Database {
    pub async fn client_options(config: &Config) -> AppResult<ClientOptions> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;

        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(10);
        options.min_pool_size = Some(2);
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        Ok(options)
    }

    /// Connects and pings before returning, so a bad connection string fails at startup.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(Self::client_options(config).await?)?;
        let db = client.database(&config.mongo_db_name);

        db.run_command(doc! { "ping": 1 }).await?;
        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self {
            db,
            quizzes_collection: config.quizzes_collection.clone(),
            shares_collection: config.shares_collection.clone(),
        })
    }

    pub fn quizzes(&self) -> Collection<Quiz> {
        self.db.collection(&self.quizzes_collection)
    }

    pub fn shares(&self) -> Collection<QuizShare> {
        self.db.collection(&self.shares_collection)
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.quizzes().create_indexes(quiz_indexes()).await?;
        log::info!("Ensured indexes on '{}'", self.quizzes_collection);

        self.shares().create_indexes(share_indexes()).await?;
        log::info!("Ensured indexes on '{}'", self.shares_collection);

        Ok(())
    }
}

fn named_index(keys: mongodb::bson::Document, name: &str, unique: bool) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .name(name.to_string())
                .unique(unique)
                .build(),
        )
        .build()
}

/// Quiz lookups go by `id`; owner listings sort newest first.
pub fn quiz_indexes() -> Vec<IndexModel> {
    vec![
        named_index(doc! { "id": 1 }, "id_unique", true),
        named_index(doc! { "owner_id": 1, "created_at": -1 }, "owner_created", false),
    ]
}

/// Shares are looked up by `id` and listed per receiver and status.
pub fn share_indexes() -> Vec<IndexModel> {
    vec![
        named_index(doc! { "id": 1 }, "id_unique", true),
        named_index(doc! { "receiver_id": 1, "status": 1 }, "receiver_status", false),
    ]
}
