//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{GroupRepository, PostRepository, UserRepository};
use quill_core::service::{GroupService, PostService};
use quill_infra::DatabaseConfig;
use quill_infra::memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use quill_infra::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};

type Repos = (
    Arc<dyn UserRepository>,
    Arc<dyn GroupRepository>,
    Arc<dyn PostRepository>,
);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub groups: Arc<GroupService>,
    /// Direct user lookup, used by the auth handlers and feed rendering.
    pub users: Arc<dyn UserRepository>,
    /// Direct group lookup, used to render group slugs on posts.
    pub group_lookup: Arc<dyn GroupRepository>,
}

fn memory_repos() -> Repos {
    let store = InMemoryStore::new();
    (
        Arc::new(InMemoryUserRepository::new(store.clone())),
        Arc::new(InMemoryGroupRepository::new(store.clone())),
        Arc::new(InMemoryPostRepository::new(store)),
    )
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (users, groups, posts): Repos = {
            if let Some(config) = db_config {
                match quill_infra::database::connect(config).await {
                    Ok(conn) => (
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresGroupRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        memory_repos()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_repos()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, groups, posts): Repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            let _ = db_config;
            memory_repos()
        };

        tracing::info!("Application state initialized");

        Self {
            posts: Arc::new(PostService::new(
                posts,
                groups.clone(),
                users.clone(),
            )),
            groups: Arc::new(GroupService::new(groups.clone())),
            users,
            group_lookup: groups,
        }
    }
}
