use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Page, PageRequest, Post, User};
use crate::error::RepoError;

/// User storage port.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. Fails with `Constraint` on a duplicate username.
    async fn insert(&self, user: User) -> Result<User, RepoError>;
}

/// Group storage port.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Insert a new group. Fails with `Constraint` when the slug is taken.
    async fn insert(&self, group: Group) -> Result<Group, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    async fn list(&self) -> Result<Vec<Group>, RepoError>;

    /// Delete a group. Referencing posts survive with their group cleared.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Post storage port.
///
/// Every listing returns posts newest-first (`pub_date` descending, id
/// descending on ties) - the standing ordering contract for all feeds.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Replace the stored row for `post.id`. Fails with `NotFound` when the
    /// post does not exist. Last write wins on concurrent edits.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn list_all(&self, page: PageRequest) -> Result<Page<Post>, RepoError>;

    async fn list_by_group(
        &self,
        group_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;
}
