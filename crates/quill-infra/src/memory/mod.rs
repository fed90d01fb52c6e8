//! In-memory repositories - used as fallback when no database is configured
//! and as the storage double in tests.
//!
//! All repositories share one [`InMemoryStore`] so cross-entity rules (a
//! deleted group clears `group_id` on its posts) behave like the database
//! foreign keys do. Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Group, Page, PageRequest, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{GroupRepository, PostRepository, UserRepository};

/// Shared backing store for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    groups: RwLock<HashMap<Uuid, Group>>,
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username already taken: {}",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

pub struct InMemoryGroupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryGroupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn insert(&self, group: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups.values().any(|g| g.slug == group.slug) {
            return Err(RepoError::Constraint(format!(
                "slug already taken: {}",
                group.slug
            )));
        }
        groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.store.groups.read().await.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        drop(groups);

        // Same contract as the ON DELETE SET NULL foreign key: posts
        // survive the group with their group reference cleared.
        let mut posts = self.store.posts.write().await;
        for post in posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }

        Ok(())
    }
}

pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    /// Newest first, ties broken by id descending, then one page sliced out.
    fn paginate(mut posts: Vec<Post>, page: PageRequest) -> Page<Post> {
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        let window: Vec<Post> = posts
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size() as usize + 1)
            .collect();

        Page::from_overfetch(window, page.page_size())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.posts.read().await.get(&id).cloned())
    }

    async fn list_all(&self, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(Self::paginate(posts.values().cloned().collect(), page))
    }

    async fn list_by_group(
        &self,
        group_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        let filtered = posts
            .values()
            .filter(|p| p.group_id == Some(group_id))
            .cloned()
            .collect();
        Ok(Self::paginate(filtered, page))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        let filtered = posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(Self::paginate(filtered, page))
    }
}

#[cfg(test)]
mod tests;
