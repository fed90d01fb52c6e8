use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Group, Page, PageRequest, Post, PostForm, User};
use crate::error::DomainError;
use crate::ports::{GroupRepository, PostRepository, UserRepository};

/// Post access rules: who may write what, and how feeds are read.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
        }
    }

    /// Create a post from a validated form submission.
    ///
    /// The author is taken from the acting identity and must exist;
    /// `pub_date` is set here and never again.
    pub async fn publish(&self, author_id: Uuid, form: PostForm) -> Result<Post, DomainError> {
        let bound = form.validate().map_err(DomainError::Validation)?;

        self.users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", author_id.to_string()))?;

        let group_id = self.resolve_group(bound.group.as_deref()).await?;

        let post = Post::new(author_id, bound.text, group_id, bound.image);
        tracing::debug!(post_id = %post.id, author_id = %author_id, "publishing post");

        Ok(self.posts.insert(post).await?)
    }

    /// Replace the editable fields (text/group/image) of an existing post.
    ///
    /// Only the author may edit; `author_id` and `pub_date` are untouched.
    /// The permission check runs before form validation so a non-author
    /// learns nothing about the form's acceptability.
    pub async fn edit(
        &self,
        post_id: Uuid,
        acting_user: Uuid,
        form: PostForm,
    ) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id.to_string()))?;

        if post.author_id != acting_user {
            return Err(DomainError::PermissionDenied);
        }

        let bound = form.validate().map_err(DomainError::Validation)?;
        let group_id = self.resolve_group(bound.group.as_deref()).await?;

        post.text = bound.text;
        post.group_id = group_id;
        post.image = bound.image;

        Ok(self.posts.update(post).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id.to_string()))
    }

    /// Main feed: every post, newest first.
    pub async fn feed(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        Ok(self.posts.list_all(page).await?)
    }

    /// Feed of one group, resolved by slug. Unknown slugs are `NotFound`.
    pub async fn group_feed(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<(Group, Page<Post>), DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))?;

        let posts = self.posts.list_by_group(group.id, page).await?;
        Ok((group, posts))
    }

    /// Feed of one author, resolved by username. Unknown usernames are
    /// `NotFound`.
    pub async fn author_feed(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<(User, Page<Post>), DomainError> {
        let author = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let posts = self.posts.list_by_author(author.id, page).await?;
        Ok((author, posts))
    }

    /// A group slug on a write is a form field, so an unknown slug surfaces
    /// as a field-level validation failure rather than `NotFound`.
    async fn resolve_group(&self, slug: Option<&str>) -> Result<Option<Uuid>, DomainError> {
        match slug {
            None => Ok(None),
            Some(slug) => match self.groups.find_by_slug(slug).await? {
                Some(group) => Ok(Some(group.id)),
                None => Err(DomainError::invalid_field(
                    "group",
                    format!("unknown group: {slug}"),
                )),
            },
        }
    }
}
