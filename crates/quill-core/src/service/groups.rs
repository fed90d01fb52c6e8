use std::sync::Arc;

use crate::domain::Group;
use crate::error::{DomainError, ValidationErrors};
use crate::ports::GroupRepository;

/// Group access rules. Creation and deletion are administrative actions;
/// the HTTP layer enforces the role, this layer enforces the data rules.
pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    /// Create a group. Fails with `Duplicate` when the slug is already
    /// taken and with `Validation` on structural problems.
    pub async fn create(
        &self,
        title: &str,
        slug: &str,
        description: &str,
    ) -> Result<Group, DomainError> {
        let mut errors = ValidationErrors::new();

        if title.trim().is_empty() {
            errors.push("title", "title must not be empty");
        }
        if slug.trim().is_empty() {
            errors.push("slug", "slug must not be empty");
        } else if !is_url_safe(slug) {
            errors.push(
                "slug",
                "slug may only contain letters, digits, hyphens and underscores",
            );
        }
        if description.trim().is_empty() {
            errors.push("description", "description must not be empty");
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        if self.groups.find_by_slug(slug).await?.is_some() {
            return Err(DomainError::Duplicate(format!("group slug: {slug}")));
        }

        let group = Group::new(title.to_string(), slug.to_string(), description.to_string());
        tracing::info!(slug = %group.slug, "creating group");

        // A concurrent insert of the same slug still loses to the unique
        // constraint; the repo maps it to the same Duplicate error.
        Ok(self.groups.insert(group).await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Group, DomainError> {
        self.groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))
    }

    pub async fn list(&self) -> Result<Vec<Group>, DomainError> {
        Ok(self.groups.list().await?)
    }

    /// Delete a group. Posts referencing it survive with group cleared.
    pub async fn delete(&self, slug: &str) -> Result<(), DomainError> {
        let group = self.get_by_slug(slug).await?;
        tracing::info!(slug = %group.slug, "deleting group");
        Ok(self.groups.delete(group.id).await?)
    }
}

fn is_url_safe(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
