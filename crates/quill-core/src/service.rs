//! Post service - the five operations exposed over HTTP.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::domain::Post;
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;
use crate::validation::{validate_new_post, validate_patch};

/// Application service encapsulating post business rules.
///
/// Validation happens here; storage is delegated to the repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// List all posts, or only those whose title or content matches `search`.
    ///
    /// A blank search term is treated as absent.
    #[instrument(skip(self))]
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let search = search.map(str::trim).filter(|term| !term.is_empty());
        Ok(self.repo.list(search).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &Value) -> Result<Post, DomainError> {
        let new_post = validate_new_post(input)?;
        let post = self.repo.insert(new_post).await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Apply a partial update.
    ///
    /// The post is resolved before the input is validated, so an unknown id
    /// is reported as not found whatever the payload.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &Value) -> Result<Post, DomainError> {
        let existing = self.get(id).await?;
        let patch = validate_patch(input)?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let post = self.repo.update(id, patch).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.get(id).await?;

        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}
