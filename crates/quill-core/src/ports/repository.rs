use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining the id-keyed operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Returns [`RepoError::NotFound`] when no row was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// List posts in ascending id order.
    ///
    /// With a `search` term, only posts whose title or content contains it
    /// (case-insensitively) are returned.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Insert a new post and return it with its assigned id and timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Write the supplied fields of `patch` to the post with `id`.
    async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, RepoError>;
}
