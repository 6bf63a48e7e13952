//! In-memory post repository - fallback when PostgreSQL is unavailable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Store {
    posts: BTreeMap<i32, Post>,
    last_id: i32,
}

/// In-memory post store using a BTreeMap with async RwLock.
///
/// Ids are assigned sequentially starting at 1 and never reused.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    fn matches(post: &Post, needle: &str) -> bool {
        post.title.to_lowercase().contains(needle) || post.content.to_lowercase().contains(needle)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let posts = match search {
            Some(term) => {
                let needle = term.to_lowercase();
                store
                    .posts
                    .values()
                    .filter(|post| Self::matches(post, &needle))
                    .cloned()
                    .collect()
            }
            None => store.posts.values().cloned().collect(),
        };

        Ok(posts)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let now = Utc::now();
        let post = Post {
            id: store.last_id,
            title: post.title,
            content: post.content,
            category: post.category,
            tags: post.tags,
            created_at: now,
            updated_at: now,
        };

        store.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        patch.apply_to(post);
        post.updated_at = Utc::now();

        Ok(post.clone())
    }
}
