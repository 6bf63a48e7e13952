use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use crate::database::entity::post::{self, Tags};
use crate::database::postgres_repo::PostgresPostRepository;
use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

fn model(id: i32, title: &str, content: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        content: content.to_owned(),
        category: "Tech".to_owned(),
        tags: Tags(vec!["intro".to_owned()]),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Test Post", "Content")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 1);
    assert_eq!(post.tags, vec!["intro".to_string()]);
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(42).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Tech news", "a"), model(2, "Other", "biotech")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.list(Some("tech")).await.unwrap();
    let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_insert_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(7, "Hello", "World")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .insert(NewPost {
            title: "Hello".to_string(),
            content: "World".to_string(),
            category: "Tech".to_string(),
            tags: vec!["intro".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.content, "World");
}

#[tokio::test]
async fn test_update_returns_updated_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(3, "Hello", "World v2")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let patch = PostPatch {
        content: Some("World v2".to_string()),
        ..Default::default()
    };
    let post = repo.update(3, patch).await.unwrap();
    assert_eq!(post.content, "World v2");
    assert_eq!(post.title, "Hello");
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i32>::delete(&repo, 5).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(BaseRepository::<Post, i32>::delete(&repo, 5).await.is_ok());
}
