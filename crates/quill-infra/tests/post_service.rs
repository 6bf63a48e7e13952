use std::sync::Arc;

use serde_json::{Value, json};

use quill_core::{DomainError, PostService};
use quill_infra::InMemoryPostRepository;

fn service() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

fn hello() -> Value {
    json!({
        "title": "Hello",
        "content": "World",
        "category": "Tech",
        "tags": ["intro"]
    })
}

fn assert_invalid(result: Result<impl std::fmt::Debug, DomainError>, field: &str) {
    match result {
        Err(DomainError::Validation(errors)) => {
            assert!(errors.contains(field), "expected {field} in {errors:?}")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn assert_not_found(result: Result<impl std::fmt::Debug, DomainError>) {
    assert!(
        matches!(result, Err(DomainError::NotFound { .. })),
        "expected not found, got {result:?}"
    );
}

#[tokio::test]
async fn create_then_get_returns_same_post() {
    let service = service();

    let created = service.create(&hello()).await.unwrap();
    let fetched = service.get(created.id).await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.title, "Hello");
    assert_eq!(fetched.tags, vec!["intro".to_string()]);
}

#[tokio::test]
async fn create_rejects_long_title() {
    let mut input = hello();
    input["title"] = json!("t".repeat(121));
    assert_invalid(service().create(&input).await, "title");
}

#[tokio::test]
async fn create_rejects_out_of_range_tags() {
    for tag in ["abc".to_string(), "t".repeat(21)] {
        let mut input = hello();
        input["tags"] = json!([tag]);
        assert_invalid(service().create(&input).await, "tags");
    }
}

#[tokio::test]
async fn create_requires_category() {
    let input = json!({"title": "Hello", "content": "World"});
    assert_invalid(service().create(&input).await, "category");
}

#[tokio::test]
async fn failed_create_stores_nothing() {
    let service = service();
    let _ = service.create(&json!({"title": "Hello"})).await;
    assert!(service.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let service = service();
    let created = service.create(&hello()).await.unwrap();

    let updated = service
        .update(created.id, &json!({"title": "X"}))
        .await
        .unwrap();

    assert_eq!(updated.title, "X");
    assert_eq!(updated.content, "World");
    assert_eq!(updated.category, "Tech");
    assert_eq!(updated.tags, vec!["intro".to_string()]);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_ignores_unknown_fields() {
    let service = service();
    let created = service.create(&hello()).await.unwrap();

    let updated = service
        .update(created.id, &json!({"id": 999, "category": "Life"}))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.category, "Life");
    assert_not_found(service.get(999).await);
}

#[tokio::test]
async fn update_validates_present_fields() {
    let service = service();
    let created = service.create(&hello()).await.unwrap();

    assert_invalid(
        service.update(created.id, &json!({"tags": ["no"]})).await,
        "tags",
    );
    assert_eq!(service.get(created.id).await.unwrap().tags, created.tags);
}

#[tokio::test]
async fn update_without_known_fields_leaves_post_untouched() {
    let service = service();
    let created = service.create(&hello()).await.unwrap();

    for input in [json!({}), json!({"id": 7, "createdAt": "2001-01-01T00:00:00Z"})] {
        let unchanged = service.update(created.id, &input).await.unwrap();
        assert_eq!(unchanged, created);
    }

    let stored = service.get(created.id).await.unwrap();
    assert_eq!(stored.updated_at, created.updated_at);
}

#[tokio::test]
async fn create_trims_string_fields() {
    let service = service();
    let input = json!({
        "title": format!("{} ", "t".repeat(120)),
        "content": "  World  ",
        "category": "Tech",
        "tags": [" rust "]
    });

    let created = service.create(&input).await.unwrap();
    assert_eq!(created.title, "t".repeat(120));
    assert_eq!(created.content, "World");
    assert_eq!(created.tags, vec!["rust".to_string()]);
}

#[tokio::test]
async fn update_unknown_id_is_not_found_regardless_of_input() {
    let service = service();

    assert_not_found(service.update(41, &json!({"title": "ok"})).await);
    assert_not_found(service.update(41, &json!({"title": "t".repeat(500)})).await);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let service = service();
    let created = service.create(&hello()).await.unwrap();

    service.delete(created.id).await.unwrap();

    assert_not_found(service.get(created.id).await);
    assert_not_found(service.delete(created.id).await);
}

#[tokio::test]
async fn list_search_matches_title_or_content() {
    let service = service();
    let in_title = service
        .create(&json!({"title": "Big TECH", "content": "x", "category": "c"}))
        .await
        .unwrap();
    let in_content = service
        .create(&json!({"title": "Food", "content": "fintech news", "category": "c"}))
        .await
        .unwrap();
    service
        .create(&json!({"title": "Garden", "content": "soil", "category": "tech"}))
        .await
        .unwrap();

    let found = service.list(Some("tech")).await.unwrap();
    let ids: Vec<i32> = found.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![in_title.id, in_content.id]);
}

#[tokio::test]
async fn list_without_search_returns_everything() {
    let service = service();
    for i in 0..3 {
        service
            .create(&json!({"title": format!("Post {i}"), "content": "c", "category": "c"}))
            .await
            .unwrap();
    }

    assert_eq!(service.list(None).await.unwrap().len(), 3);
    assert_eq!(service.list(Some("")).await.unwrap().len(), 3);
    assert_eq!(service.list(Some("   ")).await.unwrap().len(), 3);
    assert!(service.list(Some("missing")).await.unwrap().is_empty());
}

#[tokio::test]
async fn full_lifecycle() {
    let service = service();

    let created = service.create(&hello()).await.unwrap();
    assert!(created.id > 0);

    let updated = service
        .update(created.id, &json!({"content": "World v2"}))
        .await
        .unwrap();
    assert_eq!(updated.title, "Hello");
    assert_eq!(updated.content, "World v2");

    service.delete(created.id).await.unwrap();
    assert_not_found(service.get(created.id).await);
}
