//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ActiveModelTrait, Condition, EntityTrait, QueryFilter, QueryOrder};

use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Build a `%term%` pattern with LIKE wildcards in `term` escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains(column: post::Column, term: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::col(column).ilike(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(term) = search {
            tracing::debug!(search = %term, "Searching posts");
            query = query.filter(
                Condition::any()
                    .add(contains(post::Column::Title, term))
                    .add(contains(post::Column::Content, term)),
            );
        }

        let result = query
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Inserted post");
        Ok(model.into())
    }

    async fn update(&self, id: i32, patch: PostPatch) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from_patch(id, patch)
            .update(&self.db)
            .await
            .map_err(repo_error)?;

        tracing::debug!(post_id = id, "Updated post");
        Ok(model.into())
    }
}
