//! Post service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::post::{self, PostType};
use nexus_db::entities::user;
use nexus_db::repositories::{PostRepository, UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Default page size for a community feed.
const DEFAULT_FEED_LIMIT: u64 = 50;

/// Input for creating a post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub community_id: i64,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub media_urls: Option<serde_json::Value>,
}

/// Service for community posts.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    user_repo: UserRepository,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, user_repo: UserRepository) -> Self {
        Self {
            post_repo,
            user_repo,
        }
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> AppResult<post::Model> {
        self.post_repo.get_by_id(id).await
    }

    /// List posts in a community with their authors, newest first.
    pub async fn list_with_authors(
        &self,
        community_id: i64,
        limit: Option<u64>,
    ) -> AppResult<Vec<(post::Model, Option<user::Model>)>> {
        let posts = self
            .post_repo
            .find_by_community(community_id, limit.unwrap_or(DEFAULT_FEED_LIMIT), 0)
            .await?;

        let mut joined = Vec::with_capacity(posts.len());
        for post in posts {
            let author = self.user_repo.find_by_id(post.author_id).await?;
            joined.push((post, author));
        }

        Ok(joined)
    }

    /// Create a post in a community.
    pub async fn create(&self, author_id: i64, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        let model = post::ActiveModel {
            community_id: Set(input.community_id),
            author_id: Set(author_id),
            content: Set(input.content),
            post_type: Set(input.post_type.unwrap_or_default()),
            media_urls: Set(input.media_urls),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.post_repo.create(model).await
    }

    /// Delete a post. Only the author may delete it.
    pub async fn delete(&self, user_id: i64, post_id: i64) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != user_id {
            return Err(AppError::Forbidden("Not the post author".to_string()));
        }
        self.post_repo.delete(post_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_post(id: i64, community_id: i64, author_id: i64) -> post::Model {
        post::Model {
            id,
            community_id,
            author_id,
            content: "hello".to_string(),
            post_type: PostType::Text,
            media_urls: None,
            reaction_count: 0,
            reply_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_delete_rejects_non_author() {
        let post = create_test_post(1, 5, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = PostService::new(PostRepository::new(db), UserRepository::new(user_db));
        let result = service.delete(99, 1).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = PostService::new(PostRepository::new(db), UserRepository::new(user_db));
        let result = service
            .create(
                10,
                CreatePostInput {
                    community_id: 5,
                    content: String::new(),
                    post_type: None,
                    media_urls: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
