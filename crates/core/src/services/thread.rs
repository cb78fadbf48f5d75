//! Discussion thread service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::{thread, thread_reply, user};
use nexus_db::repositories::{ThreadRepository, UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Default page size when listing threads.
const DEFAULT_LIST_LIMIT: u64 = 50;

/// Maximum nesting depth for replies.
const MAX_REPLY_DEPTH: i32 = 5;

/// Input for creating a thread.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadInput {
    pub community_id: i64,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
}

/// Input for updating a thread.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThreadInput {
    pub thread_id: i64,
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
}

/// Input for creating a reply.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyInput {
    pub thread_id: i64,
    pub parent_reply_id: Option<i64>,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

/// Service for discussion threads and replies.
#[derive(Clone)]
pub struct ThreadService {
    thread_repo: ThreadRepository,
    user_repo: UserRepository,
}

impl ThreadService {
    /// Create a new thread service.
    #[must_use]
    pub const fn new(thread_repo: ThreadRepository, user_repo: UserRepository) -> Self {
        Self {
            thread_repo,
            user_repo,
        }
    }

    /// List threads in a community with their authors, pinned first.
    pub async fn list_with_authors(
        &self,
        community_id: i64,
        limit: Option<u64>,
    ) -> AppResult<Vec<(thread::Model, Option<user::Model>)>> {
        let threads = self
            .thread_repo
            .find_by_community(community_id, limit.unwrap_or(DEFAULT_LIST_LIMIT), 0)
            .await?;

        let mut joined = Vec::with_capacity(threads.len());
        for thread in threads {
            let author = self.user_repo.find_by_id(thread.author_id).await?;
            joined.push((thread, author));
        }

        Ok(joined)
    }

    /// Get a thread by ID and count the view.
    pub async fn get_and_record_view(&self, id: i64) -> AppResult<thread::Model> {
        let thread = self.thread_repo.get_by_id(id).await?;
        self.thread_repo.record_view(id).await?;
        Ok(thread)
    }

    /// Create a thread.
    pub async fn create(&self, author_id: i64, input: CreateThreadInput) -> AppResult<thread::Model> {
        input.validate()?;

        let now = Utc::now();
        let model = thread::ActiveModel {
            community_id: Set(input.community_id),
            author_id: Set(author_id),
            title: Set(input.title),
            content: Set(input.content),
            last_activity_at: Set(now.into()),
            created_at: Set(now.into()),
            ..Default::default()
        };

        self.thread_repo.create(model).await
    }

    /// Update a thread. Only the author or an admin may edit; pinning is
    /// admin only.
    pub async fn update(
        &self,
        user_id: i64,
        is_admin: bool,
        input: UpdateThreadInput,
    ) -> AppResult<thread::Model> {
        input.validate()?;

        let thread = self.thread_repo.get_by_id(input.thread_id).await?;
        if thread.author_id != user_id && !is_admin {
            return Err(AppError::Forbidden("Not the thread author".to_string()));
        }
        if input.is_pinned.is_some() && !is_admin {
            return Err(AppError::Forbidden(
                "Only admins can pin threads".to_string(),
            ));
        }

        let mut active: thread::ActiveModel = thread.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(is_pinned) = input.is_pinned {
            active.is_pinned = Set(is_pinned);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.thread_repo.update(active).await
    }

    /// Delete a thread and its replies. Only the author or an admin.
    pub async fn delete(&self, user_id: i64, is_admin: bool, thread_id: i64) -> AppResult<()> {
        let thread = self.thread_repo.get_by_id(thread_id).await?;
        if thread.author_id != user_id && !is_admin {
            return Err(AppError::Forbidden("Not the thread author".to_string()));
        }
        self.thread_repo.delete(thread_id).await
    }

    // ==================== Reply Operations ====================

    /// List replies in a thread with their authors, oldest first.
    pub async fn list_replies_with_authors(
        &self,
        thread_id: i64,
    ) -> AppResult<Vec<(thread_reply::Model, Option<user::Model>)>> {
        let replies = self.thread_repo.find_replies(thread_id).await?;

        let mut joined = Vec::with_capacity(replies.len());
        for reply in replies {
            let author = self.user_repo.find_by_id(reply.author_id).await?;
            joined.push((reply, author));
        }

        Ok(joined)
    }

    /// Create a reply, deriving its depth from the parent.
    pub async fn create_reply(
        &self,
        author_id: i64,
        input: CreateReplyInput,
    ) -> AppResult<thread_reply::Model> {
        input.validate()?;

        self.thread_repo.get_by_id(input.thread_id).await?;

        let depth = match input.parent_reply_id {
            Some(parent_id) => {
                let parent = self.thread_repo.get_reply_by_id(parent_id).await?;
                if parent.thread_id != input.thread_id {
                    return Err(AppError::BadRequest(
                        "Parent reply belongs to a different thread".to_string(),
                    ));
                }
                if parent.depth >= MAX_REPLY_DEPTH {
                    return Err(AppError::BadRequest(
                        "Reply nesting is too deep".to_string(),
                    ));
                }
                parent.depth + 1
            }
            None => 0,
        };

        let model = thread_reply::ActiveModel {
            thread_id: Set(input.thread_id),
            author_id: Set(author_id),
            parent_reply_id: Set(input.parent_reply_id),
            content: Set(input.content),
            depth: Set(depth),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.thread_repo.create_reply(model).await
    }

    /// Delete a reply. Only the author or an admin.
    pub async fn delete_reply(&self, user_id: i64, is_admin: bool, reply_id: i64) -> AppResult<()> {
        let reply = self.thread_repo.get_reply_by_id(reply_id).await?;
        if reply.author_id != user_id && !is_admin {
            return Err(AppError::Forbidden("Not the reply author".to_string()));
        }
        self.thread_repo.delete_reply(reply.id, reply.thread_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_thread(id: i64, author_id: i64) -> thread::Model {
        thread::Model {
            id,
            community_id: 5,
            author_id,
            title: "Discussion".to_string(),
            content: "body".to_string(),
            is_pinned: false,
            reply_count: 0,
            view_count: 0,
            last_activity_at: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_reply(id: i64, thread_id: i64, author_id: i64, depth: i32) -> thread_reply::Model {
        thread_reply::Model {
            id,
            thread_id,
            author_id,
            parent_reply_id: None,
            content: "a reply".to_string(),
            depth,
            reaction_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> ThreadService {
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        ThreadService::new(
            ThreadRepository::new(Arc::new(db)),
            UserRepository::new(user_db),
        )
    }

    #[tokio::test]
    async fn test_update_rejects_non_author() {
        let thread = create_test_thread(1, 10);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[thread]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .update(
                99,
                false,
                UpdateThreadInput {
                    thread_id: 1,
                    title: Some("New".to_string()),
                    content: None,
                    is_pinned: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_pin_requires_admin() {
        let thread = create_test_thread(1, 10);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[thread]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .update(
                10,
                false,
                UpdateThreadInput {
                    thread_id: 1,
                    title: None,
                    content: None,
                    is_pinned: Some(true),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_reply_rejects_cross_thread_parent() {
        let thread = create_test_thread(1, 10);
        let parent = create_test_reply(3, 2, 10, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[thread]])
            .append_query_results([[parent]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .create_reply(
                10,
                CreateReplyInput {
                    thread_id: 1,
                    parent_reply_id: Some(3),
                    content: "hi".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_reply_rejects_too_deep() {
        let thread = create_test_thread(1, 10);
        let parent = create_test_reply(3, 1, 10, MAX_REPLY_DEPTH);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[thread]])
            .append_query_results([[parent]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .create_reply(
                10,
                CreateReplyInput {
                    thread_id: 1,
                    parent_reply_id: Some(3),
                    content: "hi".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_reply_allows_admin() {
        let reply = create_test_reply(3, 1, 10, 0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[reply]])
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        assert!(service.delete_reply(99, true, 3).await.is_ok());
    }
}
