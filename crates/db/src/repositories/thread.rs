//! Discussion thread repository.

use std::sync::Arc;

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::entities::{Thread, ThreadReply, thread, thread_reply};

/// Repository for discussion threads and their replies.
#[derive(Clone)]
pub struct ThreadRepository {
    db: Arc<DatabaseConnection>,
}

impl ThreadRepository {
    /// Create a new thread repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a thread by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<thread::Model>> {
        Thread::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a thread by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<thread::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Thread not found: {id}")))
    }

    /// Find threads in a community, pinned first, then by recent activity.
    pub async fn find_by_community(
        &self,
        community_id: i64,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<thread::Model>> {
        Thread::find()
            .filter(thread::Column::CommunityId.eq(community_id))
            .order_by(thread::Column::IsPinned, Order::Desc)
            .order_by(thread::Column::LastActivityAt, Order::Desc)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new thread.
    pub async fn create(&self, model: thread::ActiveModel) -> AppResult<thread::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a thread.
    pub async fn update(&self, model: thread::ActiveModel) -> AppResult<thread::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a thread and its replies in one transaction.
    ///
    /// The FK cascade would catch the replies anyway; deleting them first
    /// keeps the removal explicit.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        ThreadReply::delete_many()
            .filter(thread_reply::Column::ThreadId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Thread::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Record a view by bumping the view count atomically.
    pub async fn record_view(&self, id: i64) -> AppResult<()> {
        use sea_orm::sea_query::Expr;

        Thread::update_many()
            .col_expr(
                thread::Column::ViewCount,
                Expr::col(thread::Column::ViewCount).add(1),
            )
            .filter(thread::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    // ==================== Reply Operations ====================

    /// Find a reply by ID.
    pub async fn find_reply_by_id(&self, id: i64) -> AppResult<Option<thread_reply::Model>> {
        ThreadReply::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a reply by ID, returning an error if not found.
    pub async fn get_reply_by_id(&self, id: i64) -> AppResult<thread_reply::Model> {
        self.find_reply_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reply not found: {id}")))
    }

    /// Find all replies in a thread, oldest first.
    pub async fn find_replies(&self, thread_id: i64) -> AppResult<Vec<thread_reply::Model>> {
        ThreadReply::find()
            .filter(thread_reply::Column::ThreadId.eq(thread_id))
            .order_by(thread_reply::Column::CreatedAt, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a reply, bump the thread's reply count, and refresh its
    /// activity timestamp in one transaction.
    pub async fn create_reply(
        &self,
        model: thread_reply::ActiveModel,
    ) -> AppResult<thread_reply::Model> {
        use sea_orm::sea_query::Expr;

        let thread_id = *model
            .thread_id
            .try_as_ref()
            .ok_or_else(|| AppError::Internal("thread_id not set".to_string()))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let reply = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Thread::update_many()
            .col_expr(
                thread::Column::ReplyCount,
                Expr::col(thread::Column::ReplyCount).add(1),
            )
            .col_expr(
                thread::Column::LastActivityAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(thread::Column::Id.eq(thread_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(reply)
    }

    /// Delete a reply and drop the thread's reply count in one transaction.
    ///
    /// The count never goes below zero even if it was already stale.
    pub async fn delete_reply(&self, id: i64, thread_id: i64) -> AppResult<()> {
        use sea_orm::sea_query::Expr;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = ThreadReply::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected > 0 {
            Thread::update_many()
                .col_expr(
                    thread::Column::ReplyCount,
                    Expr::cust("GREATEST(reply_count - 1, 0)"),
                )
                .filter(thread::Column::Id.eq(thread_id))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_thread(id: i64, community_id: i64, title: &str, pinned: bool) -> thread::Model {
        thread::Model {
            id,
            community_id,
            author_id: 10,
            title: title.to_string(),
            content: "body".to_string(),
            is_pinned: pinned,
            reply_count: 0,
            view_count: 0,
            last_activity_at: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_reply(id: i64, thread_id: i64, author_id: i64) -> thread_reply::Model {
        thread_reply::Model {
            id,
            thread_id,
            author_id,
            parent_reply_id: None,
            content: "a reply".to_string(),
            depth: 0,
            reaction_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_community() {
        let t1 = create_test_thread(1, 5, "Pinned", true);
        let t2 = create_test_thread(2, 5, "Recent", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[t1, t2]])
                .into_connection(),
        );

        let repo = ThreadRepository::new(db);
        let result = repo.find_by_community(5, 50, 0).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result[0].is_pinned);
    }

    #[tokio::test]
    async fn test_find_replies() {
        let r1 = create_test_reply(1, 7, 10);
        let r2 = create_test_reply(2, 7, 11);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = ThreadRepository::new(db);
        let result = repo.find_replies(7).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_get_reply_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<thread_reply::Model>::new()])
                .into_connection(),
        );

        let repo = ThreadRepository::new(db);
        let result = repo.get_reply_by_id(99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
