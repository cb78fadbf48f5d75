//! Page and widget repository.

use std::sync::Arc;

use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::entities::{Page, Widget, page, widget};

/// Repository for pages and the widgets placed on them.
#[derive(Clone)]
pub struct PageRepository {
    db: Arc<DatabaseConnection>,
}

impl PageRepository {
    /// Create a new page repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a page by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<page::Model>> {
        Page::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a page by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<page::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Page not found: {id}")))
    }

    /// Find pages owned by a user, newest first.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<page::Model>> {
        Page::find()
            .filter(page::Column::UserId.eq(user_id))
            .order_by(page::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new page.
    pub async fn create(&self, model: page::ActiveModel) -> AppResult<page::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a page.
    pub async fn update(&self, model: page::ActiveModel) -> AppResult<page::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a page and its widgets in one transaction.
    ///
    /// The FK cascade would catch the widgets anyway; deleting them first
    /// keeps the removal explicit.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Widget::delete_many()
            .filter(widget::Column::PageId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Page::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    // ==================== Widget Operations ====================

    /// Find a widget by ID.
    pub async fn find_widget_by_id(&self, id: i64) -> AppResult<Option<widget::Model>> {
        Widget::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a widget by ID, returning an error if not found.
    pub async fn get_widget_by_id(&self, id: i64) -> AppResult<widget::Model> {
        self.find_widget_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Widget not found: {id}")))
    }

    /// Find all widgets on a page, oldest first.
    pub async fn find_widgets_by_page(&self, page_id: i64) -> AppResult<Vec<widget::Model>> {
        Widget::find()
            .filter(widget::Column::PageId.eq(page_id))
            .order_by(widget::Column::CreatedAt, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Add a widget to a page.
    pub async fn create_widget(&self, model: widget::ActiveModel) -> AppResult<widget::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a widget.
    pub async fn update_widget(&self, model: widget::ActiveModel) -> AppResult<widget::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a widget from its page.
    pub async fn delete_widget(&self, id: i64) -> AppResult<()> {
        Widget::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::page::{PageType, PageVisibility};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_page(id: i64, user_id: i64, name: &str) -> page::Model {
        page::Model {
            id,
            user_id,
            name: name.to_string(),
            page_type: PageType::Social,
            visibility: PageVisibility::Public,
            layout_config: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let p1 = create_test_page(1, 10, "My Hub");
        let p2 = create_test_page(2, 10, "Work");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PageRepository::new(db);
        let result = repo.find_by_user(10).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "My Hub");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<page::Model>::new()])
                .into_connection(),
        );

        let repo = PageRepository::new(db);
        let result = repo.get_by_id(99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_widgets_then_page() {
        // Two deletes run inside the transaction, widgets first.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 3,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = PageRepository::new(db);
        repo.delete(1).await.unwrap();
    }
}
