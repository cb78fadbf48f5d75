//! Community widget and template repository.

use std::sync::Arc;

use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
};

use crate::entities::{
    CommunityTemplate, CommunityWidget, community_template, community_widget,
};

/// Repository for widgets pinned to a community and reusable layout templates.
#[derive(Clone)]
pub struct CommunityWidgetRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityWidgetRepository {
    /// Create a new community widget repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a community widget by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<community_widget::Model>> {
        CommunityWidget::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a community widget by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<community_widget::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Community widget not found: {id}")))
    }

    /// Find visible widgets in a community, ordered by position.
    pub async fn find_visible_by_community(
        &self,
        community_id: i64,
    ) -> AppResult<Vec<community_widget::Model>> {
        CommunityWidget::find()
            .filter(community_widget::Column::CommunityId.eq(community_id))
            .filter(community_widget::Column::IsVisible.eq(true))
            .order_by(community_widget::Column::Position, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a community widget.
    pub async fn create(
        &self,
        model: community_widget::ActiveModel,
    ) -> AppResult<community_widget::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a community widget.
    pub async fn update(
        &self,
        model: community_widget::ActiveModel,
    ) -> AppResult<community_widget::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a community widget.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        CommunityWidget::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    // ==================== Template Operations ====================

    /// List public community templates, alphabetical by name.
    pub async fn find_public_templates(&self) -> AppResult<Vec<community_template::Model>> {
        CommunityTemplate::find()
            .filter(community_template::Column::IsPublic.eq(true))
            .order_by(community_template::Column::Name, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_widget(id: i64, community_id: i64, position: i32) -> community_widget::Model {
        community_widget::Model {
            id,
            community_id,
            widget_type: "announcements".to_string(),
            title: "Announcements".to_string(),
            content: None,
            position,
            is_visible: true,
            created_by: 10,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_visible_by_community() {
        let w1 = create_test_widget(1, 5, 0);
        let w2 = create_test_widget(2, 5, 1);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[w1, w2]])
                .into_connection(),
        );

        let repo = CommunityWidgetRepository::new(db);
        let result = repo.find_visible_by_community(5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].position, 0);
    }
}
