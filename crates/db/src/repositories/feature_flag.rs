//! Feature flag repository.

use std::sync::Arc;

use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
};

use crate::entities::{FeatureFlag, feature_flag};

/// Repository for feature flags.
#[derive(Clone)]
pub struct FeatureFlagRepository {
    db: Arc<DatabaseConnection>,
}

impl FeatureFlagRepository {
    /// Create a new feature flag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a flag by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<feature_flag::Model>> {
        FeatureFlag::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a flag by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<feature_flag::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feature flag not found: {id}")))
    }

    /// Find a flag by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<feature_flag::Model>> {
        FeatureFlag::find()
            .filter(feature_flag::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every flag, alphabetical by name.
    pub async fn find_all(&self) -> AppResult<Vec<feature_flag::Model>> {
        FeatureFlag::find()
            .order_by(feature_flag::Column::Name, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new flag.
    pub async fn create(&self, model: feature_flag::ActiveModel) -> AppResult<feature_flag::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a flag.
    pub async fn update(&self, model: feature_flag::ActiveModel) -> AppResult<feature_flag::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::feature_flag::TargetUserIds;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_flag(id: i64, name: &str, enabled: bool) -> feature_flag::Model {
        feature_flag::Model {
            id,
            name: name.to_string(),
            description: None,
            enabled,
            rollout_percentage: 100,
            target_user_ids: Some(TargetUserIds(vec![1, 2])),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_found() {
        let flag = create_test_flag(1, "new-feed", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[flag]])
                .into_connection(),
        );

        let repo = FeatureFlagRepository::new(db);
        let result = repo.find_by_name("new-feed").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert!(found.enabled);
        assert!(found.target_user_ids.unwrap().contains(2));
    }

    #[tokio::test]
    async fn test_find_all() {
        let f1 = create_test_flag(1, "a", true);
        let f2 = create_test_flag(2, "b", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1, f2]])
                .into_connection(),
        );

        let repo = FeatureFlagRepository::new(db);
        let result = repo.find_all().await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
