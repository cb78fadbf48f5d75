//! AI companion repository.

use std::sync::Arc;

use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::entities::{Companion, companion};

/// Repository for per-user AI companion settings.
#[derive(Clone)]
pub struct CompanionRepository {
    db: Arc<DatabaseConnection>,
}

impl CompanionRepository {
    /// Create a new companion repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the companion owned by a user. Each user has at most one.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Option<companion::Model>> {
        Companion::find()
            .filter(companion::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a companion.
    pub async fn create(&self, model: companion::ActiveModel) -> AppResult<companion::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a companion.
    pub async fn update(&self, model: companion::ActiveModel) -> AppResult<companion::Model> {
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
    use crate::entities::companion::{DEFAULT_COMPANION_NAME, VoiceMode};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_user_found() {
        let companion = companion::Model {
            id: 1,
            user_id: 10,
            name: DEFAULT_COMPANION_NAME.to_string(),
            avatar_type: "orb".to_string(),
            voice_mode: VoiceMode::Guide,
            personality_config: None,
            onboarding_progress: None,
            preferences: None,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[companion]])
                .into_connection(),
        );

        let repo = CompanionRepository::new(db);
        let result = repo.find_by_user(10).await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().name, "NEX");
    }
}
