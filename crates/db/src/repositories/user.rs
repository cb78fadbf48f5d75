//! User repository.

use std::sync::Arc;

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::{User, user};

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found: {id}")))
    }

    /// Find a user by external OAuth identifier.
    pub async fn find_by_open_id(&self, open_id: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::OpenId.eq(open_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by session token.
    pub async fn find_by_session_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::SessionToken.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Clear the session token for a user.
    pub async fn clear_session_token(&self, id: i64) -> AppResult<()> {
        let user = self.get_by_id(id).await?;
        let mut active: user::ActiveModel = user.into();
        active.session_token = Set(None);
        active.updated_at = Set(Some(Utc::now().into()));

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::user::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_user(id: i64, open_id: &str, role: UserRole) -> user::Model {
        user::Model {
            id,
            open_id: open_id.to_string(),
            name: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
            login_method: Some("oauth".to_string()),
            role,
            bio: None,
            avatar_url: None,
            preferences: None,
            session_token: Some("token-1".to_string()),
            last_signed_in: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_open_id_found() {
        let user = create_test_user(1, "open-1", UserRole::User);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_open_id("open-1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().open_id, "open-1");
    }

    #[tokio::test]
    async fn test_find_by_session_token_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_session_token("missing").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
