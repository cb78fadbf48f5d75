//! User service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::user::{self, UserRole};
use nexus_db::repositories::UserRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for synchronizing a user from the OAuth callback.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserInput {
    #[validate(length(min = 1, max = 64))]
    pub open_id: String,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub login_method: Option<String>,
    pub session_token: Option<String>,
}

/// Input for updating the caller's profile.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub preferences: Option<serde_json::Value>,
}

/// Service for user accounts.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    owner_open_id: Option<String>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, owner_open_id: Option<String>) -> Self {
        Self {
            user_repo,
            owner_open_id,
        }
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Find a user by session token.
    pub async fn find_by_session_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        self.user_repo.find_by_session_token(token).await
    }

    /// Upsert a user from the OAuth identity, keyed by `open_id`.
    ///
    /// Applies the configured owner promotion on every sync so a demoted
    /// owner account regains admin on the next sign-in.
    pub async fn sync(&self, input: SyncUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let role = self.role_for(&input.open_id);
        let now = Utc::now();

        match self.user_repo.find_by_open_id(&input.open_id).await? {
            Some(existing) => {
                let mut active: user::ActiveModel = existing.into();
                if let Some(name) = input.name {
                    active.name = Set(Some(name));
                }
                if let Some(email) = input.email {
                    active.email = Set(Some(email));
                }
                if let Some(method) = input.login_method {
                    active.login_method = Set(Some(method));
                }
                if let Some(token) = input.session_token {
                    active.session_token = Set(Some(token));
                }
                if role.is_admin() {
                    active.role = Set(role);
                }
                active.last_signed_in = Set(now.into());
                active.updated_at = Set(Some(now.into()));

                self.user_repo.update(active).await
            }
            None => {
                let model = user::ActiveModel {
                    open_id: Set(input.open_id),
                    name: Set(input.name),
                    email: Set(input.email),
                    login_method: Set(input.login_method),
                    role: Set(role),
                    session_token: Set(input.session_token),
                    last_signed_in: Set(now.into()),
                    created_at: Set(now.into()),
                    ..Default::default()
                };
                self.user_repo.create(model).await
            }
        }
    }

    /// Update the caller's profile fields.
    pub async fn update_profile(
        &self,
        user_id: i64,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();

        if let Some(name) = input.name {
            active.name = Set(Some(name));
        }
        if let Some(bio) = input.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        if let Some(preferences) = input.preferences {
            active.preferences = Set(Some(preferences));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Clear the caller's session token, ending the session.
    pub async fn logout(&self, user_id: i64) -> AppResult<()> {
        self.user_repo.clear_session_token(user_id).await
    }

    fn role_for(&self, open_id: &str) -> UserRole {
        match &self.owner_open_id {
            Some(owner) if owner == open_id => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: i64, open_id: &str, role: UserRole) -> user::Model {
        user::Model {
            id,
            open_id: open_id.to_string(),
            name: None,
            email: None,
            login_method: None,
            role,
            bio: None,
            avatar_url: None,
            preferences: None,
            session_token: None,
            last_signed_in: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_role_for_owner() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db), Some("owner-1".to_string()));

        assert_eq!(service.role_for("owner-1"), UserRole::Admin);
        assert_eq!(service.role_for("someone-else"), UserRole::User);
    }

    #[test]
    fn test_role_for_no_owner_configured() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db), None);

        assert_eq!(service.role_for("anyone"), UserRole::User);
    }

    #[tokio::test]
    async fn test_sync_rejects_empty_open_id() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db), None);

        let result = service
            .sync(SyncUserInput {
                open_id: String::new(),
                name: None,
                email: None,
                login_method: None,
                session_token: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sync_existing_user_keeps_admin_promotion() {
        let existing = create_test_user(1, "owner-1", UserRole::User);
        let promoted = create_test_user(1, "owner-1", UserRole::Admin);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_query_results([[promoted]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db), Some("owner-1".to_string()));
        let result = service
            .sync(SyncUserInput {
                open_id: "owner-1".to_string(),
                name: None,
                email: None,
                login_method: None,
                session_token: None,
            })
            .await
            .unwrap();

        assert!(result.role.is_admin());
    }
}
