//! AI companion service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::companion::{self, DEFAULT_COMPANION_NAME, VoiceMode};
use nexus_db::repositories::{CompanionRepository, UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for updating companion settings.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanionInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub avatar_type: Option<String>,
    pub voice_mode: Option<VoiceMode>,
    pub personality_config: Option<serde_json::Value>,
    pub onboarding_progress: Option<serde_json::Value>,
    pub preferences: Option<serde_json::Value>,
}

/// Input for chatting with the companion.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

/// Service for per-user AI companions.
#[derive(Clone)]
pub struct CompanionService {
    companion_repo: CompanionRepository,
    user_repo: UserRepository,
}

impl CompanionService {
    /// Create a new companion service.
    #[must_use]
    pub const fn new(companion_repo: CompanionRepository, user_repo: UserRepository) -> Self {
        Self {
            companion_repo,
            user_repo,
        }
    }

    /// Get the caller's companion, creating a default one on first access.
    pub async fn get_or_create(&self, user_id: i64) -> AppResult<companion::Model> {
        if let Some(companion) = self.companion_repo.find_by_user(user_id).await? {
            return Ok(companion);
        }

        let model = companion::ActiveModel {
            user_id: Set(user_id),
            name: Set(DEFAULT_COMPANION_NAME.to_string()),
            avatar_type: Set("default".to_string()),
            voice_mode: Set(VoiceMode::Guide),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.companion_repo.create(model).await
    }

    /// Update the caller's companion settings.
    pub async fn update(
        &self,
        user_id: i64,
        input: UpdateCompanionInput,
    ) -> AppResult<companion::Model> {
        input.validate()?;

        let companion = self.get_or_create(user_id).await?;
        let mut active: companion::ActiveModel = companion.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(avatar_type) = input.avatar_type {
            active.avatar_type = Set(avatar_type);
        }
        if let Some(voice_mode) = input.voice_mode {
            active.voice_mode = Set(voice_mode);
        }
        if let Some(personality_config) = input.personality_config {
            active.personality_config = Set(Some(personality_config));
        }
        if let Some(onboarding_progress) = input.onboarding_progress {
            active.onboarding_progress = Set(Some(onboarding_progress));
        }
        if let Some(preferences) = input.preferences {
            active.preferences = Set(Some(preferences));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.companion_repo.update(active).await
    }

    /// Produce a canned companion reply.
    ///
    /// Language model integration is not wired up yet; this greets the
    /// user by name until it is.
    pub async fn chat(&self, user_id: i64, input: ChatInput) -> AppResult<String> {
        input.validate()?;

        let companion = self.get_or_create(user_id).await?;
        let user = self.user_repo.get_by_id(user_id).await?;
        let user_name = user.name.unwrap_or_else(|| "there".to_string());

        Ok(format!(
            "Hello {user_name}, I'm {}, your AI companion. This feature is coming soon!",
            companion.name
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nexus_db::entities::user::{self, UserRole};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_companion(user_id: i64, name: &str) -> companion::Model {
        companion::Model {
            id: 1,
            user_id,
            name: name.to_string(),
            avatar_type: "default".to_string(),
            voice_mode: VoiceMode::Guide,
            personality_config: None,
            onboarding_progress: None,
            preferences: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_user(id: i64, name: Option<&str>) -> user::Model {
        user::Model {
            id,
            open_id: format!("open-{id}"),
            name: name.map(ToString::to_string),
            email: None,
            login_method: None,
            role: UserRole::User,
            bio: None,
            avatar_url: None,
            preferences: None,
            session_token: None,
            last_signed_in: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_or_create_returns_existing() {
        let companion = create_test_companion(10, "NEX");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[companion]])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service =
            CompanionService::new(CompanionRepository::new(db), UserRepository::new(user_db));
        let result = service.get_or_create(10).await.unwrap();

        assert_eq!(result.name, "NEX");
    }

    #[tokio::test]
    async fn test_chat_greets_by_name() {
        let companion = create_test_companion(10, "NEX");
        let user = create_test_user(10, Some("Ada"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[companion]])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let service =
            CompanionService::new(CompanionRepository::new(db), UserRepository::new(user_db));
        let reply = service
            .chat(
                10,
                ChatInput {
                    message: "hi".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(reply.starts_with("Hello Ada, I'm NEX"));
    }
}
