//! Community widget service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::{community_template, community_widget};
use nexus_db::repositories::{CommunityRepository, CommunityWidgetRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for adding a widget to a community.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityWidgetInput {
    pub community_id: i64,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub widget_type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub content: Option<String>,
    pub position: Option<i32>,
}

/// Input for updating a community widget.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommunityWidgetInput {
    pub widget_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub content: Option<String>,
    pub position: Option<i32>,
    pub is_visible: Option<bool>,
}

/// Service for community widgets and layout templates.
#[derive(Clone)]
pub struct CommunityWidgetService {
    widget_repo: CommunityWidgetRepository,
    community_repo: CommunityRepository,
}

impl CommunityWidgetService {
    /// Create a new community widget service.
    #[must_use]
    pub const fn new(
        widget_repo: CommunityWidgetRepository,
        community_repo: CommunityRepository,
    ) -> Self {
        Self {
            widget_repo,
            community_repo,
        }
    }

    /// List visible widgets in a community, ordered by position.
    pub async fn list_visible(&self, community_id: i64) -> AppResult<Vec<community_widget::Model>> {
        self.widget_repo.find_visible_by_community(community_id).await
    }

    /// Add a widget to a community. Moderator role required.
    pub async fn create(
        &self,
        user_id: i64,
        input: CreateCommunityWidgetInput,
    ) -> AppResult<community_widget::Model> {
        input.validate()?;
        self.require_moderator(input.community_id, user_id).await?;

        let model = community_widget::ActiveModel {
            community_id: Set(input.community_id),
            widget_type: Set(input.widget_type),
            title: Set(input.title),
            content: Set(input.content),
            position: Set(input.position.unwrap_or(0)),
            is_visible: Set(true),
            created_by: Set(user_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.widget_repo.create(model).await
    }

    /// Update a community widget. Moderator role required.
    pub async fn update(
        &self,
        user_id: i64,
        input: UpdateCommunityWidgetInput,
    ) -> AppResult<community_widget::Model> {
        input.validate()?;

        let widget = self.widget_repo.get_by_id(input.widget_id).await?;
        self.require_moderator(widget.community_id, user_id).await?;

        let mut active: community_widget::ActiveModel = widget.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(content) = input.content {
            active.content = Set(Some(content));
        }
        if let Some(position) = input.position {
            active.position = Set(position);
        }
        if let Some(is_visible) = input.is_visible {
            active.is_visible = Set(is_visible);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.widget_repo.update(active).await
    }

    /// Remove a community widget. Moderator role required.
    pub async fn delete(&self, user_id: i64, widget_id: i64) -> AppResult<()> {
        let widget = self.widget_repo.get_by_id(widget_id).await?;
        self.require_moderator(widget.community_id, user_id).await?;
        self.widget_repo.delete(widget_id).await
    }

    /// List public community templates.
    pub async fn list_templates(&self) -> AppResult<Vec<community_template::Model>> {
        self.widget_repo.find_public_templates().await
    }

    async fn require_moderator(&self, community_id: i64, user_id: i64) -> AppResult<()> {
        let member = self
            .community_repo
            .get_member(community_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this community".to_string()))?;

        if !member.role.can_moderate() {
            return Err(AppError::Forbidden("Moderator role required".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nexus_db::entities::community_member::{self, MemberRole};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_member(role: MemberRole) -> community_member::Model {
        community_member::Model {
            id: 1,
            community_id: 5,
            user_id: 10,
            role,
            joined_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_plain_member() {
        let widget_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let community_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_member(MemberRole::Member)]])
                .into_connection(),
        );

        let service = CommunityWidgetService::new(
            CommunityWidgetRepository::new(widget_db),
            CommunityRepository::new(community_db),
        );

        let result = service
            .create(
                10,
                CreateCommunityWidgetInput {
                    community_id: 5,
                    widget_type: "announcements".to_string(),
                    title: "Announcements".to_string(),
                    content: None,
                    position: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_member() {
        let widget_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let community_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<community_member::Model>::new()])
                .into_connection(),
        );

        let service = CommunityWidgetService::new(
            CommunityWidgetRepository::new(widget_db),
            CommunityRepository::new(community_db),
        );

        let result = service
            .create(
                10,
                CreateCommunityWidgetInput {
                    community_id: 5,
                    widget_type: "announcements".to_string(),
                    title: "Announcements".to_string(),
                    content: None,
                    position: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
