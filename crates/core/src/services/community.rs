//! Community service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::community::{self, CommunityType, CommunityVisibility};
use nexus_db::entities::community_member::{self, MemberRole};
use nexus_db::repositories::CommunityRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Default page size when browsing communities.
const DEFAULT_BROWSE_LIMIT: u64 = 50;

/// Input for creating a community.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    pub visibility: Option<CommunityVisibility>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// Service for communities and memberships.
#[derive(Clone)]
pub struct CommunityService {
    community_repo: CommunityRepository,
}

impl CommunityService {
    /// Create a new community service.
    #[must_use]
    pub const fn new(community_repo: CommunityRepository) -> Self {
        Self { community_repo }
    }

    /// Get a community by ID.
    pub async fn get_by_id(&self, id: i64) -> AppResult<community::Model> {
        self.community_repo.get_by_id(id).await
    }

    /// List public communities, most members first.
    pub async fn list_public(&self, limit: Option<u64>) -> AppResult<Vec<community::Model>> {
        self.community_repo
            .find_public(limit.unwrap_or(DEFAULT_BROWSE_LIMIT), 0)
            .await
    }

    /// List the communities a user belongs to, most recently joined first.
    pub async fn list_joined(
        &self,
        user_id: i64,
    ) -> AppResult<Vec<(community::Model, community_member::Model)>> {
        self.community_repo.find_joined_with_role(user_id).await
    }

    /// Create a community. The creator becomes the owner member.
    pub async fn create(
        &self,
        creator_id: i64,
        input: CreateCommunityInput,
    ) -> AppResult<community::Model> {
        input.validate()?;

        let model = community::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            community_type: Set(input.community_type),
            visibility: Set(input.visibility.unwrap_or_default()),
            creator_id: Set(creator_id),
            avatar_url: Set(input.avatar_url),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.community_repo.create_with_owner(model).await
    }

    /// Join a community as a regular member.
    pub async fn join(
        &self,
        community_id: i64,
        user_id: i64,
    ) -> AppResult<community_member::Model> {
        let community = self.community_repo.get_by_id(community_id).await?;

        if self.community_repo.is_member(community_id, user_id).await? {
            return Err(AppError::Conflict(
                "Already a member of this community".to_string(),
            ));
        }

        let model = community_member::ActiveModel {
            community_id: Set(community.id),
            user_id: Set(user_id),
            role: Set(MemberRole::Member),
            joined_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.community_repo.add_member(model).await
    }

    /// Leave a community. The owner cannot leave their own community.
    pub async fn leave(&self, community_id: i64, user_id: i64) -> AppResult<()> {
        let member = self
            .community_repo
            .get_member(community_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not a member of this community".to_string()))?;

        if member.role.is_owner() {
            return Err(AppError::BadRequest(
                "The owner cannot leave their community".to_string(),
            ));
        }

        self.community_repo.remove_member(community_id, user_id).await
    }

    /// Get a user's membership in a community, if any.
    pub async fn get_member(
        &self,
        community_id: i64,
        user_id: i64,
    ) -> AppResult<Option<community_member::Model>> {
        self.community_repo.get_member(community_id, user_id).await
    }

    /// Require that a user can moderate a community.
    pub async fn require_moderator(&self, community_id: i64, user_id: i64) -> AppResult<()> {
        let member = self
            .community_repo
            .get_member(community_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this community".to_string()))?;

        if !member.role.can_moderate() {
            return Err(AppError::Forbidden(
                "Moderator role required".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_member(
        community_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> community_member::Model {
        community_member::Model {
            id: 1,
            community_id,
            user_id,
            role,
            joined_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_leave_rejects_owner() {
        let member = create_test_member(5, 10, MemberRole::Owner);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[member]])
                .into_connection(),
        );

        let service = CommunityService::new(CommunityRepository::new(db));
        let result = service.leave(5, 10).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_leave_requires_membership() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<community_member::Model>::new()])
                .into_connection(),
        );

        let service = CommunityService::new(CommunityRepository::new(db));
        let result = service.leave(5, 10).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_require_moderator_rejects_member() {
        let member = create_test_member(5, 10, MemberRole::Member);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[member]])
                .into_connection(),
        );

        let service = CommunityService::new(CommunityRepository::new(db));
        let result = service.require_moderator(5, 10).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_require_moderator_allows_owner() {
        let member = create_test_member(5, 10, MemberRole::Owner);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[member]])
                .into_connection(),
        );

        let service = CommunityService::new(CommunityRepository::new(db));
        assert!(service.require_moderator(5, 10).await.is_ok());
    }
}
