//! Community repository.

use std::sync::Arc;

use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::entities::community_member::MemberRole;
use crate::entities::{Community, CommunityMember, community, community_member};

/// Repository for communities and their memberships.
#[derive(Clone)]
pub struct CommunityRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityRepository {
    /// Create a new community repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a community by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<community::Model>> {
        Community::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a community by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<community::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Community not found: {id}")))
    }

    /// Find public communities, most members first.
    pub async fn find_public(&self, limit: u64, offset: u64) -> AppResult<Vec<community::Model>> {
        Community::find()
            .filter(community::Column::Visibility.eq(community::CommunityVisibility::Public))
            .order_by(community::Column::MemberCount, Order::Desc)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a community and its owner membership in one transaction.
    pub async fn create_with_owner(
        &self,
        model: community::ActiveModel,
    ) -> AppResult<community::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let community = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let member = community_member::ActiveModel {
            community_id: Set(community.id),
            user_id: Set(community.creator_id),
            role: Set(MemberRole::Owner),
            joined_at: Set(community.created_at),
            ..Default::default()
        };
        member
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(community)
    }

    /// Update a community.
    pub async fn update(&self, model: community::ActiveModel) -> AppResult<community::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Member Operations ====================

    /// Get a membership record.
    pub async fn get_member(
        &self,
        community_id: i64,
        user_id: i64,
    ) -> AppResult<Option<community_member::Model>> {
        CommunityMember::find()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user belongs to a community.
    pub async fn is_member(&self, community_id: i64, user_id: i64) -> AppResult<bool> {
        Ok(self.get_member(community_id, user_id).await?.is_some())
    }

    /// Find the communities a user belongs to, most recently joined first.
    ///
    /// Returns each community paired with the membership record so callers
    /// can surface the member's role.
    pub async fn find_joined_with_role(
        &self,
        user_id: i64,
    ) -> AppResult<Vec<(community::Model, community_member::Model)>> {
        let memberships = CommunityMember::find()
            .filter(community_member::Column::UserId.eq(user_id))
            .order_by(community_member::Column::JoinedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if memberships.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = memberships.iter().map(|m| m.community_id).collect();
        let communities = Community::find()
            .filter(community::Column::Id.is_in(ids))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Preserve the membership order.
        let mut joined = Vec::with_capacity(memberships.len());
        for membership in memberships {
            if let Some(community) = communities
                .iter()
                .find(|c| c.id == membership.community_id)
            {
                joined.push((community.clone(), membership));
            }
        }

        Ok(joined)
    }

    /// Add a member and bump the member count in one transaction.
    pub async fn add_member(
        &self,
        model: community_member::ActiveModel,
    ) -> AppResult<community_member::Model> {
        use sea_orm::sea_query::Expr;

        let community_id = *model
            .community_id
            .try_as_ref()
            .ok_or_else(|| AppError::Internal("community_id not set".to_string()))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let member = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Community::update_many()
            .col_expr(
                community::Column::MemberCount,
                Expr::col(community::Column::MemberCount).add(1),
            )
            .filter(community::Column::Id.eq(community_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(member)
    }

    /// Remove a member and drop the member count in one transaction.
    ///
    /// The count never goes below zero even if it was already stale.
    pub async fn remove_member(&self, community_id: i64, user_id: i64) -> AppResult<()> {
        use sea_orm::sea_query::Expr;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = CommunityMember::delete_many()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected > 0 {
            Community::update_many()
                .col_expr(
                    community::Column::MemberCount,
                    Expr::cust("GREATEST(member_count - 1, 0)"),
                )
                .filter(community::Column::Id.eq(community_id))
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
    use crate::entities::community::{CommunityType, CommunityVisibility};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_community(id: i64, creator_id: i64, name: &str) -> community::Model {
        community::Model {
            id,
            name: name.to_string(),
            description: None,
            community_type: CommunityType::Interest,
            visibility: CommunityVisibility::Public,
            creator_id,
            avatar_url: None,
            member_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_member(
        id: i64,
        community_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> community_member::Model {
        community_member::Model {
            id,
            community_id,
            user_id,
            role,
            joined_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_public() {
        let c1 = create_test_community(1, 10, "Rust Circle");
        let c2 = create_test_community(2, 11, "Night Owls");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CommunityRepository::new(db);
        let result = repo.find_public(20, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_joined_with_role() {
        let m1 = create_test_member(1, 5, 10, MemberRole::Owner);
        let m2 = create_test_member(2, 6, 10, MemberRole::Member);
        let c1 = create_test_community(5, 10, "Mine");
        let c2 = create_test_community(6, 11, "Theirs");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1, m2]])
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CommunityRepository::new(db);
        let result = repo.find_joined_with_role(10).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0.id, 5);
        assert_eq!(result[0].1.role, MemberRole::Owner);
        assert_eq!(result[1].0.id, 6);
    }

    #[tokio::test]
    async fn test_find_joined_with_role_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<community_member::Model>::new()])
                .into_connection(),
        );

        let repo = CommunityRepository::new(db);
        let result = repo.find_joined_with_role(10).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_is_member_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<community_member::Model>::new()])
                .into_connection(),
        );

        let repo = CommunityRepository::new(db);
        assert!(!repo.is_member(5, 10).await.unwrap());
    }
}
