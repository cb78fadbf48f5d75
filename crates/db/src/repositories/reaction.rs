//! Reaction repository.

use std::sync::Arc;

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::entities::reaction::ReactionTarget;
use crate::entities::{Reaction, ThreadReply, reaction, thread_reply};

/// Repository for reactions on posts, threads, and replies.
#[derive(Clone)]
pub struct ReactionRepository {
    db: Arc<DatabaseConnection>,
}

impl ReactionRepository {
    /// Create a new reaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List all reactions on a target.
    pub async fn find_by_target(
        &self,
        target_type: ReactionTarget,
        target_id: i64,
    ) -> AppResult<Vec<reaction::Model>> {
        Reaction::find()
            .filter(reaction::Column::TargetType.eq(target_type))
            .filter(reaction::Column::TargetId.eq(target_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Toggle a reaction in one transaction, returning whether it was added.
    ///
    /// Presence deletes the row, absence inserts it. Reply targets move the
    /// reply's denormalized reaction count together with the toggle.
    pub async fn toggle(
        &self,
        user_id: i64,
        target_type: ReactionTarget,
        target_id: i64,
        reaction_type: &str,
    ) -> AppResult<bool> {
        use sea_orm::sea_query::Expr;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let existing = Reaction::find()
            .filter(reaction::Column::UserId.eq(user_id))
            .filter(reaction::Column::TargetType.eq(target_type))
            .filter(reaction::Column::TargetId.eq(target_id))
            .filter(reaction::Column::ReactionType.eq(reaction_type))
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let added = match existing {
            Some(reaction) => {
                reaction
                    .delete(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                false
            }
            None => {
                reaction::ActiveModel {
                    user_id: Set(user_id),
                    target_type: Set(target_type),
                    target_id: Set(target_id),
                    reaction_type: Set(reaction_type.to_string()),
                    created_at: Set(Utc::now().into()),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
                true
            }
        };

        if target_type == ReactionTarget::Reply {
            let count = if added {
                Expr::col(thread_reply::Column::ReactionCount).add(1)
            } else {
                Expr::cust("GREATEST(reaction_count - 1, 0)")
            };
            ThreadReply::update_many()
                .col_expr(thread_reply::Column::ReactionCount, count)
                .filter(thread_reply::Column::Id.eq(target_id))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(added)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_reaction(
        id: i64,
        user_id: i64,
        target_type: ReactionTarget,
        target_id: i64,
        reaction_type: &str,
    ) -> reaction::Model {
        reaction::Model {
            id,
            user_id,
            target_type,
            target_id,
            reaction_type: reaction_type.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_target() {
        let r1 = create_test_reaction(1, 10, ReactionTarget::Thread, 3, "heart");
        let r2 = create_test_reaction(2, 11, ReactionTarget::Thread, 3, "fire");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = ReactionRepository::new(db);
        let result = repo.find_by_target(ReactionTarget::Thread, 3).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_adds_when_absent() {
        // Lookup misses, so the insert and the reply count bump both run.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reaction::Model>::new()])
                .append_query_results([[create_test_reaction(
                    1,
                    10,
                    ReactionTarget::Reply,
                    7,
                    "heart",
                )]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ReactionRepository::new(db);
        let added = repo
            .toggle(10, ReactionTarget::Reply, 7, "heart")
            .await
            .unwrap();

        assert!(added);
    }

    #[tokio::test]
    async fn test_toggle_removes_when_present() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_reaction(
                    1,
                    10,
                    ReactionTarget::Reply,
                    7,
                    "heart",
                )]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = ReactionRepository::new(db);
        let added = repo
            .toggle(10, ReactionTarget::Reply, 7, "heart")
            .await
            .unwrap();

        assert!(!added);
    }

    #[tokio::test]
    async fn test_toggle_thread_target_skips_count_update() {
        // Threads carry no denormalized reaction count, so only the delete
        // executes.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_reaction(
                    1,
                    10,
                    ReactionTarget::Thread,
                    3,
                    "fire",
                )]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ReactionRepository::new(db);
        let added = repo
            .toggle(10, ReactionTarget::Thread, 3, "fire")
            .await
            .unwrap();

        assert!(!added);
    }
}
