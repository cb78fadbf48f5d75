//! Connection repository.

use std::sync::Arc;

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::connection::ConnectionStatus;
use crate::entities::{Connection, connection};

/// Repository for user-to-user connections.
#[derive(Clone)]
pub struct ConnectionRepository {
    db: Arc<DatabaseConnection>,
}

impl ConnectionRepository {
    /// Create a new connection repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a connection by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<connection::Model>> {
        Connection::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a connection by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<connection::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Connection not found: {id}")))
    }

    /// Find an existing connection between two users, in either direction.
    pub async fn find_between(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> AppResult<Option<connection::Model>> {
        Connection::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(connection::Column::RequesterId.eq(user_a))
                            .add(connection::Column::ReceiverId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(connection::Column::RequesterId.eq(user_b))
                            .add(connection::Column::ReceiverId.eq(user_a)),
                    ),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find accepted connections involving a user, most recently updated first.
    pub async fn find_accepted_for_user(&self, user_id: i64) -> AppResult<Vec<connection::Model>> {
        Connection::find()
            .filter(
                Condition::any()
                    .add(connection::Column::RequesterId.eq(user_id))
                    .add(connection::Column::ReceiverId.eq(user_id)),
            )
            .filter(connection::Column::Status.eq(ConnectionStatus::Accepted))
            .order_by(connection::Column::UpdatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find pending requests received by a user, newest first.
    pub async fn find_pending_for_user(&self, user_id: i64) -> AppResult<Vec<connection::Model>> {
        Connection::find()
            .filter(connection::Column::ReceiverId.eq(user_id))
            .filter(connection::Column::Status.eq(ConnectionStatus::Pending))
            .order_by(connection::Column::CreatedAt, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new connection request.
    pub async fn create(&self, model: connection::ActiveModel) -> AppResult<connection::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update the status of a connection, touching the update timestamp.
    pub async fn update_status(
        &self,
        id: i64,
        status: ConnectionStatus,
    ) -> AppResult<connection::Model> {
        let conn = self.get_by_id(id).await?;
        let mut active: connection::ActiveModel = conn.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_connection(
        id: i64,
        requester_id: i64,
        receiver_id: i64,
        status: ConnectionStatus,
    ) -> connection::Model {
        connection::Model {
            id,
            requester_id,
            receiver_id,
            status,
            compatibility_score: None,
            shared_interests: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_between_found() {
        let conn = create_test_connection(1, 10, 11, ConnectionStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[conn]])
                .into_connection(),
        );

        let repo = ConnectionRepository::new(db);
        let result = repo.find_between(10, 11).await.unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_find_accepted_for_user() {
        let c1 = create_test_connection(1, 10, 11, ConnectionStatus::Accepted);
        let c2 = create_test_connection(2, 12, 10, ConnectionStatus::Accepted);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = ConnectionRepository::new(db);
        let result = repo.find_accepted_for_user(10).await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
