//! Connection service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::connection::{self, ConnectionStatus};
use nexus_db::repositories::ConnectionRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for requesting a connection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestConnectionInput {
    pub receiver_id: i64,
    #[validate(range(min = 0, max = 100))]
    pub compatibility_score: Option<i32>,
    pub shared_interests: Option<serde_json::Value>,
}

/// Input for responding to a connection request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondConnectionInput {
    pub connection_id: i64,
    pub accept: bool,
}

/// Service for user-to-user connections.
#[derive(Clone)]
pub struct ConnectionService {
    connection_repo: ConnectionRepository,
}

impl ConnectionService {
    /// Create a new connection service.
    #[must_use]
    pub const fn new(connection_repo: ConnectionRepository) -> Self {
        Self { connection_repo }
    }

    /// Request a connection to another user.
    pub async fn request(
        &self,
        requester_id: i64,
        input: RequestConnectionInput,
    ) -> AppResult<connection::Model> {
        input.validate()?;

        if requester_id == input.receiver_id {
            return Err(AppError::BadRequest(
                "Cannot connect to yourself".to_string(),
            ));
        }

        if self
            .connection_repo
            .find_between(requester_id, input.receiver_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A connection between these users already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let model = connection::ActiveModel {
            requester_id: Set(requester_id),
            receiver_id: Set(input.receiver_id),
            status: Set(ConnectionStatus::Pending),
            compatibility_score: Set(input.compatibility_score),
            shared_interests: Set(input.shared_interests),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        self.connection_repo.create(model).await
    }

    /// Accept or reject a pending request. Only the receiver may respond.
    pub async fn respond(
        &self,
        user_id: i64,
        input: RespondConnectionInput,
    ) -> AppResult<connection::Model> {
        let conn = self.connection_repo.get_by_id(input.connection_id).await?;

        if conn.receiver_id != user_id {
            return Err(AppError::Forbidden(
                "Only the receiver can respond to a request".to_string(),
            ));
        }
        if conn.status != ConnectionStatus::Pending {
            return Err(AppError::BadRequest(
                "This request has already been resolved".to_string(),
            ));
        }

        let status = if input.accept {
            ConnectionStatus::Accepted
        } else {
            ConnectionStatus::Rejected
        };

        self.connection_repo.update_status(conn.id, status).await
    }

    /// List a user's accepted connections, most recently updated first.
    pub async fn list_accepted(&self, user_id: i64) -> AppResult<Vec<connection::Model>> {
        self.connection_repo.find_accepted_for_user(user_id).await
    }

    /// List pending requests received by a user, newest first.
    pub async fn list_pending(&self, user_id: i64) -> AppResult<Vec<connection::Model>> {
        self.connection_repo.find_pending_for_user(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

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
    async fn test_request_rejects_self() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ConnectionService::new(ConnectionRepository::new(db));

        let result = service
            .request(
                10,
                RequestConnectionInput {
                    receiver_id: 10,
                    compatibility_score: None,
                    shared_interests: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_request_rejects_duplicate() {
        let existing = create_test_connection(1, 10, 11, ConnectionStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = ConnectionService::new(ConnectionRepository::new(db));
        let result = service
            .request(
                10,
                RequestConnectionInput {
                    receiver_id: 11,
                    compatibility_score: None,
                    shared_interests: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_respond_rejects_non_receiver() {
        let conn = create_test_connection(1, 10, 11, ConnectionStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[conn]])
                .into_connection(),
        );

        let service = ConnectionService::new(ConnectionRepository::new(db));
        let result = service
            .respond(
                10,
                RespondConnectionInput {
                    connection_id: 1,
                    accept: true,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_respond_rejects_resolved() {
        let conn = create_test_connection(1, 10, 11, ConnectionStatus::Accepted);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[conn]])
                .into_connection(),
        );

        let service = ConnectionService::new(ConnectionRepository::new(db));
        let result = service
            .respond(
                11,
                RespondConnectionInput {
                    connection_id: 1,
                    accept: false,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
