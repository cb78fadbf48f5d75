//! Feature flag service.

use chrono::Utc;
use nexus_common::{AppError, AppResult};
use nexus_db::entities::feature_flag::{self, TargetUserIds};
use nexus_db::repositories::FeatureFlagRepository;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a feature flag.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[validate(range(min = 0, max = 100))]
    #[serde(default)]
    pub rollout_percentage: i32,
    pub target_user_ids: Option<Vec<i64>>,
}

/// Input for updating a feature flag.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlagInput {
    pub flag_id: i64,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub enabled: Option<bool>,
    #[validate(range(min = 0, max = 100))]
    pub rollout_percentage: Option<i32>,
    pub target_user_ids: Option<Vec<i64>>,
}

/// Decide whether a flag is on for a user.
///
/// A disabled flag is off for everyone. When a target list is present it
/// overrides the percentage entirely. Otherwise users fall into stable
/// percentage buckets by ID, so a given user's answer never flips between
/// evaluations at the same rollout.
#[must_use]
pub fn evaluate(flag: &feature_flag::Model, user_id: i64) -> bool {
    if !flag.enabled {
        return false;
    }

    if let Some(targets) = &flag.target_user_ids {
        if !targets.is_empty() {
            return targets.contains(user_id);
        }
    }

    match flag.rollout_percentage {
        p if p >= 100 => true,
        p if p <= 0 => false,
        p => user_id.rem_euclid(100) < i64::from(p),
    }
}

/// Service for feature flags.
#[derive(Clone)]
pub struct FeatureFlagService {
    flag_repo: FeatureFlagRepository,
}

impl FeatureFlagService {
    /// Create a new feature flag service.
    #[must_use]
    pub const fn new(flag_repo: FeatureFlagRepository) -> Self {
        Self { flag_repo }
    }

    /// Check whether a named flag is on for a user. Unknown flags are off.
    pub async fn is_enabled(&self, name: &str, user_id: i64) -> AppResult<bool> {
        let flag = self.flag_repo.find_by_name(name).await?;
        Ok(flag.is_some_and(|f| evaluate(&f, user_id)))
    }

    /// List all flags.
    pub async fn list(&self) -> AppResult<Vec<feature_flag::Model>> {
        self.flag_repo.find_all().await
    }

    /// Create a flag. The name must be unique.
    pub async fn create(&self, input: CreateFlagInput) -> AppResult<feature_flag::Model> {
        input.validate()?;

        if self.flag_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Feature flag already exists: {}",
                input.name
            )));
        }

        let model = feature_flag::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            enabled: Set(input.enabled),
            rollout_percentage: Set(input.rollout_percentage),
            target_user_ids: Set(input.target_user_ids.map(TargetUserIds)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.flag_repo.create(model).await
    }

    /// Update a flag.
    pub async fn update(&self, input: UpdateFlagInput) -> AppResult<feature_flag::Model> {
        input.validate()?;

        let flag = self.flag_repo.get_by_id(input.flag_id).await?;
        let mut active: feature_flag::ActiveModel = flag.into();

        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(enabled) = input.enabled {
            active.enabled = Set(enabled);
        }
        if let Some(rollout_percentage) = input.rollout_percentage {
            active.rollout_percentage = Set(rollout_percentage);
        }
        if let Some(target_user_ids) = input.target_user_ids {
            active.target_user_ids = Set(Some(TargetUserIds(target_user_ids)));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.flag_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_flag(
        enabled: bool,
        rollout_percentage: i32,
        target_user_ids: Option<Vec<i64>>,
    ) -> feature_flag::Model {
        feature_flag::Model {
            id: 1,
            name: "new-feed".to_string(),
            description: None,
            enabled,
            rollout_percentage,
            target_user_ids: target_user_ids.map(TargetUserIds),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_evaluate_disabled_flag_is_off() {
        let flag = create_test_flag(false, 100, None);
        assert!(!evaluate(&flag, 1));
    }

    #[test]
    fn test_evaluate_full_rollout() {
        let flag = create_test_flag(true, 100, None);
        assert!(evaluate(&flag, 1));
        assert!(evaluate(&flag, 999));
    }

    #[test]
    fn test_evaluate_zero_rollout() {
        let flag = create_test_flag(true, 0, None);
        assert!(!evaluate(&flag, 1));
        assert!(!evaluate(&flag, 0));
    }

    #[test]
    fn test_evaluate_target_list_overrides_percentage() {
        let flag = create_test_flag(true, 0, Some(vec![7]));
        assert!(evaluate(&flag, 7));
        assert!(!evaluate(&flag, 8));
    }

    #[test]
    fn test_evaluate_empty_target_list_falls_back_to_percentage() {
        let flag = create_test_flag(true, 100, Some(vec![]));
        assert!(evaluate(&flag, 8));
    }

    #[test]
    fn test_evaluate_percentage_buckets_by_id() {
        let flag = create_test_flag(true, 50, None);
        assert!(evaluate(&flag, 149)); // 149 % 100 = 49
        assert!(!evaluate(&flag, 150)); // 150 % 100 = 50
    }

    #[test]
    fn test_evaluate_is_stable_per_user() {
        let flag = create_test_flag(true, 30, None);
        let first = evaluate(&flag, 42);
        for _ in 0..10 {
            assert_eq!(evaluate(&flag, 42), first);
        }
    }

    #[tokio::test]
    async fn test_is_enabled_unknown_flag_is_off() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<feature_flag::Model>::new()])
                .into_connection(),
        );

        let service = FeatureFlagService::new(FeatureFlagRepository::new(db));
        assert!(!service.is_enabled("missing", 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let existing = create_test_flag(true, 100, None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = FeatureFlagService::new(FeatureFlagRepository::new(db));
        let result = service
            .create(CreateFlagInput {
                name: "new-feed".to_string(),
                description: None,
                enabled: true,
                rollout_percentage: 100,
                target_user_ids: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
