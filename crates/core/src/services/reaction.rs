//! Reaction service.

use nexus_common::{AppError, AppResult};
use nexus_db::entities::reaction::{self, ReactionTarget};
use nexus_db::repositories::{PostRepository, ReactionRepository, ThreadRepository};
use serde::Deserialize;
use validator::Validate;

/// Input for toggling a reaction.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionInput {
    pub target_type: ReactionTarget,
    pub target_id: i64,
    #[validate(length(min = 1, max = 50))]
    pub reaction_type: String,
}

/// Outcome of a reaction toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The reaction was added.
    Added,
    /// The reaction existed and was removed.
    Removed,
}

impl ToggleOutcome {
    /// Wire label for the outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// Service for reactions across posts, threads, and replies.
#[derive(Clone)]
pub struct ReactionService {
    reaction_repo: ReactionRepository,
    post_repo: PostRepository,
    thread_repo: ThreadRepository,
}

impl ReactionService {
    /// Create a new reaction service.
    #[must_use]
    pub const fn new(
        reaction_repo: ReactionRepository,
        post_repo: PostRepository,
        thread_repo: ThreadRepository,
    ) -> Self {
        Self {
            reaction_repo,
            post_repo,
            thread_repo,
        }
    }

    /// Toggle a reaction on a target.
    ///
    /// A second identical reaction removes the first. Only reply targets
    /// carry a denormalized reaction count; it moves with the toggle in
    /// both directions inside the same transaction.
    pub async fn toggle(
        &self,
        user_id: i64,
        input: ToggleReactionInput,
    ) -> AppResult<ToggleOutcome> {
        input.validate()?;

        self.ensure_target_exists(input.target_type, input.target_id)
            .await?;

        let added = self
            .reaction_repo
            .toggle(
                user_id,
                input.target_type,
                input.target_id,
                &input.reaction_type,
            )
            .await?;

        if added {
            Ok(ToggleOutcome::Added)
        } else {
            Ok(ToggleOutcome::Removed)
        }
    }

    /// List reactions on a target.
    pub async fn list_by_target(
        &self,
        target_type: ReactionTarget,
        target_id: i64,
    ) -> AppResult<Vec<reaction::Model>> {
        self.reaction_repo.find_by_target(target_type, target_id).await
    }

    async fn ensure_target_exists(
        &self,
        target_type: ReactionTarget,
        target_id: i64,
    ) -> AppResult<()> {
        match target_type {
            ReactionTarget::Post => {
                self.post_repo.get_by_id(target_id).await?;
            }
            ReactionTarget::Thread => {
                self.thread_repo.get_by_id(target_id).await?;
            }
            ReactionTarget::Reply => {
                self.thread_repo.get_reply_by_id(target_id).await?;
            }
        }
        Ok(())
    }

}
