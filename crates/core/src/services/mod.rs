//! Business logic services.

pub mod community;
pub mod community_widget;
pub mod companion;
pub mod connection;
pub mod event;
pub mod feature_flag;
pub mod page;
pub mod post;
pub mod reaction;
pub mod thread;
pub mod user;

pub use community::{CommunityService, CreateCommunityInput};
pub use community_widget::{
    CommunityWidgetService, CreateCommunityWidgetInput, UpdateCommunityWidgetInput,
};
pub use companion::{ChatInput, CompanionService, UpdateCompanionInput};
pub use connection::{ConnectionService, RequestConnectionInput, RespondConnectionInput};
pub use event::{CreateEventInput, EventService, RsvpInput};
pub use feature_flag::{CreateFlagInput, FeatureFlagService, UpdateFlagInput, evaluate};
pub use page::{
    CreatePageInput, CreateWidgetInput, PageService, UpdatePageInput, UpdateWidgetInput,
};
pub use post::{CreatePostInput, PostService};
pub use reaction::{ReactionService, ToggleOutcome, ToggleReactionInput};
pub use thread::{CreateReplyInput, CreateThreadInput, ThreadService, UpdateThreadInput};
pub use user::{SyncUserInput, UpdateProfileInput, UserService};
