//! Database repositories.

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

pub use community::CommunityRepository;
pub use community_widget::CommunityWidgetRepository;
pub use companion::CompanionRepository;
pub use connection::ConnectionRepository;
pub use event::EventRepository;
pub use feature_flag::FeatureFlagRepository;
pub use page::PageRepository;
pub use post::PostRepository;
pub use reaction::ReactionRepository;
pub use thread::ThreadRepository;
pub use user::UserRepository;
