//! Database entities.

pub mod community;
pub mod community_member;
pub mod community_template;
pub mod community_widget;
pub mod companion;
pub mod connection;
pub mod event;
pub mod event_rsvp;
pub mod feature_flag;
pub mod page;
pub mod post;
pub mod reaction;
pub mod thread;
pub mod thread_reply;
pub mod user;
pub mod widget;

pub use community::Entity as Community;
pub use community_member::Entity as CommunityMember;
pub use community_template::Entity as CommunityTemplate;
pub use community_widget::Entity as CommunityWidget;
pub use companion::Entity as Companion;
pub use connection::Entity as Connection;
pub use event::Entity as Event;
pub use event_rsvp::Entity as EventRsvp;
pub use feature_flag::Entity as FeatureFlag;
pub use page::Entity as Page;
pub use post::Entity as Post;
pub use reaction::Entity as Reaction;
pub use thread::Entity as Thread;
pub use thread_reply::Entity as ThreadReply;
pub use user::Entity as User;
pub use widget::Entity as Widget;
