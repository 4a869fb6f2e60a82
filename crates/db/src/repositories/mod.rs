//! Repositories for database access.

mod admin;
mod push_subscription;
mod suggestion;

pub use admin::AdminRepository;
pub use push_subscription::PushSubscriptionRepository;
pub use suggestion::{SuggestionFilter, SuggestionRepository};
