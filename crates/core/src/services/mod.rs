//! Business logic services.

pub mod admin;
pub mod push_notification;
pub mod suggestion;

pub use admin::{AdminResponse, AdminService, CreateAdminInput, LoginInput};
pub use push_notification::{
    PushConfigResponse, PushNotificationService, PushSubscriptionResponse, SubscribeInput,
};
pub use suggestion::{
    AnswerSuggestionInput, CreateSuggestionInput, SuggestionService, UpdateSuggestionInput,
};
