pub mod moderation_service;
pub mod text_filter;

pub use moderation_service::ModerationService;
