pub mod chat;
pub mod media;
pub mod moderation;
