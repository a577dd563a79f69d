pub mod moderation_handler;

pub use moderation_handler::{__path_moderate_report, moderate_report};
