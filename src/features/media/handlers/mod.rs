pub mod media_handler;

pub use media_handler::{__path_process_media, process_media};
