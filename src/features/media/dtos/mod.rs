mod media_dto;

pub use media_dto::{
    ProcessMediaForm, DEFAULT_MEDIA_KIND, NO_FILE_MESSAGE, UNSUPPORTED_KIND_MESSAGE,
};
