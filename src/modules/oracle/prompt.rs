/// Base64 image attached to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Wrap an already-encoded base64 string (or a full `data:` URL).
    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Inline reference in the form the provider accepts.
    pub fn data_url(&self) -> String {
        if self.0.starts_with("data:") {
            self.0.clone()
        } else {
            format!("data:image/jpeg;base64,{}", self.0)
        }
    }
}

/// One request to the oracle: optional persona, user text, optional image.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
    pub image: Option<ImagePayload>,
    /// Ask the provider to constrain the answer to a JSON object
    pub structured: bool,
}

impl Prompt {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            user: text.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn structured(mut self) -> Self {
        self.structured = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefixes_raw_base64() {
        let image = ImagePayload::from_base64("aGVsbG8=");
        assert_eq!(image.data_url(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_data_url_keeps_existing_data_url() {
        let image = ImagePayload::from_base64("data:image/png;base64,aGVsbG8=");
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_prompt_builder() {
        let prompt = Prompt::user("Describe this image briefly.")
            .with_system("You are an image verifier.")
            .with_image(ImagePayload::from_base64("abc"))
            .structured();

        assert_eq!(prompt.user, "Describe this image briefly.");
        assert_eq!(prompt.system.as_deref(), Some("You are an image verifier."));
        assert!(prompt.image.is_some());
        assert!(prompt.structured);
    }
}
