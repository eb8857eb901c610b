//! Parameters accepted by every route method.

use crate::config::opaque_str;

opaque_str! {
    /// Content filter forwarded to the API. Not interpreted locally.
    OutputContent {
        /// Still pictures only.
        PICTURE = "picture",
        /// Animated gifs only.
        GIF = "gif",
    }
}

/// Per-call options of a route request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParameters {
    output_content: Option<OutputContent>,
}

impl CallParameters {
    /// Parameters with every option unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the returned content type.
    #[must_use]
    pub fn output_content(mut self, content: impl Into<OutputContent>) -> Self {
        self.output_content = Some(content.into());
        self
    }

    /// Returns the requested content filter, if any.
    pub fn content(&self) -> Option<&OutputContent> {
        self.output_content.as_ref()
    }

    /// Value sent as `outputContent`; empty when unset.
    pub(crate) fn content_param(&self) -> &str {
        self.output_content
            .as_ref()
            .map_or("", OutputContent::as_str)
    }
}

impl From<OutputContent> for CallParameters {
    fn from(content: OutputContent) -> Self {
        CallParameters {
            output_content: Some(content),
        }
    }
}

impl From<Option<OutputContent>> for CallParameters {
    fn from(output_content: Option<OutputContent>) -> Self {
        CallParameters { output_content }
    }
}
