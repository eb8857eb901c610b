use serde::{Deserialize, Serialize};

/// Environment variable read by [`ClientConfig::from_env`] for the output format.
pub const OUTPUT_FORMAT_ENV: &str = "ZENITH_OMEN_OUTPUT_FORMAT";

/// Environment variable read by [`ClientConfig::from_env`] for the API version.
pub const API_VERSION_ENV: &str = "ZENITH_OMEN_API_VERSION";

/// Environment variable read by [`ClientBuilder::from_env`] for the base URL.
///
/// [`ClientBuilder::from_env`]: crate::client::ClientBuilder::from_env
pub const BASE_URL_ENV: &str = "ZENITH_OMEN_BASE_URL";

macro_rules! opaque_str {
    ($(#[$meta:meta])* $name:ident { $($(#[$cmeta:meta])* $konst:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(::std::borrow::Cow<'static, str>);

        impl $name {
            $(
                $(#[$cmeta])*
                pub const $konst: $name = $name(::std::borrow::Cow::Borrowed($value));
            )+

            /// Returns the value exactly as it was given.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(::std::borrow::Cow::Owned(value.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(::std::borrow::Cow::Owned(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

pub(crate) use opaque_str;

opaque_str! {
    /// Wire encoding requested from the API.
    ///
    /// Values other than the provided constants are kept verbatim and
    /// forwarded; the API decides whether to reject them.
    OutputFormat {
        /// `json`
        JSON = "json",
        /// `xml`
        XML = "xml",
    }
}

opaque_str! {
    /// Version segment of the API path.
    ApiVersion {
        /// `v1`
        V1 = "v1",
    }
}

impl OutputFormat {
    /// Returns true if this is JSON, ignoring case.
    pub fn is_json(&self) -> bool {
        self.0.eq_ignore_ascii_case("json")
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::JSON
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        ApiVersion::V1
    }
}

/// Settings fixed at client construction.
///
/// A [`Client`] never changes its configuration after it is built.
///
/// [`Client`]: crate::Client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Wire encoding requested for every call. Defaults to [`OutputFormat::JSON`].
    pub output_format: OutputFormat,

    /// API version used in every request path. Defaults to [`ApiVersion::V1`].
    #[serde(alias = "defaultVersion")]
    pub api_version: ApiVersion,
}

impl ClientConfig {
    /// Creates a configuration from explicit values.
    pub fn new(output_format: impl Into<OutputFormat>, api_version: impl Into<ApiVersion>) -> Self {
        ClientConfig {
            output_format: output_format.into(),
            api_version: api_version.into(),
        }
    }

    /// Reads [`OUTPUT_FORMAT_ENV`] and [`API_VERSION_ENV`].
    ///
    /// Unset or non-unicode variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();
        if let Some(format) = lookup(OUTPUT_FORMAT_ENV) {
            config.output_format = format.into();
        }
        if let Some(version) = lookup(API_VERSION_ENV) {
            config.api_version = version.into();
        }
        config
    }

    /// Sets the output format.
    #[must_use]
    pub fn output_format(mut self, format: impl Into<OutputFormat>) -> Self {
        self.output_format = format.into();
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<ApiVersion>) -> Self {
        self.api_version = version.into();
        self
    }
}
