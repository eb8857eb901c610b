//! The closed set of API routes.

use std::{fmt, str::FromStr};

use thiserror::Error;

macro_rules! routes {
    ($($(#[$meta:meta])* $variant:ident => $name:literal),+ $(,)?) => {
        /// The safe-for-work action routes served by the API.
        ///
        /// The set is closed: every variant maps to exactly one `sfw/<name>`
        /// path segment.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Route {
            $($(#[$meta])* $variant,)+
        }

        impl Route {
            /// Every route, in alphabetical order.
            pub const ALL: &'static [Route] = &[$(Route::$variant,)+];

            /// Returns the bare route name, e.g. `hug`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Route::$variant => $name,)+
                }
            }

            /// Returns the endpoint path segment, e.g. `sfw/hug`.
            pub fn path(self) -> &'static str {
                match self {
                    $(Route::$variant => concat!("sfw/", $name),)+
                }
            }
        }
    };
}

routes! {
    /// Someone gets bitten.
    Bite => "bite",
    /// A dare prompt.
    Dare => "dare",
    /// Head pats.
    Headpat => "headpat",
    /// High five.
    Highfive => "highfive",
    /// A hug.
    Hug => "hug",
    /// Husbando picture.
    Husbando => "husbando",
    /// Catgirl picture.
    Neko => "neko",
    /// A poke.
    Poke => "poke",
    /// Running away.
    Run => "run",
    /// A slap.
    Slap => "slap",
    /// A smile.
    Smile => "smile",
    /// A truth question.
    Truth => "truth",
    /// Waifu picture.
    Waifu => "waifu",
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route {0:?}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Accepts the bare name (`hug`) or the full path (`sfw/hug`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix("sfw/").unwrap_or(&lower);
        Route::ALL
            .iter()
            .copied()
            .find(|route| route.name() == name)
            .ok_or_else(|| UnknownRoute(s.to_owned()))
    }
}
