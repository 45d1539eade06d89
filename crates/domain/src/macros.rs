//! Macro for implementing Display and FromStr for label enums
//!
//! Document-store enums (post status, media type, event type) are persisted
//! as display labels such as `"In Review"`. The macro keeps `Display` and
//! `FromStr` in sync with those labels and accepts any ASCII casing when
//! parsing, because older documents were written by hand.
//!
//! # Example
//!
//! ```rust
//! use postdeck_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     FollowersOnly,
//! }
//!
//! impl_domain_label_conversions!(Visibility {
//!     Public => "Public",
//!     FollowersOnly => "Followers Only",
//! });
//!
//! assert_eq!(Visibility::FollowersOnly.to_string(), "Followers Only");
//! assert_eq!("followers only".parse::<Visibility>(), Ok(Visibility::FollowersOnly));
//! ```

/// Implements `Display`, `FromStr` and an `as_str` accessor for label enums.
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $label` - Mapping of enum variants to their stored labels
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Label as persisted in the document store.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
