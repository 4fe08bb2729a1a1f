//! Integer identifiers assigned by the store.
//!
//! Users, categories and events live in separate key spaces. Each gets its
//! own newtype so an event id can never be passed where a category id is
//! expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw integer value as stored remotely.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                raw.trim().parse::<i64>().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a [`User`](super::User).
    UserId
}

define_id! {
    /// Identifier of a [`Category`](super::Category).
    CategoryId
}

define_id! {
    /// Identifier of an [`Event`](super::Event).
    EventId
}
