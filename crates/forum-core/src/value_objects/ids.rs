//! Typed identifiers
//!
//! Every entity is keyed by a UUID. Each kind of id gets its own newtype so a
//! reply id can never be passed where a thread id is expected.
//!
//! Freshly minted ids are UUIDv7: time-ordered, and strictly increasing within
//! one process. Reply path segments inherit that ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error when parsing an id from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a new time-ordered id
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID
            #[inline]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Get the inner UUID
            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Discussion thread id
    ThreadId
);
uuid_id!(
    /// Reply id; also the source of the reply's own path segment
    ReplyId
);
uuid_id!(
    /// Actor / user id, issued by the external identity system
    UserId
);
uuid_id!(
    /// Topic category id
    TopicId
);
uuid_id!(
    /// User ban record id
    BanId
);
uuid_id!(
    /// Moderation log entry id
    ActionId
);
uuid_id!(
    /// Content flag id
    FlagId
);
