//! Thread listing order

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing order for threads. Pinned threads always come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadSort {
    /// Most recent activity first
    #[default]
    Recent,
    /// Most viewed first
    Popular,
    /// Most replies first
    MostReplies,
}

impl ThreadSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Popular => "popular",
            Self::MostReplies => "most-replies",
        }
    }
}

impl fmt::Display for ThreadSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThreadSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "popular" => Ok(Self::Popular),
            "most-replies" | "most_replies" | "replies" => Ok(Self::MostReplies),
            other => Err(format!(
                "unknown sort '{other}', expected one of recent, popular, most-replies"
            )),
        }
    }
}
