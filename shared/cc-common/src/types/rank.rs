//! Staff Rank Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Staff rank assigned to a dashboard user.
///
/// Persisted records carry the community's own rank tokens (`beklemede`,
/// `rehber`, ...). The English names are accepted as aliases when decoding.
///
/// Relative privilege is not encoded here: ordering comparisons go through
/// the rank table, which owns each rank's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Registered but not yet approved by a founder.
    #[serde(rename = "beklemede", alias = "pending")]
    Pending,
    /// Entry-level staff.
    #[serde(rename = "rehber", alias = "guide")]
    Guide,
    /// Can kick players.
    #[serde(rename = "asistan", alias = "assistant")]
    Assistant,
    /// Can mute and ban players.
    #[serde(rename = "moderator")]
    Moderator,
    /// Manages users and announcements.
    #[serde(rename = "admin")]
    Admin,
    /// Admin panel and rule editing.
    #[serde(rename = "gelistirici", alias = "developer")]
    Developer,
    /// Owns the server; approves users and manages ranks.
    #[serde(rename = "kurucu", alias = "founder")]
    Founder,
}

impl Rank {
    /// Number of ranks in the enumeration.
    pub const COUNT: usize = 7;

    /// All ranks from least to most privileged.
    #[must_use]
    pub const fn all() -> &'static [Self; Self::COUNT] {
        &[
            Self::Pending,
            Self::Guide,
            Self::Assistant,
            Self::Moderator,
            Self::Admin,
            Self::Developer,
            Self::Founder,
        ]
    }

    /// Position of this rank inside [`Rank::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::Guide => 1,
            Self::Assistant => 2,
            Self::Moderator => 3,
            Self::Admin => 4,
            Self::Developer => 5,
            Self::Founder => 6,
        }
    }

    /// The token stored in user records.
    ///
    /// # Examples
    ///
    /// ```
    /// use cc_common::Rank;
    ///
    /// assert_eq!(Rank::Founder.as_str(), "kurucu");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "beklemede",
            Self::Guide => "rehber",
            Self::Assistant => "asistan",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::Developer => "gelistirici",
            Self::Founder => "kurucu",
        }
    }

    /// English name, accepted as an alias when parsing.
    #[must_use]
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Guide => "guide",
            Self::Assistant => "assistant",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::Developer => "developer",
            Self::Founder => "founder",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = Error;

    /// Parse a stored token or its English alias. Matching is exact.
    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|rank| rank.as_str() == s || rank.english_name() == s)
            .ok_or_else(|| Error::UnknownRank(s.to_string()))
    }
}
