//! Rank table: per-rank display metadata, level and permission set.
//!
//! The standard table is a `static` built at compile time and never mutated.
//! Custom tables go through [`RankTable::from_configs`], which rejects tables
//! whose levels tie or whose permission sets are not cumulative.

use cc_common::Rank;
use serde::Serialize;
use thiserror::Error;

use super::flags::StaffPermissions;

/// Immutable configuration for one rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankConfig {
    pub rank: Rank,
    /// Display name.
    pub name: &'static str,
    /// Colour classes used by the dashboard.
    pub color: &'static str,
    /// Badge glyph.
    pub badge: &'static str,
    /// Ordering level; only ever compared, never used in arithmetic.
    pub level: u8,
    pub permissions: StaffPermissions,
}

/// Integrity errors for a rank table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankTableError {
    /// Entry at `index` describes the wrong rank.
    #[error("Rank table slot {index} holds {found}, expected {expected}")]
    Misplaced {
        index: usize,
        expected: Rank,
        found: Rank,
    },

    /// Two ranks share a level.
    #[error("Ranks {first} and {second} share level {level}")]
    DuplicateLevel { first: Rank, second: Rank, level: u8 },

    /// A higher rank lacks permissions held by a lower rank.
    #[error("Rank {higher} is missing {missing:?} held by lower rank {lower}")]
    NotCumulative {
        higher: Rank,
        lower: Rank,
        missing: StaffPermissions,
    },
}

/// Lookup table from [`Rank`] to [`RankConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    configs: [RankConfig; Rank::COUNT],
}

static STANDARD: RankTable = RankTable {
    configs: [
        RankConfig {
            rank: Rank::Pending,
            name: "Beklemede",
            color: "text-gray-500 border-gray-500/30",
            badge: "⏳",
            level: 0,
            permissions: StaffPermissions::PENDING_DEFAULT,
        },
        RankConfig {
            rank: Rank::Guide,
            name: "Rehber",
            color: "text-emerald-400 border-emerald-500/30",
            badge: "🌟",
            level: 1,
            permissions: StaffPermissions::GUIDE_DEFAULT,
        },
        RankConfig {
            rank: Rank::Assistant,
            name: "Asistan",
            color: "text-cyan-400 border-cyan-500/30",
            badge: "💎",
            level: 2,
            permissions: StaffPermissions::ASSISTANT_DEFAULT,
        },
        RankConfig {
            rank: Rank::Moderator,
            name: "Moderatör",
            color: "text-blue-400 border-blue-500/30",
            badge: "🛡️",
            level: 3,
            permissions: StaffPermissions::MODERATOR_DEFAULT,
        },
        RankConfig {
            rank: Rank::Admin,
            name: "Admin",
            color: "text-red-400 border-red-500/30",
            badge: "⚡",
            level: 4,
            permissions: StaffPermissions::ADMIN_DEFAULT,
        },
        RankConfig {
            rank: Rank::Developer,
            name: "Geliştirici",
            color: "text-purple-400 border-purple-500/30",
            badge: "💻",
            level: 5,
            permissions: StaffPermissions::DEVELOPER_DEFAULT,
        },
        RankConfig {
            rank: Rank::Founder,
            name: "Kurucu",
            color: "text-yellow-400 border-yellow-500/30",
            badge: "👑",
            level: 6,
            permissions: StaffPermissions::FOUNDER_DEFAULT,
        },
    ],
};

impl RankTable {
    /// The process-wide table used by the free query functions.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Build a table from one config per rank, in enumeration order.
    pub fn from_configs(configs: [RankConfig; Rank::COUNT]) -> Result<Self, RankTableError> {
        for (index, (config, expected)) in configs.iter().zip(Rank::all()).enumerate() {
            if config.rank != *expected {
                return Err(RankTableError::Misplaced {
                    index,
                    expected: *expected,
                    found: config.rank,
                });
            }
        }

        let table = Self { configs };
        table.validate()?;
        Ok(table)
    }

    #[cfg(test)]
    pub(super) fn from_configs_unchecked(configs: [RankConfig; Rank::COUNT]) -> Self {
        Self { configs }
    }

    /// Check that levels are unique and permission sets are cumulative.
    pub fn validate(&self) -> Result<(), RankTableError> {
        for (i, a) in self.configs.iter().enumerate() {
            for b in &self.configs[i + 1..] {
                if a.level == b.level {
                    return Err(RankTableError::DuplicateLevel {
                        first: a.rank,
                        second: b.rank,
                        level: a.level,
                    });
                }

                let (higher, lower) = if a.level > b.level { (a, b) } else { (b, a) };
                let missing = lower.permissions.difference(higher.permissions);
                if !missing.is_empty() {
                    return Err(RankTableError::NotCumulative {
                        higher: higher.rank,
                        lower: lower.rank,
                        missing,
                    });
                }
            }
        }
        Ok(())
    }

    /// Configuration for a rank. Total over the enumeration.
    #[must_use]
    pub const fn config(&self, rank: Rank) -> &RankConfig {
        &self.configs[rank.index()]
    }

    #[must_use]
    pub const fn level(&self, rank: Rank) -> u8 {
        self.config(rank).level
    }

    #[must_use]
    pub const fn permissions(&self, rank: Rank) -> StaffPermissions {
        self.config(rank).permissions
    }

    /// All configs, ordered from lowest to highest level.
    pub fn by_level(&self) -> Vec<&RankConfig> {
        let mut configs: Vec<&RankConfig> = self.configs.iter().collect();
        configs.sort_by_key(|c| c.level);
        configs
    }
}
