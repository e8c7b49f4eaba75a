//! Subdivision levels and their expected sizes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::subdivide::MAX_SUBDIVISIONS;

/// Number of cells in a grid built at `level`: `10·4^level + 2`.
///
/// Pure formula, valid for any level; saturates instead of overflowing.
pub const fn expected_cell_count(level: u32) -> u64 {
    4u64.saturating_pow(level)
        .saturating_mul(10)
        .saturating_add(2)
}

/// A validated subdivision level in `0..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SubdivisionLevel(u8);

impl SubdivisionLevel {
    pub const MIN: SubdivisionLevel = SubdivisionLevel(0);
    pub const MAX: SubdivisionLevel = SubdivisionLevel(MAX_SUBDIVISIONS as u8);

    /// Validate a raw level.
    pub fn new(level: i64) -> Result<Self, GenerateError> {
        if (0..=i64::from(MAX_SUBDIVISIONS)).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(GenerateError::InvalidLevel { level })
        }
    }

    pub const fn get(self) -> u32 {
        self.0 as u32
    }

    pub const fn expected_cell_count(self) -> u64 {
        expected_cell_count(self.get())
    }

    /// Triangles in the subdivided mesh: `20·4^level`.
    pub const fn triangle_count(self) -> u64 {
        20 * 4u64.pow(self.get())
    }

    /// Human readable guidance for this level.
    pub const fn recommendation(self) -> &'static str {
        self.tier().recommendation()
    }

    pub const fn tier(self) -> LevelTier {
        match self.0 {
            0..=2 => LevelTier::Testing,
            3 => LevelTier::Low,
            4 => LevelTier::Medium,
            5 => LevelTier::High,
            6 => LevelTier::VeryHigh,
            7 => LevelTier::Extreme,
            8 => LevelTier::Insane,
            9 => LevelTier::Ludicrous,
            _ => LevelTier::Ridiculous,
        }
    }
}

impl TryFrom<u32> for SubdivisionLevel {
    type Error = GenerateError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(i64::from(level))
    }
}

impl From<SubdivisionLevel> for u32 {
    fn from(level: SubdivisionLevel) -> u32 {
        level.get()
    }
}

impl fmt::Display for SubdivisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Rough cost class of a subdivision level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelTier {
    Testing,
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
    Insane,
    Ludicrous,
    Ridiculous,
}

impl LevelTier {
    /// Human readable guidance for picking a level.
    pub const fn recommendation(self) -> &'static str {
        match self {
            LevelTier::Testing => "Very Low - testing and prototyping",
            LevelTier::Low => "Low - small asteroids",
            LevelTier::Medium => "Medium - small moons",
            LevelTier::High => "High - medium moons and small planets",
            LevelTier::VeryHigh => "Very High - large planets",
            LevelTier::Extreme => "Extreme - very large planets",
            LevelTier::Insane => "Insane - huge planets; heavy to generate",
            LevelTier::Ludicrous => "Ludicrous - massive planets; very heavy, not recommended",
            LevelTier::Ridiculous => {
                "Ridiculous - gargantuan planets; extremely heavy, not recommended"
            }
        }
    }

    /// Whether generation at this tier is expected to be slow or memory hungry.
    pub const fn is_heavy(self) -> bool {
        matches!(
            self,
            LevelTier::Insane | LevelTier::Ludicrous | LevelTier::Ridiculous
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_cell_count() {
        assert_eq!(expected_cell_count(0), 12);
        assert_eq!(expected_cell_count(1), 42);
        assert_eq!(expected_cell_count(3), 642);
        assert_eq!(expected_cell_count(10), 10_485_762);
    }

    #[test]
    fn test_expected_cell_count_saturates() {
        assert_eq!(expected_cell_count(40), u64::MAX);
    }

    #[test]
    fn test_level_range() {
        assert!(SubdivisionLevel::new(0).is_ok());
        assert!(SubdivisionLevel::new(10).is_ok());
        assert!(matches!(
            SubdivisionLevel::new(-1),
            Err(GenerateError::InvalidLevel { level: -1 })
        ));
        assert!(matches!(
            SubdivisionLevel::new(11),
            Err(GenerateError::InvalidLevel { level: 11 })
        ));
    }

    #[test]
    fn test_level_counts() {
        let level = SubdivisionLevel::new(2).unwrap();
        assert_eq!(level.get(), 2);
        assert_eq!(level.expected_cell_count(), 162);
        assert_eq!(level.triangle_count(), 320);
        assert_eq!(level.to_string(), "L2");
    }

    #[test]
    fn test_tiers() {
        let tier = |l| SubdivisionLevel::new(l).unwrap().tier();
        assert_eq!(tier(0), LevelTier::Testing);
        assert_eq!(tier(2), LevelTier::Testing);
        assert_eq!(tier(4), LevelTier::Medium);
        assert_eq!(tier(10), LevelTier::Ridiculous);
        assert!(!tier(7).is_heavy());
        assert!(tier(8).is_heavy());
        assert!(tier(5).recommendation().starts_with("High"));
        assert_eq!(
            SubdivisionLevel::new(3).unwrap().recommendation(),
            LevelTier::Low.recommendation()
        );
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let ok: SubdivisionLevel = serde_json::from_str("6").unwrap();
        assert_eq!(ok.get(), 6);
        assert!(serde_json::from_str::<SubdivisionLevel>("11").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "6");
    }
}
