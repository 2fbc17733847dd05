//! Survival and birth thresholds
//!
//! Rules are expressed as two inclusive neighbour ranges. The default is
//! Conway's B3/S23: a live cell survives with 2 or 3 neighbours and a dead
//! cell is born with exactly 3.

use std::{fmt, str::FromStr};

use crate::error::{LifeError, Result};

/// Largest possible neighbour count in a Moore neighbourhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Inclusive neighbour-count range, `min..=max` within `0..=8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborRange {
    min: u8,
    max: u8,
}

impl NeighborRange {
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min > max || max > MAX_NEIGHBORS {
            return Err(LifeError::InvalidRules { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, count: u8) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for NeighborRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Parses `"3"` or `"2-3"`
impl FromStr for NeighborRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u8>()
                .map_err(|e| format!("invalid neighbour count '{}': {}", part.trim(), e))
        };
        let (min, max) = match s.split_once('-') {
            Some((lo, hi)) => (parse(lo)?, parse(hi)?),
            None => {
                let n = parse(s)?;
                (n, n)
            }
        };
        NeighborRange::new(min, max).map_err(|e| e.to_string())
    }
}

/// Survive/birth thresholds for one run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rules {
    pub survive: NeighborRange,
    pub birth: NeighborRange,
}

impl Rules {
    /// Conway's Game of Life: survive on 2-3, birth on 3
    pub const CONWAY: Rules = Rules {
        survive: NeighborRange { min: 2, max: 3 },
        birth: NeighborRange { min: 3, max: 3 },
    };

    pub fn new(survive: NeighborRange, birth: NeighborRange) -> Self {
        Self { survive, birth }
    }

    /// Build from the four raw bounds, validating each range
    pub fn from_bounds(survive_min: u8, survive_max: u8, birth_min: u8, birth_max: u8) -> Result<Self> {
        Ok(Self {
            survive: NeighborRange::new(survive_min, survive_max)?,
            birth: NeighborRange::new(birth_min, birth_max)?,
        })
    }

    /// Next state of a cell given its current state and live neighbour count
    #[inline]
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survive.contains(neighbors)
        } else {
            self.birth.contains(neighbors)
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_default() {
        let rules = Rules::default();
        assert_eq!(rules, Rules::from_bounds(2, 3, 3, 3).unwrap());
        assert_eq!(rules.to_string(), "B3/S2-3");

        assert!(rules.next_state(true, 2));
        assert!(rules.next_state(true, 3));
        assert!(!rules.next_state(true, 1));
        assert!(!rules.next_state(true, 4));
        assert!(rules.next_state(false, 3));
        assert!(!rules.next_state(false, 2));
    }

    #[test]
    fn test_range_validation() {
        assert!(NeighborRange::new(0, 8).is_ok());
        assert_eq!(
            NeighborRange::new(4, 9),
            Err(LifeError::InvalidRules { min: 4, max: 9 })
        );
        assert!(NeighborRange::new(3, 2).is_err());
        assert!(Rules::from_bounds(2, 3, 9, 9).is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!("3".parse::<NeighborRange>(), Ok(NeighborRange::new(3, 3).unwrap()));
        let range: NeighborRange = "2-3".parse().unwrap();
        assert_eq!(range, NeighborRange::new(2, 3).unwrap());
        assert_eq!(range.to_string(), "2-3");
        assert!("3-2".parse::<NeighborRange>().is_err());
        assert!("x".parse::<NeighborRange>().is_err());
        assert!("9".parse::<NeighborRange>().is_err());
    }
}
