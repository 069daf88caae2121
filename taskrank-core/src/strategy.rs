//! Weighting strategies.
//!
//! The profiles are plain data: [`STRATEGY_TABLE`] maps each [`Strategy`] to
//! its weights. Unknown names resolve to [`FALLBACK_STRATEGY`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Effort-dominant: surfaces quick wins.
    FastestWins = 0,
    /// Importance-dominant.
    HighImpact = 1,
    /// Urgency-dominant.
    DeadlineDriven = 2,
    #[default]
    SmartBalance = 3,
}

/// Weights over the four sub-scores. Each profile sums to 1.0.
///
/// `dependency` is part of the profile but the dependency factor is applied
/// as a multiplier on the weighted sum, not added with this weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Weights {
    pub fn total(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }
}

pub const FALLBACK_STRATEGY: Strategy = Strategy::SmartBalance;

/// Indexed by `Strategy as usize`.
pub const STRATEGY_TABLE: [(Strategy, &str, Weights); 4] = [
    (
        Strategy::FastestWins,
        "fastest_wins",
        Weights {
            urgency: 0.2,
            importance: 0.2,
            effort: 0.5,
            dependency: 0.1,
        },
    ),
    (
        Strategy::HighImpact,
        "high_impact",
        Weights {
            urgency: 0.1,
            importance: 0.7,
            effort: 0.1,
            dependency: 0.1,
        },
    ),
    (
        Strategy::DeadlineDriven,
        "deadline_driven",
        Weights {
            urgency: 0.6,
            importance: 0.2,
            effort: 0.1,
            dependency: 0.1,
        },
    ),
    (
        Strategy::SmartBalance,
        "smart_balance",
        Weights {
            urgency: 0.4,
            importance: 0.3,
            effort: 0.2,
            dependency: 0.1,
        },
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown strategy '{0}' (expected fastest_wins, high_impact, deadline_driven or smart_balance)"
)]
pub struct UnknownStrategy(pub String);

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
        Strategy::SmartBalance,
    ];

    pub fn name(self) -> &'static str {
        STRATEGY_TABLE[self as usize].1
    }

    pub fn weights(self) -> Weights {
        STRATEGY_TABLE[self as usize].2
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        STRATEGY_TABLE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(s, _, _)| *s)
    }

    /// Lenient lookup used by the engine: unknown names fall back to
    /// [`FALLBACK_STRATEGY`] instead of failing.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(strategy = name, fallback = FALLBACK_STRATEGY.name(), "unknown strategy");
            FALLBACK_STRATEGY
        })
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_discriminant() {
        for (i, (strategy, _, _)) in STRATEGY_TABLE.iter().enumerate() {
            assert_eq!(*strategy as usize, i);
        }
        assert_eq!(Strategy::ALL.len(), STRATEGY_TABLE.len());
    }

    #[test]
    fn test_every_profile_sums_to_one() {
        for strategy in Strategy::ALL {
            assert!((strategy.weights().total() - 1.0).abs() < 1e-9, "{strategy}");
        }
    }

    #[test]
    fn test_dominant_weights() {
        assert_eq!(Strategy::FastestWins.weights().effort, 0.5);
        assert_eq!(Strategy::HighImpact.weights().importance, 0.7);
        assert_eq!(Strategy::DeadlineDriven.weights().urgency, 0.6);
        let smart = Strategy::SmartBalance.weights();
        assert_eq!(
            (smart.urgency, smart.importance, smart.effort, smart.dependency),
            (0.4, 0.3, 0.2, 0.1)
        );
    }

    #[test]
    fn test_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.name()));
        }
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(Strategy::resolve("whatever"), Strategy::SmartBalance);
        assert_eq!(Strategy::resolve(""), Strategy::SmartBalance);
        assert_eq!(Strategy::resolve(" high_impact "), Strategy::HighImpact);
        assert!("whatever".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_default_is_smart_balance() {
        assert_eq!(Strategy::default(), FALLBACK_STRATEGY);
    }
}
