//! Load-balancing strategies for endpoint selection

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How one endpoint is picked from a service's active endpoints.
///
/// Stored configs carry the strategy as a free-form string. Unrecognised or
/// empty values deserialize to [`LoadBalanceStrategy::RoundRobin`] rather
/// than failing, so a bad value never makes a config unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoadBalanceStrategy {
    /// Rotate through endpoints with a per-service cursor
    #[default]
    RoundRobin,

    /// Uniformly random endpoint
    Random,

    /// Random endpoint proportional to `weight`
    Weighted,

    /// Alias of round-robin: there is no connection accounting to pick by
    LeastConn,
}

impl LoadBalanceStrategy {
    /// Parse a stored strategy name, defaulting unknown values to round-robin.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadBalanceStrategy::RoundRobin => "round-robin",
            LoadBalanceStrategy::Random => "random",
            LoadBalanceStrategy::Weighted => "weighted",
            LoadBalanceStrategy::LeastConn => "least-conn",
        }
    }
}

impl FromStr for LoadBalanceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round-robin" | "round_robin" => Ok(LoadBalanceStrategy::RoundRobin),
            "random" => Ok(LoadBalanceStrategy::Random),
            "weighted" => Ok(LoadBalanceStrategy::Weighted),
            "least-conn" | "least_conn" => Ok(LoadBalanceStrategy::LeastConn),
            _ => Err(format!("Unknown load balance strategy: {}", s)),
        }
    }
}

impl From<String> for LoadBalanceStrategy {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<LoadBalanceStrategy> for String {
    fn from(strategy: LoadBalanceStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl std::fmt::Display for LoadBalanceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
