use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health state of a single registry entry.
///
/// Declaration order is the display and summary order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Ready,
    NeedsConfiguration,
    Missing,
    Unknown,
}

impl HealthState {
    /// Every defined state, in summary order.
    pub const ALL: [HealthState; 4] = [
        HealthState::Ready,
        HealthState::NeedsConfiguration,
        HealthState::Missing,
        HealthState::Unknown,
    ];

    /// Wire name, identical to the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Ready => "ready",
            HealthState::NeedsConfiguration => "needs_configuration",
            HealthState::Missing => "missing",
            HealthState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`HealthState`].
#[derive(Debug, Error)]
#[error("unknown health state '{0}'")]
pub struct UnknownHealthState(pub String);

impl FromStr for HealthState {
    type Err = UnknownHealthState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownHealthState(s.to_string()))
    }
}

/// Availability of a launcher command (`npx`, `node`, `python`, ...) on the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LauncherStatus {
    /// Launcher command as written in the registry.
    pub command: String,
    /// Whether `<command> --version` ran successfully.
    pub found: bool,
    /// First line of the version output, if found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Persisted health report for one registry snapshot.
///
/// Written to a fixed path and fully replaced on every run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
    /// Number of entries classified.
    pub total: usize,
    /// Entry count per state. Every state is present, zero when unseen.
    pub summary: BTreeMap<HealthState, usize>,
    /// Issues, each prefixed with the owning entry name.
    pub issues: Vec<String>,
    /// Recommendations, each prefixed with the owning entry name.
    pub recommendations: Vec<String>,
    /// Launcher availability, empty when launchers were not probed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub launchers: Vec<LauncherStatus>,
}

impl Report {
    /// Count for a state; zero if absent (older artifacts).
    #[must_use]
    pub fn count(&self, state: HealthState) -> usize {
        self.summary.get(&state).copied().unwrap_or(0)
    }

    /// True when every entry is `Ready`.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.count(HealthState::Ready) == self.total
    }
}
