//! Period scoping of a match log.

use std::fmt;
use std::str::FromStr;

use handtag_core::error::DomainError;
use handtag_tagging::domain::events::{MatchEvent, Period};
use serde::{Deserialize, Serialize};

/// Which part of the match a summary covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// The whole match.
    #[default]
    #[serde(rename = "ALL")]
    All,
    /// First half only.
    #[serde(rename = "PERIOD_1")]
    Period1,
    /// Second half only.
    #[serde(rename = "PERIOD_2")]
    Period2,
}

impl Scope {
    /// Returns the wire name of the scope.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Period1 => "PERIOD_1",
            Self::Period2 => "PERIOD_2",
        }
    }

    /// Returns `true` if an event in `period` falls inside this scope.
    #[must_use]
    pub fn contains(self, period: Period) -> bool {
        match self {
            Self::All => true,
            Self::Period1 => period == Period::First,
            Self::Period2 => period == Period::Second,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "PERIOD_1" => Ok(Self::Period1),
            "PERIOD_2" => Ok(Self::Period2),
            other => Err(DomainError::Validation(format!("unknown scope: {other}"))),
        }
    }
}

/// Selects the events of `scope`, preserving order. The input is left as is.
#[must_use]
pub fn filter_by_scope(events: &[MatchEvent], scope: Scope) -> Vec<MatchEvent> {
    events
        .iter()
        .filter(|event| scope.contains(event.period))
        .cloned()
        .collect()
}
