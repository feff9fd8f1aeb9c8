//! Timeout configuration from TOML (`[timeouts]` section)

use council_application::PatternTimeouts;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-pattern invocation timeouts, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    pub ask: u64,
    pub consensus: u64,
    pub debate: u64,
    pub council: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        let defaults = PatternTimeouts::default();
        Self {
            ask: defaults.ask.as_secs(),
            consensus: defaults.consensus.as_secs(),
            debate: defaults.debate.as_secs(),
            council: defaults.council.as_secs(),
        }
    }
}

impl FileTimeoutsConfig {
    /// Name of the first pattern configured with a zero timeout.
    pub fn first_zero(&self) -> Option<&'static str> {
        [
            ("ask", self.ask),
            ("consensus", self.consensus),
            ("debate", self.debate),
            ("council", self.council),
        ]
        .into_iter()
        .find(|(_, secs)| *secs == 0)
        .map(|(name, _)| name)
    }

    pub fn to_pattern_timeouts(&self) -> PatternTimeouts {
        PatternTimeouts {
            ask: Duration::from_secs(self.ask),
            consensus: Duration::from_secs(self.consensus),
            debate: Duration::from_secs(self.debate),
            council: Duration::from_secs(self.council),
        }
    }
}
