// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;


/// Which engine handles a card's next review.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    /// Walk a configured ladder of intervals.
    #[default]
    Fixed,
    /// SM-2. Cards never leave this mode once they enter it.
    Adaptive,
}

impl SchedulingMode {
    pub fn as_str(&self) -> &str {
        match self {
            SchedulingMode::Fixed => "fixed",
            SchedulingMode::Adaptive => "adaptive",
        }
    }
}

impl Display for SchedulingMode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A change of scheduling mode made by a review. The only transition an
/// engine ever makes is from [`SchedulingMode::Fixed`] to
/// [`SchedulingMode::Adaptive`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeTransition {
    pub from: SchedulingMode,
    pub to: SchedulingMode,
}

impl ModeTransition {
    pub fn graduation() -> Self {
        Self {
            from: SchedulingMode::Fixed,
            to: SchedulingMode::Adaptive,
        }
    }
}

impl Display for ModeTransition {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rejects_unknown_mode() {
        assert!(serde_json::from_str::<SchedulingMode>("\"sm2\"").is_err());
        let mode: SchedulingMode = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(mode, SchedulingMode::Fixed);
    }

    #[test]
    fn test_json_names() {
        let json = serde_json::to_string(&SchedulingMode::Adaptive).unwrap();
        assert_eq!(json, "\"adaptive\"");
    }
}
