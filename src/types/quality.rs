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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// A recall rating between 0 (complete blackout) and 5 (perfect recall).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: Quality = Quality(0);
    pub const MAX: Quality = Quality(5);

    /// Out-of-range ratings are clamped rather than rejected.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, 5) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Distance from a perfect rating, the `5 - q` term of SM-2.
    pub fn shortfall(self) -> i64 {
        i64::from(Self::MAX.0 - self.0)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.0
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            return fail(format!("quality {value} is outside 0-5"));
        }
        Ok(Self(value))
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped() {
        assert_eq!(Quality::clamped(-5), Quality::MIN);
        assert_eq!(Quality::clamped(0), Quality::MIN);
        assert_eq!(Quality::clamped(3).value(), 3);
        assert_eq!(Quality::clamped(10), Quality::MAX);
        assert_eq!(Quality::clamped(i64::MIN), Quality::MIN);
        assert_eq!(Quality::clamped(i64::MAX), Quality::MAX);
    }

    #[test]
    fn test_shortfall() {
        assert_eq!(Quality::MAX.shortfall(), 0);
        assert_eq!(Quality::MIN.shortfall(), 5);
    }

    #[test]
    fn test_json_rejects_out_of_range() {
        assert!(serde_json::from_str::<Quality>("6").is_err());
        assert_eq!(serde_json::from_str::<Quality>("4").unwrap().value(), 4);
    }
}
