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
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::ErrorKind;
use crate::error::ErrorReport;

/// The SM-2 ease factor, stored as a fixed-point number of hundredths.
///
/// Every value of this type lies in `[1.30, 3.50]`: constructors and
/// arithmetic clamp, and parsing rejects anything outside the range. Using
/// integer hundredths keeps the SM-2 update exact, so `2.50 + 0.10` is
/// exactly `2.60`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EaseFactor {
    hundredths: u32,
}

impl EaseFactor {
    pub const MIN: EaseFactor = EaseFactor { hundredths: 130 };
    pub const MAX: EaseFactor = EaseFactor { hundredths: 350 };
    pub const INITIAL: EaseFactor = EaseFactor { hundredths: 250 };

    /// Builds an ease factor from hundredths, clamping into range.
    pub fn clamped(hundredths: i64) -> Self {
        let min = i64::from(Self::MIN.hundredths);
        let max = i64::from(Self::MAX.hundredths);
        Self {
            hundredths: hundredths.clamp(min, max) as u32,
        }
    }

    pub fn hundredths(self) -> u32 {
        self.hundredths
    }

    /// Adds a (possibly negative) delta in hundredths, clamping the result.
    pub fn adjust(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.hundredths) + delta)
    }

    /// `ceil(days * self)`, computed exactly.
    pub fn scale_days(self, days: u32) -> u64 {
        (u64::from(days) * u64::from(self.hundredths)).div_ceil(100)
    }
}

impl Default for EaseFactor {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Display for EaseFactor {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl FromStr for EaseFactor {
    type Err = ErrorReport;

    /// Accepts plain decimals with at most two fractional digits, like `"2.5"`
    /// or `"2.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ErrorReport::with_kind(ErrorKind::InvalidState, format!("invalid ease factor: {s:?}"))
        };
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let whole: u32 = whole.parse().map_err(|_| invalid())?;
        let frac: u32 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u32>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        let hundredths = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(invalid)?;
        if hundredths < Self::MIN.hundredths || hundredths > Self::MAX.hundredths {
            return Err(ErrorReport::with_kind(
                ErrorKind::InvalidState,
                format!("ease factor {s} is outside [{}, {}]", Self::MIN, Self::MAX),
            ));
        }
        Ok(Self { hundredths })
    }
}

impl Serialize for EaseFactor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EaseFactor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_display() {
        assert_eq!(EaseFactor::INITIAL.to_string(), "2.50");
        assert_eq!(EaseFactor::MIN.to_string(), "1.30");
        assert_eq!(EaseFactor::clamped(305).to_string(), "3.05");
    }

    #[test]
    fn test_clamping() {
        assert_eq!(EaseFactor::clamped(-1000), EaseFactor::MIN);
        assert_eq!(EaseFactor::clamped(1000), EaseFactor::MAX);
        assert_eq!(EaseFactor::MIN.adjust(-80), EaseFactor::MIN);
        assert_eq!(EaseFactor::MAX.adjust(10), EaseFactor::MAX);
    }

    #[test]
    fn test_adjust_is_exact() {
        let ef = EaseFactor::INITIAL.adjust(10);
        assert_eq!(ef.hundredths(), 260);
        assert_eq!(ef.to_string(), "2.60");
    }

    #[test]
    fn test_scale_days_rounds_up() {
        let ef = EaseFactor::clamped(250);
        assert_eq!(ef.scale_days(6), 15);
        assert_eq!(ef.scale_days(7), 18);
        let ef = EaseFactor::clamped(130);
        assert_eq!(ef.scale_days(1), 2);
    }

    #[test]
    fn test_parse() -> Fallible<()> {
        assert_eq!("2.5".parse::<EaseFactor>()?.hundredths(), 250);
        assert_eq!("2.50".parse::<EaseFactor>()?.hundredths(), 250);
        assert_eq!("3".parse::<EaseFactor>()?.hundredths(), 300);
        assert_eq!("1.3".parse::<EaseFactor>()?, EaseFactor::MIN);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for s in ["", ".5", "2.505", "abc", "-2.5", "2.5e0", "1.29", "3.51", "99999999999"] {
            let result = s.parse::<EaseFactor>();
            assert!(result.is_err(), "{s:?} should not parse");
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
        }
    }

    #[test]
    fn test_json_is_a_decimal_string() -> Fallible<()> {
        let json = serde_json::to_string(&EaseFactor::clamped(260))?;
        assert_eq!(json, "\"2.60\"");
        let back: EaseFactor = serde_json::from_str("\"2.6\"")?;
        assert_eq!(back.hundredths(), 260);
        Ok(())
    }
}
