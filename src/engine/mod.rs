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

//! Scheduling engines.
//!
//! Both engines are pure: they take a schedule and a rating and return a new
//! schedule. Which engine reviews a card is decided by the card's stored
//! [`SchedulingMode`], through [`Engines::for_mode`], never by the caller.

pub mod adaptive;
pub mod fixed;

use crate::types::card_id::CardId;
use crate::types::mode::ModeTransition;
use crate::types::mode::SchedulingMode;
use crate::types::schedule::ScheduleState;
use crate::types::timestamp::Timestamp;

pub use adaptive::AdaptiveScheduleEngine;
pub use fixed::FixedScheduleEngine;

/// The result of reviewing a card.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Scheduled {
    pub state: ScheduleState,
    /// Set when this review moved the card to a different mode.
    pub transition: Option<ModeTransition>,
}

pub trait SchedulingEngine {
    /// A stable name for diagnostics.
    fn engine_name(&self) -> &'static str;

    /// The schedule of a card that has never been reviewed.
    fn initialize_schedule(&self, card_id: CardId, now: Timestamp) -> ScheduleState;

    /// Apply a review with the given rating at `now`. The rating is clamped
    /// to 0-5 first.
    fn calculate_next_review(
        &self,
        state: &ScheduleState,
        quality: i64,
        now: Timestamp,
    ) -> Scheduled;
}

/// One engine per mode.
pub struct Engines {
    fixed: FixedScheduleEngine,
    adaptive: AdaptiveScheduleEngine,
}

impl Engines {
    pub fn new(fixed: FixedScheduleEngine, adaptive: AdaptiveScheduleEngine) -> Self {
        Self { fixed, adaptive }
    }

    pub fn for_mode(&self, mode: SchedulingMode) -> &dyn SchedulingEngine {
        match mode {
            SchedulingMode::Fixed => &self.fixed,
            SchedulingMode::Adaptive => &self.adaptive,
        }
    }
}

impl Default for Engines {
    fn default() -> Self {
        Self::new(FixedScheduleEngine::default(), AdaptiveScheduleEngine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        let engines = Engines::default();
        assert_eq!(
            engines.for_mode(SchedulingMode::Fixed).engine_name(),
            "Fixed Schedule"
        );
        assert_eq!(
            engines.for_mode(SchedulingMode::Adaptive).engine_name(),
            "SM-2 Adaptive"
        );
    }
}
