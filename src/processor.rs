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

use crate::engine::AdaptiveScheduleEngine;
use crate::engine::Engines;
use crate::engine::FixedScheduleEngine;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::settings::Settings;
use crate::types::card_id::CardId;
use crate::types::mode::SchedulingMode;
use crate::types::quality::Quality;
use crate::types::review::ReviewEvent;
use crate::types::schedule::ScheduleState;
use crate::types::timestamp::Timestamp;

/// A processed review: the card's new schedule, and the event to log.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReviewOutcome {
    pub state: ScheduleState,
    pub event: ReviewEvent,
}

/// Routes each review to the engine matching the card's current mode.
///
/// The processor holds no per-card state. Callers are responsible for
/// persisting the outcome, and for making sure only one review of a given
/// card is in flight at a time: reviews do not commute.
pub struct ReviewProcessor {
    engines: Engines,
    default_mode: SchedulingMode,
}

impl ReviewProcessor {
    pub fn new(engines: Engines, default_mode: SchedulingMode) -> Self {
        Self {
            engines,
            default_mode,
        }
    }

    pub fn from_settings(settings: &Settings) -> Fallible<Self> {
        let fixed = FixedScheduleEngine::new(settings.intervals.clone())?;
        let engines = Engines::new(fixed, AdaptiveScheduleEngine);
        Ok(Self::new(engines, settings.default_mode))
    }

    /// Create the schedule for a new card, in the default mode.
    pub fn initialize(&self, card_id: CardId, now: Timestamp) -> ScheduleState {
        self.initialize_in(card_id, self.default_mode, now)
    }

    pub fn initialize_in(
        &self,
        card_id: CardId,
        mode: SchedulingMode,
        now: Timestamp,
    ) -> ScheduleState {
        let engine = self.engines.for_mode(mode);
        log::debug!("Initializing card {card_id} with {}.", engine.engine_name());
        engine.initialize_schedule(card_id, now)
    }

    /// Review a card. Fails if the card has no schedule of its own; the
    /// input state is never modified.
    pub fn process(
        &self,
        card_id: CardId,
        state: Option<&ScheduleState>,
        quality: i64,
        now: Timestamp,
    ) -> Fallible<ReviewOutcome> {
        let state = match state {
            Some(state) => state,
            None => {
                return fail_with(
                    ErrorKind::MissingSchedule,
                    format!("card {card_id} has no schedule."),
                );
            }
        };
        if state.card_id != card_id {
            return fail_with(
                ErrorKind::MissingSchedule,
                format!(
                    "card {card_id} has no schedule (got the schedule of card {}).",
                    state.card_id
                ),
            );
        }

        let before = state.snapshot();
        let engine = self.engines.for_mode(state.scheduling_mode);
        let scheduled = engine.calculate_next_review(state, quality, now);
        let after = scheduled.state.snapshot();

        let event = ReviewEvent::new(
            card_id,
            Quality::clamped(quality),
            before,
            after,
            now,
            scheduled.transition,
        );
        log::info!(
            "Review processed: card={card_id}, engine={}, quality={}, interval {} -> {}, ease {} -> {}.",
            engine.engine_name(),
            event.quality(),
            before.interval_days,
            after.interval_days,
            before.ease_factor,
            after.ease_factor,
        );
        if let Some(transition) = scheduled.transition {
            log::info!("Card {card_id} changed mode: {transition}.");
        }
        Ok(ReviewOutcome {
            state: scheduled.state,
            event,
        })
    }
}

impl Default for ReviewProcessor {
    fn default() -> Self {
        Self::new(Engines::default(), SchedulingMode::default())
    }
}
