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

use crate::engine::Scheduled;
use crate::engine::SchedulingEngine;
use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::types::card_id::CardId;
use crate::types::ease_factor::EaseFactor;
use crate::types::mode::ModeTransition;
use crate::types::mode::SchedulingMode;
use crate::types::quality::Quality;
use crate::types::schedule::ScheduleState;
use crate::types::timestamp::Timestamp;

/// The intervals a new card walks through before graduating to SM-2.
pub const DEFAULT_INTERVALS: [u32; 5] = [1, 3, 7, 15, 30];

/// Ratings below this are lapses.
const LAPSE_THRESHOLD: u8 = 2;

/// Walks a card through a fixed ladder of intervals. A lapse sends the card
/// back to the first rung. Once the ladder is exhausted, the card switches
/// to adaptive scheduling with a bridge interval of twice the last rung.
#[derive(Clone, Debug)]
pub struct FixedScheduleEngine {
    intervals: Vec<u32>,
}

impl FixedScheduleEngine {
    pub fn new(intervals: Vec<u32>) -> Fallible<Self> {
        if intervals.is_empty() {
            return fail_with(
                ErrorKind::Configuration,
                "fixed schedule needs at least one interval.",
            );
        }
        if intervals.contains(&0) {
            return fail_with(
                ErrorKind::Configuration,
                "fixed schedule intervals must be at least one day.",
            );
        }
        Ok(Self { intervals })
    }

    fn first(&self) -> u32 {
        self.intervals[0]
    }

    fn last(&self) -> u32 {
        self.intervals[self.intervals.len() - 1]
    }
}

impl Default for FixedScheduleEngine {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl SchedulingEngine for FixedScheduleEngine {
    fn engine_name(&self) -> &'static str {
        "Fixed Schedule"
    }

    fn initialize_schedule(&self, card_id: CardId, now: Timestamp) -> ScheduleState {
        ScheduleState::new(
            card_id,
            EaseFactor::INITIAL,
            self.first(),
            SchedulingMode::Fixed,
            now,
        )
    }

    fn calculate_next_review(
        &self,
        state: &ScheduleState,
        quality: i64,
        now: Timestamp,
    ) -> Scheduled {
        let quality = Quality::clamped(quality);
        let mut next = state.clone();
        next.review_count = next.review_count.saturating_add(1);
        next.last_reviewed_at = Some(now);

        // The ease factor is carried through untouched.
        if quality.value() < LAPSE_THRESHOLD {
            next.lapse_count = next.lapse_count.saturating_add(1);
            next.repetition_number = 0;
            next.reschedule(self.first(), now);
            log::debug!("Card {} lapsed on the fixed ladder.", next.card_id);
            return Scheduled {
                state: next,
                transition: None,
            };
        }

        next.repetition_number = next.repetition_number.saturating_add(1);
        let mut transition = None;
        let rung = next.repetition_number as usize;
        let interval = if rung < self.intervals.len() {
            self.intervals[rung]
        } else {
            if next.scheduling_mode == SchedulingMode::Fixed {
                transition = Some(ModeTransition::graduation());
                log::debug!(
                    "Card {} finished the fixed ladder, switching to adaptive.",
                    next.card_id
                );
            }
            next.scheduling_mode = SchedulingMode::Adaptive;
            self.last().saturating_mul(2)
        };
        next.reschedule(interval, now);
        Scheduled {
            state: next,
            transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn now() -> Timestamp {
        "2025-06-01T09:00:00Z".parse().unwrap()
    }

    fn review(engine: &FixedScheduleEngine, state: &ScheduleState, quality: i64) -> Scheduled {
        engine.calculate_next_review(state, quality, now())
    }

    #[test]
    fn test_empty_intervals() {
        let err = FixedScheduleEngine::new(vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_zero_interval() {
        let err = FixedScheduleEngine::new(vec![1, 0, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_initialize() {
        let engine = FixedScheduleEngine::default();
        let state = engine.initialize_schedule(CardId::new(1), now());
        assert_eq!(state.card_id, CardId::new(1));
        assert_eq!(state.interval_days(), 1);
        assert_eq!(state.ease_factor, EaseFactor::INITIAL);
        assert_eq!(state.scheduling_mode, SchedulingMode::Fixed);
        assert_eq!(state.next_review_at(), now().plus_days(1));
        assert_eq!(state.last_reviewed_at, None);
    }

    #[test]
    fn test_lapse_resets_to_first_interval() {
        let engine = FixedScheduleEngine::default();
        let state = engine.initialize_schedule(CardId::new(1), now());
        let result = review(&engine, &state, 0);
        assert_eq!(result.state.repetition_number, 0);
        assert_eq!(result.state.interval_days(), 1);
        assert_eq!(result.state.lapse_count, 1);
        assert_eq!(result.state.review_count, 1);
        assert_eq!(result.state.last_reviewed_at, Some(now()));
        assert_eq!(result.transition, None);
    }

    #[test]
    fn test_lapse_after_progress() {
        let engine = FixedScheduleEngine::default();
        let mut state = engine.initialize_schedule(CardId::new(1), now());
        for _ in 0..3 {
            state = review(&engine, &state, 4).state;
        }
        assert_eq!(state.interval_days(), 15);
        let state = review(&engine, &state, 1).state;
        assert_eq!(state.repetition_number, 0);
        assert_eq!(state.interval_days(), 1);
        assert_eq!(state.ease_factor, EaseFactor::INITIAL);
    }

    #[test]
    fn test_quality_two_is_a_success() {
        let engine = FixedScheduleEngine::default();
        let state = engine.initialize_schedule(CardId::new(1), now());
        let result = review(&engine, &state, 2);
        assert_eq!(result.state.repetition_number, 1);
        assert_eq!(result.state.lapse_count, 0);
        // The first success lands on the second rung.
        assert_eq!(result.state.interval_days(), 3);
    }

    #[test]
    fn test_full_ladder_graduates() {
        let engine = FixedScheduleEngine::default();
        let mut state = engine.initialize_schedule(CardId::new(1), now());
        let mut intervals = Vec::new();
        let mut transitions = Vec::new();
        for _ in 0..5 {
            let result = review(&engine, &state, 4);
            intervals.push(result.state.interval_days());
            transitions.push(result.transition);
            state = result.state;
        }
        assert_eq!(intervals, vec![3, 7, 15, 30, 60]);
        assert_eq!(state.repetition_number, 5);
        assert_eq!(state.scheduling_mode, SchedulingMode::Adaptive);
        assert_eq!(state.next_review_at(), now().plus_days(60));
        assert_eq!(transitions[..4], [None, None, None, None]);
        assert_eq!(transitions[4], Some(ModeTransition::graduation()));
    }

    #[test]
    fn test_single_rung_ladder() -> Fallible<()> {
        let engine = FixedScheduleEngine::new(vec![2])?;
        let state = engine.initialize_schedule(CardId::new(1), now());
        assert_eq!(state.interval_days(), 2);
        let result = review(&engine, &state, 5);
        assert_eq!(result.state.scheduling_mode, SchedulingMode::Adaptive);
        assert_eq!(result.state.interval_days(), 4);
        assert!(result.transition.is_some());
        Ok(())
    }

    #[test]
    fn test_never_reverts_to_fixed() {
        let engine = FixedScheduleEngine::default();
        let mut state = engine.initialize_schedule(CardId::new(1), now());
        state.scheduling_mode = SchedulingMode::Adaptive;
        for quality in [0, 4, 4, 4, 4, 4, 0] {
            let result = review(&engine, &state, quality);
            assert_eq!(result.state.scheduling_mode, SchedulingMode::Adaptive);
            assert_eq!(result.transition, None);
            state = result.state;
        }
    }

    #[test]
    fn test_every_quality_yields_valid_state() {
        let engine = FixedScheduleEngine::default();
        for mode in [SchedulingMode::Fixed, SchedulingMode::Adaptive] {
            for reps in [0, 1, 3, 4, 5, 9] {
                for interval in [1, 7, 100] {
                    let mut state = engine.initialize_schedule(CardId::new(1), now());
                    state.scheduling_mode = mode;
                    state.repetition_number = reps;
                    state.reschedule(interval, now());
                    for quality in -2..=7 {
                        let next = review(&engine, &state, quality).state;
                        assert!(next.interval_days() >= 1);
                        assert_eq!(next.review_count, state.review_count + 1);
                        assert_eq!(next.ease_factor, state.ease_factor);
                        assert_eq!(
                            next.next_review_at(),
                            now().plus_days(next.interval_days())
                        );
                        if mode == SchedulingMode::Adaptive {
                            assert_eq!(next.scheduling_mode, SchedulingMode::Adaptive);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_counters_saturate() -> Fallible<()> {
        let engine = FixedScheduleEngine::default();
        let mut state = engine.initialize_schedule(CardId::new(1), now());
        state.review_count = u32::MAX;
        state.lapse_count = u32::MAX - 1;
        state.repetition_number = u32::MAX;
        let passed = review(&engine, &state, 4);
        assert_eq!(passed.state.review_count, u32::MAX);
        assert_eq!(passed.state.repetition_number, u32::MAX);
        assert_eq!(passed.state.interval_days(), 60);
        let lapsed = review(&engine, &state, 0).state;
        assert_eq!(lapsed.review_count, u32::MAX);
        assert_eq!(lapsed.lapse_count, u32::MAX);
        let json = serde_json::to_string(&lapsed)?;
        assert_eq!(serde_json::from_str::<ScheduleState>(&json)?, lapsed);
        Ok(())
    }

    #[test]
    fn test_clamping() {
        let engine = FixedScheduleEngine::default();
        let state = engine.initialize_schedule(CardId::new(1), now());
        assert_eq!(review(&engine, &state, -5), review(&engine, &state, 0));
        assert_eq!(review(&engine, &state, 10), review(&engine, &state, 5));
    }

    #[test]
    fn test_does_not_touch_input() {
        let engine = FixedScheduleEngine::default();
        let state = engine.initialize_schedule(CardId::new(9), now());
        let before = state.clone();
        let result = review(&engine, &state, 4);
        assert_eq!(state, before);
        assert_eq!(result.state.card_id, CardId::new(9));
        assert_eq!(result.state.review_count, state.review_count + 1);
    }
}
