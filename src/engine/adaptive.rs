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
use crate::types::card_id::CardId;
use crate::types::ease_factor::EaseFactor;
use crate::types::mode::SchedulingMode;
use crate::types::quality::Quality;
use crate::types::schedule::ScheduleState;
use crate::types::timestamp::Timestamp;

/// Ratings below this are lapses. Stricter than the fixed ladder's threshold.
const LAPSE_THRESHOLD: u8 = 3;

/// Upper bound on intervals, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// The SM-2 algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdaptiveScheduleEngine;

/// The SM-2 ease factor change for a rating, in hundredths:
///
/// ```text
/// 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)
/// ```
pub fn ease_delta(quality: Quality) -> i64 {
    let d = quality.shortfall();
    10 - d * (8 + d * 2)
}

impl SchedulingEngine for AdaptiveScheduleEngine {
    fn engine_name(&self) -> &'static str {
        "SM-2 Adaptive"
    }

    fn initialize_schedule(&self, card_id: CardId, now: Timestamp) -> ScheduleState {
        ScheduleState::new(
            card_id,
            EaseFactor::INITIAL,
            1,
            SchedulingMode::Adaptive,
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

        // Lapses lower the ease factor too.
        next.ease_factor = state.ease_factor.adjust(ease_delta(quality));

        let interval = if quality.value() < LAPSE_THRESHOLD {
            next.lapse_count = next.lapse_count.saturating_add(1);
            next.repetition_number = 0;
            1
        } else {
            next.repetition_number = next.repetition_number.saturating_add(1);
            match next.repetition_number {
                1 => 1,
                2 => 6,
                _ => {
                    let grown = next.ease_factor.scale_days(state.interval_days());
                    u32::try_from(grown)
                        .unwrap_or(MAX_INTERVAL_DAYS)
                        .min(MAX_INTERVAL_DAYS)
                }
            }
        };
        log::debug!(
            "Card {}: quality {quality}, ease {} -> {}, interval {} -> {interval}.",
            next.card_id,
            state.ease_factor,
            next.ease_factor,
            state.interval_days()
        );
        next.reschedule(interval, now);
        Scheduled {
            state: next,
            transition: None,
        }
    }
}
