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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::types::card_id::CardId;
use crate::types::ease_factor::EaseFactor;
use crate::types::mode::SchedulingMode;
use crate::types::review::Snapshot;
use crate::types::timestamp::Timestamp;

/// The scheduling state of a single card.
///
/// Engines never modify a state in place: they clone it, update the clone,
/// and return it. The interval and the next review time are private so that
/// they can only change together, through [`ScheduleState::reschedule`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ScheduleRecord")]
pub struct ScheduleState {
    /// The card this schedule belongs to.
    pub card_id: CardId,
    /// Consecutive successful reviews since the last lapse.
    pub repetition_number: u32,
    pub ease_factor: EaseFactor,
    interval_days: u32,
    pub last_reviewed_at: Option<Timestamp>,
    next_review_at: Timestamp,
    /// Total number of reviews ever processed.
    pub review_count: u32,
    /// Total number of failed recalls.
    pub lapse_count: u32,
    pub scheduling_mode: SchedulingMode,
}

impl ScheduleState {
    /// A never-reviewed schedule, due `interval_days` after `now`.
    pub fn new(
        card_id: CardId,
        ease_factor: EaseFactor,
        interval_days: u32,
        scheduling_mode: SchedulingMode,
        now: Timestamp,
    ) -> Self {
        let interval_days = interval_days.max(1);
        Self {
            card_id,
            repetition_number: 0,
            ease_factor,
            interval_days,
            last_reviewed_at: None,
            next_review_at: now.plus_days(interval_days),
            review_count: 0,
            lapse_count: 0,
            scheduling_mode,
        }
    }

    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    pub fn next_review_at(&self) -> Timestamp {
        self.next_review_at
    }

    /// Sets the interval and derives the next review time from it. Intervals
    /// below one day are raised to one.
    pub fn reschedule(&mut self, interval_days: u32, now: Timestamp) {
        self.interval_days = interval_days.max(1);
        self.next_review_at = now.plus_days(self.interval_days);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            interval_days: self.interval_days,
            ease_factor: self.ease_factor,
        }
    }

    /// Is the card due at the given instant?
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at <= now
    }
}

/// The unvalidated wire form of a [`ScheduleState`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ScheduleRecord {
    card_id: CardId,
    repetition_number: u32,
    ease_factor: EaseFactor,
    interval_days: u32,
    last_reviewed_at: Option<Timestamp>,
    next_review_at: Timestamp,
    review_count: u32,
    lapse_count: u32,
    scheduling_mode: SchedulingMode,
}

impl TryFrom<ScheduleRecord> for ScheduleState {
    type Error = ErrorReport;

    fn try_from(record: ScheduleRecord) -> Result<Self, Self::Error> {
        let invalid = |msg: String| {
            ErrorReport::with_kind(
                ErrorKind::InvalidState,
                format!("schedule for card {}: {msg}", record.card_id),
            )
        };
        if record.interval_days == 0 {
            return Err(invalid("interval must be at least one day".to_string()));
        }
        if record.lapse_count > record.review_count {
            return Err(invalid(format!(
                "{} lapses but only {} reviews",
                record.lapse_count, record.review_count
            )));
        }
        if record.last_reviewed_at.is_none() && record.review_count > 0 {
            return Err(invalid("reviewed but has no review time".to_string()));
        }
        Ok(Self {
            card_id: record.card_id,
            repetition_number: record.repetition_number,
            ease_factor: record.ease_factor,
            interval_days: record.interval_days,
            last_reviewed_at: record.last_reviewed_at,
            next_review_at: record.next_review_at,
            review_count: record.review_count,
            lapse_count: record.lapse_count,
            scheduling_mode: record.scheduling_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn now() -> Timestamp {
        "2025-06-01T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_new() {
        let state = ScheduleState::new(
            CardId::new(7),
            EaseFactor::INITIAL,
            3,
            SchedulingMode::Fixed,
            now(),
        );
        assert_eq!(state.repetition_number, 0);
        assert_eq!(state.review_count, 0);
        assert_eq!(state.lapse_count, 0);
        assert_eq!(state.last_reviewed_at, None);
        assert_eq!(state.interval_days(), 3);
        assert_eq!(state.next_review_at(), now().plus_days(3));
    }

    #[test]
    fn test_reschedule_derives_next_review() {
        let mut state = ScheduleState::new(
            CardId::new(1),
            EaseFactor::INITIAL,
            1,
            SchedulingMode::Adaptive,
            now(),
        );
        let later = now().plus_days(10);
        state.reschedule(0, later);
        assert_eq!(state.interval_days(), 1);
        assert_eq!(state.next_review_at(), later.plus_days(1));
        assert!(!state.is_due(later));
        assert!(state.is_due(later.plus_days(1)));
    }

    #[test]
    fn test_json_shape() -> Fallible<()> {
        let state = ScheduleState::new(
            CardId::new(42),
            EaseFactor::INITIAL,
            1,
            SchedulingMode::Fixed,
            now(),
        );
        let json = serde_json::to_value(&state)?;
        assert_eq!(json["cardId"], 42);
        assert_eq!(json["easeFactor"], "2.50");
        assert_eq!(json["intervalDays"], 1);
        assert_eq!(json["schedulingMode"], "fixed");
        assert_eq!(json["lastReviewedAt"], serde_json::Value::Null);
        let back: ScheduleState = serde_json::from_value(json)?;
        assert_eq!(back, state);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_records() -> Fallible<()> {
        let state = ScheduleState::new(
            CardId::new(1),
            EaseFactor::INITIAL,
            1,
            SchedulingMode::Fixed,
            now(),
        );
        let base = serde_json::to_value(&state)?;

        let mut zero_interval = base.clone();
        zero_interval["intervalDays"] = 0.into();
        assert!(serde_json::from_value::<ScheduleState>(zero_interval).is_err());

        let mut too_many_lapses = base.clone();
        too_many_lapses["lapseCount"] = 2.into();
        assert!(serde_json::from_value::<ScheduleState>(too_many_lapses).is_err());

        let mut bad_ease = base.clone();
        bad_ease["easeFactor"] = "4.00".into();
        assert!(serde_json::from_value::<ScheduleState>(bad_ease).is_err());

        let mut unknown = base;
        unknown["stability"] = 1.into();
        assert!(serde_json::from_value::<ScheduleState>(unknown).is_err());
        Ok(())
    }
}
