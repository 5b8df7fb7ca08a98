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

use std::collections::BTreeMap;

use chrono::Days;
use chrono::NaiveDate;
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::review::ReviewEvent;
use crate::types::schedule::ScheduleState;
use crate::types::timestamp::Timestamp;

/// Reviews rated at least this count as retained.
const RETAINED_QUALITY: u8 = 3;

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub reviewed_today: usize,
    /// Mean rating, or zero when there are no reviews.
    pub average_quality: f64,
    /// Percentage of reviews rated 3 or higher.
    pub retention_rate: f64,
    /// Consecutive days with at least one review, counting back from today.
    pub current_streak: usize,
    pub reviews_by_date: BTreeMap<NaiveDate, usize>,
}

pub fn review_stats(events: &[ReviewEvent], now: Timestamp) -> ReviewStats {
    let today = now.date();
    let mut reviews_by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for event in events {
        *reviews_by_date.entry(event.reviewed_at().date()).or_default() += 1;
    }

    let total_reviews = events.len();
    let (average_quality, retention_rate) = if total_reviews == 0 {
        (0.0, 0.0)
    } else {
        let sum: u64 = events.iter().map(|e| u64::from(e.quality().value())).sum();
        let retained = events
            .iter()
            .filter(|e| e.quality().value() >= RETAINED_QUALITY)
            .count();
        (
            sum as f64 / total_reviews as f64,
            retained as f64 * 100.0 / total_reviews as f64,
        )
    };

    let mut current_streak = 0;
    let mut day = Some(today);
    while let Some(d) = day {
        if !reviews_by_date.contains_key(&d) {
            break;
        }
        current_streak += 1;
        day = d.checked_sub_days(Days::new(1));
    }

    ReviewStats {
        total_reviews,
        reviewed_today: reviews_by_date.get(&today).copied().unwrap_or(0),
        average_quality,
        retention_rate,
        current_streak,
        reviews_by_date,
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DueSummary {
    pub total_cards: usize,
    /// Cards whose next review is at or before now, most overdue first.
    pub due_now: Vec<CardId>,
    /// Cards due after now but within the horizon, soonest first.
    pub upcoming: Vec<CardId>,
}

pub fn due_summary(states: &[ScheduleState], now: Timestamp, horizon_days: u32) -> DueSummary {
    let horizon = now.plus_days(horizon_days);
    let mut by_time: Vec<&ScheduleState> = states.iter().collect();
    by_time.sort_by_key(|s| (s.next_review_at(), s.card_id));
    let due_now = by_time
        .iter()
        .filter(|s| s.is_due(now))
        .map(|s| s.card_id)
        .collect();
    let upcoming = by_time
        .iter()
        .filter(|s| !s.is_due(now) && s.next_review_at() <= horizon)
        .map(|s| s.card_id)
        .collect();
    DueSummary {
        total_cards: states.len(),
        due_now,
        upcoming,
    }
}
