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

use crate::types::card_id::CardId;
use crate::types::ease_factor::EaseFactor;
use crate::types::mode::ModeTransition;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The record of a single processed review: what was rated, and how the
/// schedule moved. Read-only once built.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    card_id: CardId,
    quality: Quality,
    interval_before: u32,
    interval_after: u32,
    ease_factor_before: EaseFactor,
    ease_factor_after: EaseFactor,
    reviewed_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transition: Option<ModeTransition>,
}

/// Interval and ease factor on one side of a review.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub interval_days: u32,
    pub ease_factor: EaseFactor,
}

impl ReviewEvent {
    pub fn new(
        card_id: CardId,
        quality: Quality,
        before: Snapshot,
        after: Snapshot,
        reviewed_at: Timestamp,
        transition: Option<ModeTransition>,
    ) -> Self {
        Self {
            card_id,
            quality,
            interval_before: before.interval_days,
            interval_after: after.interval_days,
            ease_factor_before: before.ease_factor,
            ease_factor_after: after.ease_factor,
            reviewed_at,
            transition,
        }
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn interval_before(&self) -> u32 {
        self.interval_before
    }

    pub fn interval_after(&self) -> u32 {
        self.interval_after
    }

    pub fn ease_factor_before(&self) -> EaseFactor {
        self.ease_factor_before
    }

    pub fn ease_factor_after(&self) -> EaseFactor {
        self.ease_factor_after
    }

    pub fn reviewed_at(&self) -> Timestamp {
        self.reviewed_at
    }

    pub fn transition(&self) -> Option<ModeTransition> {
        self.transition
    }
}
