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

//! cadence: spaced repetition scheduling.
//!
//! New cards walk a fixed ladder of intervals (by default 1, 3, 7, 15 and 30
//! days). Once the ladder is exhausted they graduate to SM-2, which adapts
//! the interval to each card's ease factor. This crate provides:
//! - The schedule record and its value types
//! - The fixed-ladder and SM-2 engines
//! - A review processor that picks the engine from the card's mode
//! - Review statistics and due-card queries

pub mod cli;
pub mod cmd;
pub mod engine;
pub mod error;
pub mod processor;
pub mod settings;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use engine::{
    AdaptiveScheduleEngine, Engines, FixedScheduleEngine, Scheduled, SchedulingEngine,
};
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use processor::{ReviewOutcome, ReviewProcessor};
pub use settings::Settings;
pub use types::card_id::CardId;
pub use types::ease_factor::EaseFactor;
pub use types::mode::{ModeTransition, SchedulingMode};
pub use types::quality::Quality;
pub use types::review::ReviewEvent;
pub use types::schedule::ScheduleState;
pub use types::timestamp::Timestamp;
