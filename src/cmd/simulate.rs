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

use std::path::Path;

use crate::error::Fallible;
use crate::processor::ReviewOutcome;
use crate::processor::ReviewProcessor;
use crate::settings::Settings;
use crate::types::card_id::CardId;
use crate::types::mode::SchedulingMode;
use crate::types::timestamp::Timestamp;

pub fn simulate(
    qualities: &[i64],
    mode: Option<SchedulingMode>,
    config: Option<&Path>,
) -> Fallible<()> {
    let settings = Settings::load_or_default(config)?;
    let processor = ReviewProcessor::from_settings(&settings)?;
    let start = Timestamp::now();
    let mode = mode.unwrap_or(settings.default_mode);
    println!("review  quality  mode      reps  ease  interval");
    for (idx, outcome) in run(&processor, qualities, mode, start)?.iter().enumerate() {
        let state = &outcome.state;
        println!(
            "{:>6}  {:>7}  {:<8}  {:>4}  {}  {:>8}",
            idx + 1,
            outcome.event.quality().value(),
            state.scheduling_mode.as_str(),
            state.repetition_number,
            state.ease_factor,
            state.interval_days()
        );
    }
    Ok(())
}

/// Reviews a fresh card once per rating, each review happening exactly when
/// the card falls due.
fn run(
    processor: &ReviewProcessor,
    qualities: &[i64],
    mode: SchedulingMode,
    start: Timestamp,
) -> Fallible<Vec<ReviewOutcome>> {
    let card = CardId::new(1);
    let mut state = processor.initialize_in(card, mode, start);
    let mut outcomes = Vec::with_capacity(qualities.len());
    for &quality in qualities {
        let now = state.next_review_at();
        let outcome = processor.process(card, Some(&state), quality, now)?;
        state = outcome.state.clone();
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
