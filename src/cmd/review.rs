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

use crate::cmd::files::append_event;
use crate::cmd::files::load_state;
use crate::cmd::files::save_state;
use crate::error::Fallible;
use crate::processor::ReviewOutcome;
use crate::processor::ReviewProcessor;
use crate::settings::Settings;
use crate::types::timestamp::Timestamp;

pub fn review_card(
    state_path: &Path,
    quality: i64,
    config: Option<&Path>,
    now: Timestamp,
    log_path: Option<&Path>,
) -> Fallible<()> {
    let outcome = apply_review(state_path, quality, config, now, log_path)?;
    println!("{}", serde_json::to_string_pretty(&outcome.event)?);
    Ok(())
}

fn apply_review(
    state_path: &Path,
    quality: i64,
    config: Option<&Path>,
    now: Timestamp,
    log_path: Option<&Path>,
) -> Fallible<ReviewOutcome> {
    let settings = Settings::load_or_default(config)?;
    let processor = ReviewProcessor::from_settings(&settings)?;
    let state = load_state(state_path)?;
    let outcome = processor.process(state.card_id, Some(&state), quality, now)?;
    save_state(state_path, &outcome.state)?;
    if let Some(log_path) = log_path {
        append_event(log_path, &outcome.event)?;
    }
    Ok(outcome)
}
