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
use crate::processor::ReviewProcessor;
use crate::settings::Settings;
use crate::types::card_id::CardId;
use crate::types::mode::SchedulingMode;
use crate::types::timestamp::Timestamp;

pub fn init_card(
    card_id: CardId,
    mode: Option<SchedulingMode>,
    config: Option<&Path>,
    now: Timestamp,
) -> Fallible<()> {
    let settings = Settings::load_or_default(config)?;
    let processor = ReviewProcessor::from_settings(&settings)?;
    let state = match mode {
        Some(mode) => processor.initialize_in(card_id, mode, now),
        None => processor.initialize(card_id, now),
    };
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
