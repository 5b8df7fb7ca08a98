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

use crate::cmd::files::load_events;
use crate::error::Fallible;
use crate::stats::review_stats;
use crate::types::timestamp::Timestamp;

pub fn print_review_stats(log_path: &Path, now: Timestamp) -> Fallible<()> {
    let events = load_events(log_path)?;
    let stats = review_stats(&events, now);
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}
