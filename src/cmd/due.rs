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

use std::path::PathBuf;

use crate::cmd::files::load_state;
use crate::error::Fallible;
use crate::stats::due_summary;
use crate::types::timestamp::Timestamp;

pub fn print_due(state_paths: &[PathBuf], days: u32, now: Timestamp) -> Fallible<()> {
    let states = state_paths
        .iter()
        .map(|path| load_state(path))
        .collect::<Fallible<Vec<_>>>()?;
    let summary = due_summary(&states, now, days);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
