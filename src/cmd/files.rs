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

//! Reading and writing the JSON files the command-line tool works with.

use std::fs::OpenOptions;
use std::fs::read_to_string;
use std::fs::rename;
use std::fs::write;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::review::ReviewEvent;
use crate::types::schedule::ScheduleState;

pub fn load_state(path: &Path) -> Fallible<ScheduleState> {
    if !path.exists() {
        return fail(format!("schedule file {} does not exist.", path.display()));
    }
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
        ErrorReport::with_kind(
            ErrorKind::InvalidState,
            format!("invalid schedule file {}: {e}", path.display()),
        )
    })
}

/// Replaces the file with the given state, by writing a sibling `.tmp` file
/// and renaming it over the original.
pub fn save_state(path: &Path, state: &ScheduleState) -> Fallible<()> {
    let json = serde_json::to_string_pretty(state)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    write(&tmp, json + "\n")?;
    rename(&tmp, path)?;
    Ok(())
}

/// Appends one event as a line of JSON, creating the log if needed.
pub fn append_event(path: &Path, event: &ReviewEvent) -> Fallible<()> {
    let line = serde_json::to_string(event)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Reads a JSON-lines review log. Blank lines are skipped.
pub fn load_events(path: &Path) -> Fallible<Vec<ReviewEvent>> {
    if !path.exists() {
        return fail(format!("review log {} does not exist.", path.display()));
    }
    let text = read_to_string(path)?;
    let mut events = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: ReviewEvent = serde_json::from_str(line).map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::Parse,
                format!("{}:{}: {e}", path.display(), idx + 1),
            )
        })?;
        events.push(event);
    }
    Ok(events)
}
