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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::engine::FixedScheduleEngine;
use crate::engine::fixed::DEFAULT_INTERVALS;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::mode::SchedulingMode;

/// Scheduling settings, read from a TOML file:
///
/// ```toml
/// intervals = [1, 3, 7, 15, 30]
/// default_mode = "fixed"
/// ```
///
/// Missing keys take their default values.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The fixed ladder, in days.
    pub intervals: Vec<u32>,
    /// The mode new cards start in.
    pub default_mode: SchedulingMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
            default_mode: SchedulingMode::Fixed,
        }
    }
}

impl Settings {
    pub fn parse(text: &str) -> Fallible<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return Err(ErrorReport::with_kind(
                ErrorKind::Configuration,
                format!("settings file {} does not exist.", path.display()),
            ));
        }
        log::debug!("Loading settings from {}.", path.display());
        let text = read_to_string(path)?;
        Self::parse(&text)
    }

    /// Load from the given path, or use the defaults when there is none.
    pub fn load_or_default(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Fallible<()> {
        FixedScheduleEngine::new(self.intervals.clone()).map(|_| ())
    }
}
