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

use clap::Parser;

use crate::cmd::check::check_settings;
use crate::cmd::due::print_due;
use crate::cmd::init::init_card;
use crate::cmd::review::review_card;
use crate::cmd::simulate::simulate;
use crate::cmd::stats::print_review_stats;
use crate::error::Fallible;
use crate::types::card_id::CardId;
use crate::types::mode::SchedulingMode;
use crate::types::timestamp::Timestamp;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print the initial schedule of a new card as JSON.
    Init {
        /// The card's identifier.
        card_id: CardId,
        /// Start in this mode instead of the configured default.
        #[arg(long, value_enum)]
        mode: Option<SchedulingMode>,
        /// Path to a settings file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Use this RFC 3339 time instead of the current time.
        #[arg(long)]
        now: Option<Timestamp>,
    },
    /// Review a card, updating its schedule file in place.
    Review {
        /// Path to the card's schedule file.
        state: PathBuf,
        /// Recall quality, 0 to 5. Values outside the range are clamped.
        #[arg(allow_negative_numbers = true)]
        quality: i64,
        /// Path to a settings file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Use this RFC 3339 time instead of the current time.
        #[arg(long)]
        now: Option<Timestamp>,
        /// Append the review event to this JSON-lines log.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Replay a sequence of ratings against a new card, one per due date.
    Simulate {
        /// The ratings, in order.
        #[arg(required = true, allow_negative_numbers = true)]
        qualities: Vec<i64>,
        /// Start in this mode instead of the configured default.
        #[arg(long, value_enum)]
        mode: Option<SchedulingMode>,
        /// Path to a settings file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print statistics about a review log as JSON.
    Stats {
        /// Path to the JSON-lines review log.
        log: PathBuf,
        /// Use this RFC 3339 time instead of the current time.
        #[arg(long)]
        now: Option<Timestamp>,
    },
    /// List the cards that are due now or soon.
    Due {
        /// Paths to schedule files.
        #[arg(required = true)]
        states: Vec<PathBuf>,
        /// How many days ahead count as upcoming.
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Use this RFC 3339 time instead of the current time.
        #[arg(long)]
        now: Option<Timestamp>,
    },
    /// Check that a settings file is valid.
    Check {
        /// Path to the settings file.
        config: PathBuf,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Init {
            card_id,
            mode,
            config,
            now,
        } => {
            let now = now.unwrap_or_else(Timestamp::now);
            init_card(card_id, mode, config.as_deref(), now)
        }
        Command::Review {
            state,
            quality,
            config,
            now,
            log,
        } => {
            let now = now.unwrap_or_else(Timestamp::now);
            review_card(&state, quality, config.as_deref(), now, log.as_deref())
        }
        Command::Simulate {
            qualities,
            mode,
            config,
        } => simulate(&qualities, mode, config.as_deref()),
        Command::Stats { log, now } => {
            let now = now.unwrap_or_else(Timestamp::now);
            print_review_stats(&log, now)
        }
        Command::Due { states, days, now } => {
            let now = now.unwrap_or_else(Timestamp::now);
            print_due(&states, days, now)
        }
        Command::Check { config } => check_settings(&config),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_negative_quality() {
        let cli = Command::try_parse_from(["cadence", "review", "card.json", "-3"]).unwrap();
        match cli {
            Command::Review { quality, .. } => assert_eq!(quality, -3),
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn test_mode_flag() {
        let cli =
            Command::try_parse_from(["cadence", "init", "12", "--mode", "adaptive"]).unwrap();
        match cli {
            Command::Init { card_id, mode, .. } => {
                assert_eq!(card_id, CardId::new(12));
                assert_eq!(mode, Some(SchedulingMode::Adaptive));
            }
            _ => panic!("expected init"),
        }
    }
}
