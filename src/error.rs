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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// Broad classification of an error, so callers can react to specific
/// failures without matching on message text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// A review was requested for a card that has no schedule.
    MissingSchedule,
    /// An engine or settings file was configured with invalid values.
    Configuration,
    /// A stored schedule record violates its invariants.
    InvalidState,
    Io,
    Parse,
    Other,
}

#[derive(Debug)]
pub struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Other, message)
    }

    pub fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(message))
}

pub fn fail_with<T>(kind: ErrorKind, message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::with_kind(kind, message))
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::with_kind(ErrorKind::Io, format!("I/O error: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport::with_kind(ErrorKind::Parse, format!("JSON error: {value}"))
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport::with_kind(
            ErrorKind::Configuration,
            format!("invalid settings: {}", value.message()),
        )
    }
}

impl From<chrono::ParseError> for ErrorReport {
    fn from(value: chrono::ParseError) -> Self {
        ErrorReport::with_kind(ErrorKind::Parse, format!("invalid timestamp: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("directory does not exist.");
        assert_eq!(err.to_string(), "error: directory does not exist.");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_fail_with_kind() {
        let result: Fallible<()> = fail_with(ErrorKind::MissingSchedule, "no schedule");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingSchedule);
        assert_eq!(err.message(), "no schedule");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ErrorReport = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
