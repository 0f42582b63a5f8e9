//! Lifecycle status of an asynchronous operation
//!
//! The status moves through a small, fixed set of phases: a tracker starts
//! out idle, enters loading when an operation is started, and settles in
//! success or error depending on the outcome. Auto-reset (when enabled)
//! eventually moves settled state back toward idle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a status name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseStatusError {
    /// The input does not name a known status
    #[error("Invalid status name: {0}")]
    Unknown(String),
}

/// Lifecycle phase of an asynchronous operation
///
/// Exactly one status is current at any time. Within a single execution the
/// transitions are strictly ordered: loading first, then success or error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No operation has run yet, or the last outcome was reset
    #[default]
    Idle,
    /// An operation is currently in flight
    Loading,
    /// The most recent operation completed successfully
    Success,
    /// The most recent operation failed
    Error,
}

impl Status {
    /// Whether the status is [`Status::Idle`]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether the status is [`Status::Loading`]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the status is [`Status::Success`]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether the status is [`Status::Error`]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Loading => write!(f, "loading"),
            Status::Success => write!(f, "success"),
            Status::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "loading" => Ok(Self::Loading),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(ParseStatusError::Unknown(other.to_string())),
        }
    }
}
