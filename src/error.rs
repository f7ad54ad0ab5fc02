//! Error types
//!
//! Only session setup can fail. Ticking never errors: a sweep that finds no
//! contact is a normal outcome.

use std::fmt;

use crate::platform::EntityKind;

/// Failure while loading settings or initializing a session
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A setting violates its constraint (non-positive scale, inverted bounds...)
    InvalidSetting { name: &'static str, reason: String },
    /// No bricks configured - the game would be won before it starts
    EmptyBrickLayout,
    /// The host could not provide an entity the session needs
    MissingResource(EntityKind),
    /// Settings JSON could not be parsed
    Parse(String),
    /// Settings file could not be read
    Io(String),
}

impl GameError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GameError::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidSetting { name, reason } => {
                write!(f, "invalid setting `{}`: {}", name, reason)
            }
            GameError::EmptyBrickLayout => write!(f, "brick layout is empty"),
            GameError::MissingResource(kind) => write!(f, "missing resource: {:?}", kind),
            GameError::Parse(msg) => write!(f, "settings parse error: {}", msg),
            GameError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Parse(e.to_string())
    }
}
