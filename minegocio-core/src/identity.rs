//! Identity types for MiNegocio entities

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side creation timestamp. The backend emits local date-times without offset.
pub type Timestamp = NaiveDateTime;

/// Server-assigned client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClienteId(pub i64);

/// Server-assigned address identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DireccionId(pub i64);

impl ClienteId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl DireccionId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClienteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DireccionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClienteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for DireccionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
