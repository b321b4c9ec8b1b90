//! Insight records - the observer's narration of a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightId(pub Uuid);

impl InsightId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InsightId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InsightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an insight reflects the aligned or the distorted pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Light,
    Shadow,
}

/// One observation, immutable once logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub id: InsightId,

    /// Sovereignty title or archetype label the insight speaks for.
    pub sovereignty: String,

    #[serde(rename = "type")]
    pub kind: InsightKind,

    pub message: String,

    pub timestamp: DateTime<Utc>,
}

impl InsightRecord {
    /// Stamp an insight with a new id and the current time.
    pub fn new(
        sovereignty: impl Into<String>,
        kind: InsightKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: InsightId::new(),
            sovereignty: sovereignty.into(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// A `Light` insight.
    pub fn light(sovereignty: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(sovereignty, InsightKind::Light, message)
    }

    /// Whether this is the periodic pulse insight.
    pub fn is_pulse(&self) -> bool {
        self.sovereignty == super::PULSE_SOVEREIGNTY
    }
}
