//! Domain types shared across Surge crates.
//!
//! These types cross three boundaries: alert payloads arriving from the
//! incident-detection pipeline (JSON, field names matching its event
//! format), fleet records persisted in the state store, and decision
//! records handed back to callers. Everything is constructed fresh per
//! decision call and discarded after the caller consumes the `Decision`.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique identifier for a managed fleet.
pub type FleetId = String;

// ── Fleet ─────────────────────────────────────────────────────────

/// Point-in-time capacity state of a managed fleet.
///
/// Supplied fresh on every decision call; the engine never caches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetState {
    pub desired_capacity: u32,
    pub min_capacity: u32,
    pub max_capacity: u32,
    /// Instances actually running. May lag `desired_capacity` while a
    /// scaling activity is in flight.
    pub running_count: u32,
}

impl FleetState {
    /// Check the `min ≤ desired ≤ max` invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_capacity <= self.desired_capacity
            && self.desired_capacity <= self.max_capacity
        {
            Ok(())
        } else {
            Err(ValidationError::FleetBounds {
                min: self.min_capacity,
                desired: self.desired_capacity,
                max: self.max_capacity,
            })
        }
    }
}

// ── Alert ─────────────────────────────────────────────────────────

/// Signal source that raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Cpu,
    Memory,
    #[serde(rename = "http_5xx")]
    Http5xx,
    Latency,
    /// Upstream did not classify the signal. A legal wire literal; any
    /// other unrecognized string is a parse error.
    #[default]
    Unknown,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Cpu => "cpu",
            AlertKind::Memory => "memory",
            AlertKind::Http5xx => "http_5xx",
            AlertKind::Latency => "latency",
            AlertKind::Unknown => "unknown",
        }
    }
}

/// Qualitative urgency of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Requested scaling action carried by an alert.
///
/// `Analyze` requests classification only; no capacity change results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    ScaleUp,
    ScaleDown,
    Analyze,
}

/// An external alert signal, constructed per invocation.
///
/// Wire field names (`alert_type`, `ai_confidence`, `ai_reasoning`)
/// follow the incident-detection event format. Unrecognized `action` or
/// `severity` values fail to parse rather than defaulting, so upstream
/// integration bugs surface instead of masquerading as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub action: AlertAction,
    #[serde(rename = "alert_type", default)]
    pub kind: AlertKind,
    pub severity: Severity,
    /// Classifier confidence, 0-100.
    #[serde(rename = "ai_confidence", default)]
    pub confidence: u8,
    /// Raw metric reading, e.g. "92%".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<String>,
    #[serde(rename = "ai_reasoning", default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Alert {
    /// Check ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.confidence > 100 {
            return Err(ValidationError::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }
}

// ── Scaling history ───────────────────────────────────────────────

/// Direction of a scaling action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleDirection {
    Up,
    Down,
}

impl ScaleDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleDirection::Up => "up",
            ScaleDirection::Down => "down",
        }
    }
}

/// The most recently applied scaling action for a fleet.
///
/// Owned by the caller's persistence layer and passed into the engine
/// by reference; the engine never mutates or stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingAction {
    pub direction: ScaleDirection,
    /// Unix timestamp (seconds) when the action was requested.
    pub requested_at: u64,
    /// Whether the capacity write asked the provider to honor cooldown.
    pub honored_cooldown: bool,
}

// ── Decision ──────────────────────────────────────────────────────

/// Classification of a single decision call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NoChange,
    ScaledUp,
    ScaledDown,
    Suppressed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::NoChange => "no_change",
            Outcome::ScaledUp => "scaled_up",
            Outcome::ScaledDown => "scaled_down",
            Outcome::Suppressed => "suppressed",
        }
    }
}

/// Output record of a decision call. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub previous_capacity: u32,
    pub new_capacity: u32,
    /// `new_capacity - previous_capacity`; negative when scaling down.
    pub delta: i64,
    /// Human-readable justification.
    pub reason: String,
}
