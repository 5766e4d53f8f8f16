//! Cooldown gating.
//!
//! A scaling action starts a cooldown window during which further
//! automatic actions are suppressed to prevent oscillation. The gate is
//! a pure function of the injected last action: no history on record
//! means "not suppressed", never an error.

use surge_core::ScalingAction;

/// Result of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownStatus {
    pub suppressed: bool,
    /// Seconds until the window closes. Zero once it has elapsed.
    pub remaining_seconds: u64,
}

/// Check whether a new action falls inside the cooldown window.
///
/// `override_cooldown` lets critical scale-up requests bypass the gate.
/// Scale-down callers pass `false`: reducing fleet size prematurely
/// risks flapping, so no override path exists for shrink.
pub fn check(
    last_action: Option<&ScalingAction>,
    cooldown_seconds: u64,
    now: u64,
    override_cooldown: bool,
) -> CooldownStatus {
    let Some(action) = last_action else {
        return CooldownStatus {
            suppressed: false,
            remaining_seconds: 0,
        };
    };

    let cooldown_end = action.requested_at.saturating_add(cooldown_seconds);
    let remaining = cooldown_end.saturating_sub(now);

    CooldownStatus {
        suppressed: remaining > 0 && !override_cooldown,
        remaining_seconds: remaining,
    }
}
