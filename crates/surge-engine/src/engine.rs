//! The decision engine.
//!
//! Single-shot classifier per invocation: validates inputs, consults
//! the cooldown gate, invokes the capacity planner, and returns a
//! `Decision` record with a human-readable justification. Terminal
//! output is always produced; there are no retries inside the engine.

use tracing::debug;

use surge_core::{
    Alert, AlertAction, Decision, FleetState, Outcome, ScalingAction, SurgeConfig,
    error::{ConfigError, ValidationError},
};

use crate::cooldown;
use crate::planner;

/// Stateless decision engine for one fleet configuration.
///
/// Configuration is copied in at construction and never revalidated per
/// call, so multiple independently-configured engines can run in one
/// process. `decide` takes `&self` and holds no interior mutability:
/// concurrent callers need no locks.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    min_capacity: u32,
    max_capacity: u32,
    scale_up_increment: u32,
    scale_down_increment: u32,
    cooldown_seconds: u64,
}

impl DecisionEngine {
    /// Build an engine from validated configuration.
    pub fn new(config: &SurgeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            min_capacity: config.fleet.min_capacity,
            max_capacity: config.fleet.max_capacity,
            scale_up_increment: config.scaling.scale_up_increment,
            scale_down_increment: config.scaling.scale_down_increment,
            cooldown_seconds: config.scaling.cooldown_seconds,
        })
    }

    /// Classify one alert against the current fleet state.
    ///
    /// `last_action` is the caller's record of the most recent applied
    /// scaling action; `None` means no history, which never suppresses.
    /// `now` is unix-epoch seconds, injected for testability.
    pub fn decide(
        &self,
        fleet: &FleetState,
        alert: &Alert,
        last_action: Option<&ScalingAction>,
        now: u64,
    ) -> Result<Decision, ValidationError> {
        alert.validate()?;
        fleet.validate()?;

        let current = fleet.desired_capacity;

        let decision = match alert.action {
            AlertAction::Analyze => Decision {
                outcome: Outcome::NoChange,
                previous_capacity: current,
                new_capacity: current,
                delta: 0,
                reason: "analysis only, no scaling action taken".to_string(),
            },
            AlertAction::ScaleUp => {
                let override_cooldown = planner::strong_signal(alert.severity, alert.confidence);
                let status =
                    cooldown::check(last_action, self.cooldown_seconds, now, override_cooldown);
                if status.suppressed {
                    self.suppressed(current, status.remaining_seconds)
                } else {
                    let plan = planner::plan_scale_up(
                        current,
                        self.max_capacity,
                        self.scale_up_increment,
                        alert.severity,
                        alert.confidence,
                    );
                    if plan.delta == 0 {
                        Decision {
                            outcome: Outcome::NoChange,
                            previous_capacity: current,
                            new_capacity: plan.new_capacity,
                            delta: 0,
                            reason: format!(
                                "already at maximum capacity ({})",
                                self.max_capacity
                            ),
                        }
                    } else {
                        Decision {
                            outcome: Outcome::ScaledUp,
                            previous_capacity: current,
                            new_capacity: plan.new_capacity,
                            delta: plan.delta,
                            reason: format!(
                                "{} {} alert with {}% confidence",
                                alert.severity.as_str(),
                                alert.kind.as_str(),
                                alert.confidence
                            ),
                        }
                    }
                }
            }
            AlertAction::ScaleDown => {
                // Shrink always honors cooldown; there is no override path.
                let status = cooldown::check(last_action, self.cooldown_seconds, now, false);
                if status.suppressed {
                    self.suppressed(current, status.remaining_seconds)
                } else {
                    let plan = planner::plan_scale_down(
                        current,
                        self.min_capacity,
                        self.scale_down_increment,
                    );
                    if plan.delta == 0 {
                        Decision {
                            outcome: Outcome::NoChange,
                            previous_capacity: current,
                            new_capacity: plan.new_capacity,
                            delta: 0,
                            reason: format!(
                                "already at minimum capacity ({})",
                                self.min_capacity
                            ),
                        }
                    } else {
                        Decision {
                            outcome: Outcome::ScaledDown,
                            previous_capacity: current,
                            new_capacity: plan.new_capacity,
                            delta: plan.delta,
                            reason: "load decreased, scaling down to reduce capacity"
                                .to_string(),
                        }
                    }
                }
            }
        };

        debug!(
            outcome = decision.outcome.as_str(),
            from = decision.previous_capacity,
            to = decision.new_capacity,
            kind = alert.kind.as_str(),
            "decision computed"
        );

        Ok(decision)
    }

    fn suppressed(&self, current: u32, remaining: u64) -> Decision {
        Decision {
            outcome: Outcome::Suppressed,
            previous_capacity: current,
            new_capacity: current,
            delta: 0,
            reason: format!("scaling suppressed by cooldown, {remaining}s remaining"),
        }
    }
}
