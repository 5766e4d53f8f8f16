//! ScalingController — orchestrates one fleet's scaling cycle.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;
use tracing::{debug, info};

use surge_core::{Alert, Decision, Outcome, SurgeConfig, error::ConfigError};
use surge_engine::DecisionEngine;
use surge_gateway::FleetGateway;
use surge_metrics::ScalingMetrics;

use crate::error::ControllerResult;

/// Runs the read-decide-apply cycle for one configured fleet.
///
/// The engine itself is pure; everything stateful (fleet snapshot, last
/// action) is read through the gateway at the start of each cycle and
/// written back after the apply step.
pub struct ScalingController<G> {
    fleet_id: String,
    engine: DecisionEngine,
    gateway: G,
    metrics: ScalingMetrics,
    /// One decision in flight per fleet. Two alerts deciding from the
    /// same stale snapshot would both scale from the same base.
    cycle: Mutex<()>,
}

impl<G: FleetGateway> ScalingController<G> {
    pub fn new(
        config: &SurgeConfig,
        gateway: G,
        metrics: ScalingMetrics,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            fleet_id: config.fleet.id.clone(),
            engine: DecisionEngine::new(config)?,
            gateway,
            metrics,
            cycle: Mutex::new(()),
        })
    }

    pub fn fleet_id(&self) -> &str {
        &self.fleet_id
    }

    /// Evaluate one alert and apply the resulting decision.
    ///
    /// A `ScaledUp` apply tells the provider not to honor its own
    /// cooldown (the override path exists on grow); a `ScaledDown`
    /// apply always honors it.
    pub async fn handle_alert(&self, alert: &Alert) -> ControllerResult<Decision> {
        let _guard = self.cycle.lock().await;

        let fleet = self.gateway.read_fleet_state(&self.fleet_id).await?;
        let last_action = self.gateway.get_last_scaling_action(&self.fleet_id).await?;
        let decision = self
            .engine
            .decide(&fleet, alert, last_action.as_ref(), epoch_secs())?;

        match decision.outcome {
            Outcome::ScaledUp => {
                self.gateway
                    .set_desired_capacity(&self.fleet_id, decision.new_capacity, false)
                    .await?;
                info!(
                    fleet = %self.fleet_id,
                    from = decision.previous_capacity,
                    to = decision.new_capacity,
                    reason = %decision.reason,
                    "scaled up"
                );
            }
            Outcome::ScaledDown => {
                self.gateway
                    .set_desired_capacity(&self.fleet_id, decision.new_capacity, true)
                    .await?;
                info!(
                    fleet = %self.fleet_id,
                    from = decision.previous_capacity,
                    to = decision.new_capacity,
                    reason = %decision.reason,
                    "scaled down"
                );
            }
            Outcome::NoChange | Outcome::Suppressed => {
                debug!(
                    fleet = %self.fleet_id,
                    outcome = decision.outcome.as_str(),
                    reason = %decision.reason,
                    "no capacity change"
                );
            }
        }

        self.metrics
            .record_decision(&self.fleet_id, alert.kind, &decision);

        Ok(decision)
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
