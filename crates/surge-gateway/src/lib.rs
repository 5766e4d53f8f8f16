//! surge-gateway — the fleet provider seam.
//!
//! The decision engine never talks to a capacity provider directly; it
//! consumes fleet state and scaling history through the [`FleetGateway`]
//! trait and hands the apply step back to the caller. [`LocalGateway`]
//! implements the trait over the embedded state store for the standalone
//! control plane and tests; cloud-provider gateways live behind the same
//! trait as external integrations.

use std::future::Future;

use thiserror::Error;

use surge_core::{FleetState, ScalingAction};

mod local;

pub use local::LocalGateway;

/// Errors from a fleet gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("fleet not found: {0}")]
    FleetNotFound(String),

    #[error("fleet provider unavailable: {0}")]
    Unavailable(String),

    #[error("fleet provider rate limited: {0}")]
    RateLimited(String),

    #[error("state store error: {0}")]
    State(#[from] surge_state::StateError),
}

impl GatewayError {
    /// Whether the caller may retry the whole read-decide-apply cycle.
    /// Transient provider failures are; a missing fleet is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::Unavailable(_) | GatewayError::RateLimited(_)
        )
    }
}

/// Read and mutate fleet capacity through a provider.
///
/// Implementors are consumed generically by the controller; retry of
/// transient failures is the caller's concern, never the gateway's.
pub trait FleetGateway {
    /// Read the current capacity state of a fleet.
    fn read_fleet_state(
        &self,
        fleet_id: &str,
    ) -> impl Future<Output = Result<FleetState, GatewayError>> + Send;

    /// Request a new desired capacity. The provider clamps to the
    /// fleet's configured bounds and records the action.
    fn set_desired_capacity(
        &self,
        fleet_id: &str,
        new_capacity: u32,
        honor_cooldown: bool,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// The most recent scaling action on record, if any.
    fn get_last_scaling_action(
        &self,
        fleet_id: &str,
    ) -> impl Future<Output = Result<Option<ScalingAction>, GatewayError>> + Send;
}
