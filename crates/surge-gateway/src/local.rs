//! LocalGateway — fleet gateway over the embedded state store.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use surge_core::{FleetState, ScaleDirection, ScalingAction};
use surge_state::StateStore;

use crate::{FleetGateway, GatewayError};

/// Gateway backed by the local state store.
///
/// Capacity writes clamp to the fleet's bounds, stamp the request time,
/// and replace the last-action record so the next decision's cooldown
/// check sees this write.
#[derive(Clone)]
pub struct LocalGateway {
    store: StateStore,
}

impl LocalGateway {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }
}

impl FleetGateway for LocalGateway {
    async fn read_fleet_state(&self, fleet_id: &str) -> Result<FleetState, GatewayError> {
        self.store
            .get_fleet(fleet_id)?
            .ok_or_else(|| GatewayError::FleetNotFound(fleet_id.to_string()))
    }

    async fn set_desired_capacity(
        &self,
        fleet_id: &str,
        new_capacity: u32,
        honor_cooldown: bool,
    ) -> Result<(), GatewayError> {
        let mut fleet = self
            .store
            .get_fleet(fleet_id)?
            .ok_or_else(|| GatewayError::FleetNotFound(fleet_id.to_string()))?;

        // Concurrent callers may decide from stale snapshots; the write
        // itself stays inside the configured bounds.
        let clamped = new_capacity.clamp(fleet.min_capacity, fleet.max_capacity);
        let direction = if clamped >= fleet.desired_capacity {
            ScaleDirection::Up
        } else {
            ScaleDirection::Down
        };
        let previous = fleet.desired_capacity;
        fleet.desired_capacity = clamped;
        self.store.put_fleet(fleet_id, &fleet)?;

        let action = ScalingAction {
            direction,
            requested_at: epoch_secs(),
            honored_cooldown: honor_cooldown,
        };
        self.store.put_last_action(fleet_id, &action)?;

        info!(
            fleet = %fleet_id,
            from = previous,
            to = clamped,
            honor_cooldown,
            "desired capacity set"
        );
        Ok(())
    }

    async fn get_last_scaling_action(
        &self,
        fleet_id: &str,
    ) -> Result<Option<ScalingAction>, GatewayError> {
        Ok(self.store.get_last_action(fleet_id)?)
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_gateway() -> LocalGateway {
        LocalGateway::new(StateStore::open_in_memory().unwrap())
    }

    fn test_fleet(desired: u32) -> FleetState {
        FleetState {
            desired_capacity: desired,
            min_capacity: 2,
            max_capacity: 10,
            running_count: desired,
        }
    }

    fn register(gateway: &LocalGateway, id: &str, desired: u32) {
        gateway.store.put_fleet(id, &test_fleet(desired)).unwrap();
    }

    #[tokio::test]
    async fn read_missing_fleet_is_not_found() {
        let gateway = test_gateway();
        let result = gateway.read_fleet_state("nope").await;
        assert!(matches!(result, Err(GatewayError::FleetNotFound(_))));
    }

    #[tokio::test]
    async fn capacity_write_updates_fleet_and_records_action() {
        let gateway = test_gateway();
        register(&gateway, "prod", 4);

        gateway.set_desired_capacity("prod", 8, false).await.unwrap();

        let fleet = gateway.read_fleet_state("prod").await.unwrap();
        assert_eq!(fleet.desired_capacity, 8);

        let action = gateway
            .get_last_scaling_action("prod")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action.direction, ScaleDirection::Up);
        assert!(!action.honored_cooldown);
        assert!(action.requested_at > 0);
    }

    #[tokio::test]
    async fn capacity_write_clamps_to_bounds() {
        let gateway = test_gateway();
        register(&gateway, "prod", 4);

        gateway.set_desired_capacity("prod", 50, false).await.unwrap();
        assert_eq!(
            gateway.read_fleet_state("prod").await.unwrap().desired_capacity,
            10
        );

        gateway.set_desired_capacity("prod", 0, true).await.unwrap();
        assert_eq!(
            gateway.read_fleet_state("prod").await.unwrap().desired_capacity,
            2
        );
    }

    #[tokio::test]
    async fn scale_down_records_down_direction() {
        let gateway = test_gateway();
        register(&gateway, "prod", 6);

        gateway.set_desired_capacity("prod", 5, true).await.unwrap();

        let action = gateway
            .get_last_scaling_action("prod")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action.direction, ScaleDirection::Down);
        assert!(action.honored_cooldown);
    }

    #[tokio::test]
    async fn no_history_reads_as_none() {
        let gateway = test_gateway();
        register(&gateway, "prod", 4);
        assert!(gateway
            .get_last_scaling_action("prod")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn write_to_missing_fleet_is_not_found() {
        let gateway = test_gateway();
        let result = gateway.set_desired_capacity("nope", 5, false).await;
        assert!(matches!(result, Err(GatewayError::FleetNotFound(_))));
    }

    #[test]
    fn retryable_classification() {
        assert!(GatewayError::Unavailable("503".to_string()).is_retryable());
        assert!(GatewayError::RateLimited("throttled".to_string()).is_retryable());
        assert!(!GatewayError::FleetNotFound("prod".to_string()).is_retryable());
    }
}
