//! Full scaling-cycle regression tests.
//!
//! Drives the controller end to end over the local gateway and an
//! in-memory store: decide, apply, record, emit.

use std::sync::Arc;

use surge_controller::{ControllerError, ScalingController};
use surge_core::{
    Alert, AlertAction, AlertKind, FleetState, Outcome, Severity, SurgeConfig,
};
use surge_gateway::{GatewayError, LocalGateway};
use surge_metrics::{InMemorySink, ScalingMetrics};
use surge_state::StateStore;

struct Harness {
    controller: ScalingController<LocalGateway>,
    store: StateStore,
    sink: Arc<InMemorySink>,
}

fn harness_with_capacity(desired: u32) -> Harness {
    let config = SurgeConfig::scaffold("prod");
    let store = StateStore::open_in_memory().unwrap();
    store
        .put_fleet(
            "prod",
            &FleetState {
                desired_capacity: desired,
                min_capacity: 2,
                max_capacity: 10,
                running_count: desired,
            },
        )
        .unwrap();

    let sink = Arc::new(InMemorySink::new());
    let controller = ScalingController::new(
        &config,
        LocalGateway::new(store.clone()),
        ScalingMetrics::new(sink.clone()),
    )
    .unwrap();

    Harness {
        controller,
        store,
        sink,
    }
}

fn alert(action: AlertAction, severity: Severity, confidence: u8) -> Alert {
    Alert {
        action,
        kind: AlertKind::Cpu,
        severity,
        confidence,
        metric_value: Some("85%".to_string()),
        reasoning: None,
    }
}

#[tokio::test]
async fn scale_up_applies_capacity_and_records_action() {
    let h = harness_with_capacity(4);

    let decision = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Critical, 95))
        .await
        .unwrap();

    assert_eq!(decision.outcome, Outcome::ScaledUp);
    assert_eq!(decision.new_capacity, 8);
    assert_eq!(decision.delta, 4);

    // The write landed in the registry.
    let fleet = h.store.get_fleet("prod").unwrap().unwrap();
    assert_eq!(fleet.desired_capacity, 8);

    // A scale-up apply does not ask the provider to honor cooldown.
    let action = h.store.get_last_action("prod").unwrap().unwrap();
    assert!(!action.honored_cooldown);
}

#[tokio::test]
async fn second_weak_request_is_suppressed_by_cooldown() {
    let h = harness_with_capacity(4);

    let first = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Warning, 50))
        .await
        .unwrap();
    assert_eq!(first.outcome, Outcome::ScaledUp);

    // Immediately after the apply the cooldown window is open.
    let second = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Warning, 50))
        .await
        .unwrap();
    assert_eq!(second.outcome, Outcome::Suppressed);
    assert!(second.reason.contains("cooldown"));

    // Capacity untouched by the suppressed request.
    let fleet = h.store.get_fleet("prod").unwrap().unwrap();
    assert_eq!(fleet.desired_capacity, 6);
}

#[tokio::test]
async fn critical_alert_overrides_cooldown() {
    let h = harness_with_capacity(4);

    h.controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Warning, 50))
        .await
        .unwrap();

    let second = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Critical, 50))
        .await
        .unwrap();

    assert_eq!(second.outcome, Outcome::ScaledUp);
    assert_eq!(second.previous_capacity, 6);
    assert_eq!(second.new_capacity, 10);
}

#[tokio::test]
async fn scale_down_inside_cooldown_stays_suppressed() {
    let h = harness_with_capacity(4);

    h.controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Critical, 95))
        .await
        .unwrap();

    // Even a strong shrink signal has no override path.
    let down = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleDown, Severity::Critical, 99))
        .await
        .unwrap();

    assert_eq!(down.outcome, Outcome::Suppressed);
}

#[tokio::test]
async fn scale_up_clamps_at_ceiling() {
    let h = harness_with_capacity(9);

    let decision = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Warning, 50))
        .await
        .unwrap();

    assert_eq!(decision.outcome, Outcome::ScaledUp);
    assert_eq!(decision.new_capacity, 10);
    assert_eq!(decision.delta, 1);
}

#[tokio::test]
async fn scale_down_at_floor_is_no_change() {
    let h = harness_with_capacity(2);

    let decision = h
        .controller
        .handle_alert(&alert(AlertAction::ScaleDown, Severity::Warning, 50))
        .await
        .unwrap();

    assert_eq!(decision.outcome, Outcome::NoChange);
    assert_eq!(decision.delta, 0);

    // No apply, so no action on record.
    assert!(h.store.get_last_action("prod").unwrap().is_none());
}

#[tokio::test]
async fn analyze_reads_but_never_writes() {
    let h = harness_with_capacity(4);

    let decision = h
        .controller
        .handle_alert(&alert(AlertAction::Analyze, Severity::Critical, 99))
        .await
        .unwrap();

    assert_eq!(decision.outcome, Outcome::NoChange);
    assert_eq!(h.store.get_fleet("prod").unwrap().unwrap().desired_capacity, 4);
    assert!(h.store.get_last_action("prod").unwrap().is_none());
}

#[tokio::test]
async fn missing_fleet_propagates_not_found() {
    let config = SurgeConfig::scaffold("ghost");
    let store = StateStore::open_in_memory().unwrap();
    let controller = ScalingController::new(
        &config,
        LocalGateway::new(store),
        ScalingMetrics::new(Arc::new(InMemorySink::new())),
    )
    .unwrap();

    let result = controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Warning, 50))
        .await;

    match result {
        Err(ControllerError::Gateway(GatewayError::FleetNotFound(id))) => {
            assert_eq!(id, "ghost");
        }
        other => panic!("expected FleetNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn every_cycle_emits_metrics() {
    let h = harness_with_capacity(4);

    h.controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Critical, 95))
        .await
        .unwrap();
    h.controller
        .handle_alert(&alert(AlertAction::ScaleUp, Severity::Warning, 50))
        .await
        .unwrap();

    // Two cycles: one scaled_up, one suppressed. Both counted.
    assert_eq!(h.sink.counter_total("ScalingActivity"), 2);

    let events = h.sink.events();
    let change = events
        .iter()
        .find(|e| e.name == "CapacityChange")
        .unwrap();
    assert_eq!(change.value, 4);
}

#[tokio::test]
async fn validation_failure_is_not_retryable() {
    let h = harness_with_capacity(4);

    let mut bad = alert(AlertAction::ScaleUp, Severity::Warning, 50);
    bad.confidence = 120;

    let err = h.controller.handle_alert(&bad).await.unwrap_err();
    assert!(matches!(err, ControllerError::Validation(_)));
    assert!(!err.is_retryable());
}

#[test]
fn gateway_unavailable_is_retryable() {
    let err = ControllerError::Gateway(GatewayError::Unavailable("503".to_string()));
    assert!(err.is_retryable());
}
