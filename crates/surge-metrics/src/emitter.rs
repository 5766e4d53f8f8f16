//! Metric events, sinks, and the scaling-metrics recorder.

use std::sync::{Arc, Mutex};

use tracing::warn;

use surge_core::{AlertKind, Decision};

/// Metric type in the exposition sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

/// A single metric observation with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEvent {
    pub name: &'static str,
    pub kind: MetricKind,
    pub value: i64,
    /// Dimension name/value pairs, in emission order.
    pub dims: Vec<(&'static str, String)>,
}

/// Destination for metric events.
///
/// `record` is synchronous and should be cheap; a sink that forwards to
/// a remote system buffers internally. Failures are reported back so
/// the recorder can log them, but they never reach the scaling path.
pub trait MetricsSink: Send + Sync {
    fn record(&self, event: &MetricEvent) -> anyhow::Result<()>;
}

/// Records scaling activity against a sink, swallowing sink failures.
#[derive(Clone)]
pub struct ScalingMetrics {
    sink: Arc<dyn MetricsSink>,
}

impl ScalingMetrics {
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self { sink }
    }

    /// Emit the per-decision events: a `ScalingActivity` count and the
    /// signed `CapacityChange` delta.
    pub fn record_decision(&self, fleet_id: &str, alert_kind: AlertKind, decision: &Decision) {
        self.emit(MetricEvent {
            name: "ScalingActivity",
            kind: MetricKind::Counter,
            value: 1,
            dims: vec![
                ("fleet_id", fleet_id.to_string()),
                ("alert_kind", alert_kind.as_str().to_string()),
                ("outcome", decision.outcome.as_str().to_string()),
            ],
        });
        self.emit(MetricEvent {
            name: "CapacityChange",
            kind: MetricKind::Gauge,
            value: decision.delta,
            dims: vec![
                ("fleet_id", fleet_id.to_string()),
                ("outcome", decision.outcome.as_str().to_string()),
            ],
        });
    }

    fn emit(&self, event: MetricEvent) {
        if let Err(e) = self.sink.record(&event) {
            warn!(metric = event.name, error = %e, "metrics sink rejected event");
        }
    }
}

/// Aggregating in-memory sink, for tests and local exposition.
#[derive(Default)]
pub struct InMemorySink {
    events: Mutex<Vec<MetricEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in emission order.
    pub fn events(&self) -> Vec<MetricEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Sum of all counter values recorded under `name`.
    pub fn counter_total(&self, name: &str) -> i64 {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == MetricKind::Counter && e.name == name)
            .map(|e| e.value)
            .sum()
    }
}

impl MetricsSink for InMemorySink {
    fn record(&self, event: &MetricEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
