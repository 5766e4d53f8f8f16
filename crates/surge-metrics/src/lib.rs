//! surge-metrics — best-effort scaling observability.
//!
//! Every decision cycle emits a `ScalingActivity` counter and a
//! `CapacityChange` gauge. Emission is best-effort by contract: a
//! failing sink is logged and swallowed, never propagated into the
//! scaling path.

pub mod emitter;
pub mod prometheus;

pub use emitter::{InMemorySink, MetricEvent, MetricKind, MetricsSink, ScalingMetrics};
pub use prometheus::render_prometheus;
