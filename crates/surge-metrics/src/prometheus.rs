//! Prometheus text exposition format.
//!
//! Renders recorded metric events into the Prometheus text exposition
//! format for scraping. Counters are summed per label set; gauges keep
//! the most recent value per label set.

use crate::emitter::{MetricEvent, MetricKind};

/// Render recorded events into Prometheus text format.
pub fn render_prometheus(events: &[MetricEvent]) -> String {
    let activity = aggregate(events, "ScalingActivity", MetricKind::Counter);
    let capacity = aggregate(events, "CapacityChange", MetricKind::Gauge);

    let mut out = String::new();

    out.push_str("# HELP surge_scaling_activity_total Scaling decisions evaluated.\n");
    out.push_str("# TYPE surge_scaling_activity_total counter\n");
    for (labels, value) in &activity {
        out.push_str(&format!("surge_scaling_activity_total{{{labels}}} {value}\n"));
    }

    out.push_str("# HELP surge_capacity_change Capacity delta of the latest decision.\n");
    out.push_str("# TYPE surge_capacity_change gauge\n");
    for (labels, value) in &capacity {
        out.push_str(&format!("surge_capacity_change{{{labels}}} {value}\n"));
    }

    out
}

/// Collapse events for one metric into (label set, value) rows.
///
/// Rows keep first-seen order so repeated renders are stable.
fn aggregate(events: &[MetricEvent], name: &str, kind: MetricKind) -> Vec<(String, i64)> {
    let mut rows: Vec<(String, i64)> = Vec::new();
    for event in events.iter().filter(|e| e.name == name) {
        let labels = render_labels(event);
        match rows.iter_mut().find(|(l, _)| *l == labels) {
            Some((_, value)) => match kind {
                MetricKind::Counter => *value += event.value,
                MetricKind::Gauge => *value = event.value,
            },
            None => rows.push((labels, event.value)),
        }
    }
    rows
}

fn render_labels(event: &MetricEvent) -> String {
    event
        .dims
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect::<Vec<_>>()
        .join(",")
}
