//! Capacity planning.
//!
//! Computes target capacities clamped to configured bounds. Scale-up
//! amplifies the step on strong signals; scale-down is always a single
//! conservative step, biasing the fleet toward availability over cost
//! savings under uncertainty.

use surge_core::Severity;

/// A planned capacity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPlan {
    pub new_capacity: u32,
    /// `new_capacity - current`; zero when already at the bound.
    pub delta: i64,
}

/// Whether a single signal is strong enough to justify an aggressive
/// response: critical severity or classifier confidence above 90.
/// Either condition alone is sufficient.
pub fn strong_signal(severity: Severity, confidence: u8) -> bool {
    severity == Severity::Critical || confidence > 90
}

/// Plan a scale-up from `current`, doubling the step on strong signals.
pub fn plan_scale_up(
    current: u32,
    max: u32,
    base_increment: u32,
    severity: Severity,
    confidence: u8,
) -> CapacityPlan {
    let increment = if strong_signal(severity, confidence) {
        base_increment.saturating_mul(2)
    } else {
        base_increment
    };

    let new_capacity = current.saturating_add(increment).min(max);
    CapacityPlan {
        new_capacity,
        delta: i64::from(new_capacity) - i64::from(current),
    }
}

/// Plan a scale-down from `current`. Never amplified.
pub fn plan_scale_down(current: u32, min: u32, base_decrement: u32) -> CapacityPlan {
    let new_capacity = current.saturating_sub(base_decrement).max(min);
    CapacityPlan {
        new_capacity,
        delta: i64::from(new_capacity) - i64::from(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_low_confidence_uses_base_increment() {
        let plan = plan_scale_up(4, 10, 2, Severity::Warning, 50);
        assert_eq!(plan.new_capacity, 6);
        assert_eq!(plan.delta, 2);
    }

    #[test]
    fn critical_severity_doubles_increment() {
        let plan = plan_scale_up(4, 10, 2, Severity::Critical, 50);
        assert_eq!(plan.new_capacity, 8);
        assert_eq!(plan.delta, 4);
    }

    #[test]
    fn high_confidence_alone_doubles_increment() {
        let plan = plan_scale_up(4, 10, 2, Severity::Warning, 91);
        assert_eq!(plan.new_capacity, 8);
        assert_eq!(plan.delta, 4);
    }

    #[test]
    fn confidence_exactly_ninety_stays_base() {
        let plan = plan_scale_up(4, 10, 2, Severity::Warning, 90);
        assert_eq!(plan.delta, 2);
    }

    #[test]
    fn scale_up_clamps_to_max() {
        let plan = plan_scale_up(9, 10, 2, Severity::Warning, 50);
        assert_eq!(plan.new_capacity, 10);
        assert_eq!(plan.delta, 1);
    }

    #[test]
    fn scale_up_at_max_is_idempotent() {
        for _ in 0..3 {
            let plan = plan_scale_up(10, 10, 2, Severity::Critical, 99);
            assert_eq!(plan.new_capacity, 10);
            assert_eq!(plan.delta, 0);
        }
    }

    #[test]
    fn scale_up_stays_within_bounds() {
        for current in 2..=10 {
            let plan = plan_scale_up(current, 10, 2, Severity::Critical, 95);
            assert!(plan.new_capacity >= current);
            assert!(plan.new_capacity <= 10);
        }
    }

    #[test]
    fn scale_down_single_step() {
        let plan = plan_scale_down(6, 2, 1);
        assert_eq!(plan.new_capacity, 5);
        assert_eq!(plan.delta, -1);
    }

    #[test]
    fn scale_down_clamps_to_min() {
        let plan = plan_scale_down(3, 2, 5);
        assert_eq!(plan.new_capacity, 2);
        assert_eq!(plan.delta, -1);
    }

    #[test]
    fn scale_down_at_min_is_idempotent() {
        let plan = plan_scale_down(2, 2, 1);
        assert_eq!(plan.new_capacity, 2);
        assert_eq!(plan.delta, 0);
    }

    #[test]
    fn scale_down_stays_within_bounds() {
        for current in 2..=10 {
            let plan = plan_scale_down(current, 2, 1);
            assert!(plan.new_capacity <= current);
            assert!(plan.new_capacity >= 2);
        }
    }
}
