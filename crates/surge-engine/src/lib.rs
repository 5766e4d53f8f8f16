//! surge-engine — the autoscaling decision core.
//!
//! Given current fleet state, an alert classification, and the most
//! recent scaling action, computes a target capacity, enforces safety
//! bounds, and determines whether a cooldown suppresses the action.
//!
//! # Decision Algorithm
//!
//! ```text
//! action = alert.action (scale_up | scale_down | analyze)
//!
//! analyze:
//!     NoChange, no planner call
//!
//! scale_up:
//!     override = severity == critical OR confidence > 90
//!     suppressed by cooldown (unless override) → Suppressed
//!     increment = 2 × base on strong signal, else base
//!     new = min(current + increment, max)
//!
//! scale_down:
//!     suppressed by cooldown (no override path) → Suppressed
//!     new = max(current − decrement, min)   // never amplified
//!
//! delta == 0 → NoChange (already at the relevant bound)
//! ```
//!
//! The engine holds no shared mutable state and performs no I/O; every
//! decision is a pure, synchronous computation over its arguments. All
//! cross-call memory (last action time, current capacity) is owned by
//! the caller and injected as input.

pub mod cooldown;
pub mod engine;
pub mod planner;

pub use cooldown::CooldownStatus;
pub use engine::DecisionEngine;
pub use planner::CapacityPlan;
