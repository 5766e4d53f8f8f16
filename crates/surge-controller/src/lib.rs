//! surge-controller — the full scaling cycle for one fleet.
//!
//! Assembles the decision engine, a fleet gateway, and the metrics
//! recorder into a single `handle_alert` entry point:
//!
//! ```text
//! read fleet state → read last action → decide → apply → emit metrics
//! ```
//!
//! The cycle is serialized per fleet so two concurrent alerts cannot
//! both scale from the same stale snapshot.

pub mod controller;
pub mod error;

pub use controller::ScalingController;
pub use error::{ControllerError, ControllerResult};
