//! surge-state — embedded state store for the Surge control plane.
//!
//! Backed by [redb](https://docs.rs/redb), holds the caller-side memory
//! the decision engine deliberately does not: the fleet registry and
//! the most recent scaling action per fleet. Values are JSON-serialized
//! into redb's `&[u8]` columns, keyed by fleet id.
//!
//! The `StateStore` is `Clone` + `Send` + `Sync` (backed by
//! `Arc<Database>`) and can be shared across async tasks.

pub mod error;
pub mod store;
pub mod tables;

pub use error::{StateError, StateResult};
pub use store::StateStore;
