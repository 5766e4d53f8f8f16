//! redb table definitions for the Surge state store.
//!
//! Both tables use `&str` keys (the fleet id) and `&[u8]` values
//! (JSON-serialized domain types).

use redb::TableDefinition;

/// Fleet capacity records keyed by fleet id.
pub const FLEETS: TableDefinition<&str, &[u8]> = TableDefinition::new("fleets");

/// Most recent scaling action keyed by fleet id. Only the latest action
/// is kept; long-term history lives elsewhere.
pub const ACTIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("actions");
