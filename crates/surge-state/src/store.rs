//! StateStore — redb-backed persistence for the Surge control plane.
//!
//! Holds fleet capacity records and the most recent scaling action per
//! fleet. All values are JSON-serialized into redb's `&[u8]` value
//! columns, keyed by fleet id. The store supports both on-disk and
//! in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use surge_core::{FleetState, ScalingAction};

use crate::error::{StateError, StateResult};
use crate::tables::{ACTIONS, FLEETS};

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe state store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl StateStore {
    /// Open (or create) a persistent state store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory state store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(FLEETS).map_err(map_err!(Table))?;
        txn.open_table(ACTIONS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Fleets ─────────────────────────────────────────────────────

    /// Insert or update a fleet record.
    pub fn put_fleet(&self, fleet_id: &str, state: &FleetState) -> StateResult<()> {
        let value = serde_json::to_vec(state).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(FLEETS).map_err(map_err!(Table))?;
            table
                .insert(fleet_id, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%fleet_id, "fleet stored");
        Ok(())
    }

    /// Get a fleet record by id.
    pub fn get_fleet(&self, fleet_id: &str) -> StateResult<Option<FleetState>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(FLEETS).map_err(map_err!(Table))?;
        match table.get(fleet_id).map_err(map_err!(Read))? {
            Some(guard) => {
                let state: FleetState =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// List all registered fleets as (id, state) pairs.
    pub fn list_fleets(&self) -> StateResult<Vec<(String, FleetState)>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(FLEETS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            let state: FleetState =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push((key.value().to_string(), state));
        }
        Ok(results)
    }

    /// Delete a fleet and its action record. Returns true if it existed.
    pub fn delete_fleet(&self, fleet_id: &str) -> StateResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut fleets = txn.open_table(FLEETS).map_err(map_err!(Table))?;
            existed = fleets.remove(fleet_id).map_err(map_err!(Write))?.is_some();
            let mut actions = txn.open_table(ACTIONS).map_err(map_err!(Table))?;
            actions.remove(fleet_id).map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%fleet_id, existed, "fleet deleted");
        Ok(existed)
    }

    // ── Scaling actions ────────────────────────────────────────────

    /// Record the most recent scaling action for a fleet, replacing any
    /// previous record.
    pub fn put_last_action(&self, fleet_id: &str, action: &ScalingAction) -> StateResult<()> {
        let value = serde_json::to_vec(action).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(ACTIONS).map_err(map_err!(Table))?;
            table
                .insert(fleet_id, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%fleet_id, requested_at = action.requested_at, "scaling action recorded");
        Ok(())
    }

    /// Get the most recent scaling action for a fleet, if any.
    pub fn get_last_action(&self, fleet_id: &str) -> StateResult<Option<ScalingAction>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(ACTIONS).map_err(map_err!(Table))?;
        match table.get(fleet_id).map_err(map_err!(Read))? {
            Some(guard) => {
                let action: ScalingAction =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(action))
            }
            None => Ok(None),
        }
    }
}
