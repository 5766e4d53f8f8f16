use std::path::Path;

use anyhow::Context;

use surge_core::FleetState;
use surge_state::StateStore;

fn open_store(data_dir: &Path) -> anyhow::Result<StateStore> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let db_path = data_dir.join("surge.redb");
    Ok(StateStore::open(&db_path)?)
}

pub fn register(
    data_dir: &Path,
    id: &str,
    min: u32,
    max: u32,
    desired: u32,
    running: Option<u32>,
) -> anyhow::Result<()> {
    let fleet = FleetState {
        desired_capacity: desired,
        min_capacity: min,
        max_capacity: max,
        running_count: running.unwrap_or(desired),
    };
    fleet.validate().context("invalid fleet state")?;

    let store = open_store(data_dir)?;
    store.put_fleet(id, &fleet)?;

    println!("✓ Registered fleet '{id}'");
    println!("  Desired: {desired}, bounds: [{min}, {max}]");
    Ok(())
}

pub fn status(data_dir: &Path, id: &str) -> anyhow::Result<()> {
    let store = open_store(data_dir)?;
    let fleet = store
        .get_fleet(id)?
        .with_context(|| format!("fleet not found: {id}"))?;

    println!("{}", serde_json::to_string_pretty(&fleet)?);

    match store.get_last_action(id)? {
        Some(action) => println!("last action: {}", serde_json::to_string(&action)?),
        None => println!("last action: none"),
    }
    Ok(())
}

pub fn list(data_dir: &Path) -> anyhow::Result<()> {
    let store = open_store(data_dir)?;
    let fleets = store.list_fleets()?;

    if fleets.is_empty() {
        println!("No fleets registered.");
        return Ok(());
    }

    for (id, fleet) in fleets {
        println!(
            "{id}  desired={} running={} bounds=[{}, {}]",
            fleet.desired_capacity, fleet.running_count, fleet.min_capacity, fleet.max_capacity
        );
    }
    Ok(())
}
