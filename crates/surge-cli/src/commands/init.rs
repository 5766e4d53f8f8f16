use std::path::Path;

use anyhow::Context;

use surge_core::SurgeConfig;

pub fn run(config_path: &Path, fleet_id: &str) -> anyhow::Result<()> {
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let config = SurgeConfig::scaffold(fleet_id);
    let rendered = config.to_toml_string()?;
    std::fs::write(config_path, rendered)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    println!("✓ Wrote {}", config_path.display());
    println!("  Fleet: {fleet_id}");
    println!(
        "  Bounds: [{}, {}], cooldown: {}s",
        config.fleet.min_capacity, config.fleet.max_capacity, config.scaling.cooldown_seconds
    );
    Ok(())
}
