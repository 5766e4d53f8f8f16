use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use surge_controller::ScalingController;
use surge_core::{Alert, SurgeConfig};
use surge_engine::DecisionEngine;
use surge_gateway::{FleetGateway, LocalGateway};
use surge_metrics::{InMemorySink, ScalingMetrics};
use surge_state::StateStore;

pub async fn run(
    config_path: &Path,
    data_dir: &Path,
    alert_source: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = SurgeConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    let alert = read_alert(alert_source)?;

    let db_path = data_dir.join("surge.redb");
    let store = StateStore::open(&db_path)?;
    let gateway = LocalGateway::new(store);

    let decision = if dry_run {
        // Decide without the apply step: read through the gateway,
        // classify, and stop.
        let engine = DecisionEngine::new(&config)?;
        let fleet = gateway.read_fleet_state(&config.fleet.id).await?;
        let last_action = gateway.get_last_scaling_action(&config.fleet.id).await?;
        engine.decide(&fleet, &alert, last_action.as_ref(), epoch_secs())?
    } else {
        let sink = Arc::new(InMemorySink::new());
        let controller =
            ScalingController::new(&config, gateway, ScalingMetrics::new(sink))?;
        controller.handle_alert(&alert).await?
    };

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn read_alert(source: &str) -> anyhow::Result<Alert> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read alert from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read alert file {source}"))?
    };

    let alert: Alert = serde_json::from_str(&raw).context("malformed alert payload")?;
    alert.validate().context("invalid alert")?;
    Ok(alert)
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
