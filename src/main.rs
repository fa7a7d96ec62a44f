use std::env;

use production_agents::{BoundSampler, ModelConfig, ProductionModel};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "PRODUCTION_MODEL_CONFIG";

const VAR_LOW: f64 = 0.75;
const VAR_HIGH: f64 = 1.25;
const VAR_MODE: f64 = 1.0;
// Mode outside [VAR_LOW, VAR_HIGH]; rejected when drawn.
const OUT_OF_RANGE_MODE: f64 = 0.25;

fn main()->Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Ok(path) = env::var(CONFIG_ENV) {
        let config = ModelConfig::from_json_file(&path)?;
        tracing::info!(%path, ?config, "running configured model");
        ProductionModel::from_config(&config).run(config.steps)?;
        return Ok(());
    }

    let random_func = BoundSampler::triangular(VAR_LOW, VAR_HIGH, VAR_MODE).shared();
    let mut my_model = ProductionModel::new(1, 10.0, Some(random_func));
    my_model.run(5)?;

    println!();

    let random_func = BoundSampler::uniform(VAR_LOW, VAR_HIGH).shared();
    let mut my_model = ProductionModel::new(2, 10.0, Some(random_func));
    my_model.run(5)?;

    println!();

    let random_func = BoundSampler::triangular(VAR_LOW, VAR_HIGH, OUT_OF_RANGE_MODE).shared();
    let mut my_model = ProductionModel::new(1, 10.0, Some(random_func));
    if let Err(err) = my_model.run(5) {
        tracing::warn!(%err, "triangular model with mode {OUT_OF_RANGE_MODE} stopped");
    }

    Ok(())
}
