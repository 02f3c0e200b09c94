use invalidator_config::load_config;
use invalidator_config::shared::InvalidatorConfig;

/// Loads the [`InvalidatorConfig`] and validates it.
pub fn load_invalidator_config() -> anyhow::Result<InvalidatorConfig> {
    let config = load_config::<InvalidatorConfig>()?;
    config.validate()?;

    Ok(config)
}
