//! Binary entrypoint for the classbind demo page.
use anyhow::Context;
use classbind_core::RegistryConfig;

fn main() -> anyhow::Result<()> {
    // Configuration file can be supplied with CLASSBIND_CONFIG
    let config = match std::env::var("CLASSBIND_CONFIG") {
        Ok(path) => RegistryConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => RegistryConfig::default(),
    };

    classbind_demo::init_tracing(&config.log_level);
    tracing::info!(marker = %config.marker_attribute, "starting demo page");

    let report = classbind_demo::run(config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
