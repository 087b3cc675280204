//! Binary entrypoint for the Forms API server.
use forms_api::run;
use forms_core::EngineConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // FORMS_CONFIG names a YAML file; FORMS_ADDR overrides the listen address
    let config = EngineConfig::from_env()?;
    run(config).await
}
