use anyhow::Context;
use verne_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Verne settings")?;
    verne_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        catalog = %settings.catalog.endpoint,
        "verne-app bootstrap starting"
    );

    verne_app::serve(&settings).await?;

    tracing::info!("verne-app shut down");
    Ok(())
}
