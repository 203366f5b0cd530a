use async_trait::async_trait;
use axum::Router;

/// Context handed to modules at each lifecycle step
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// A unit of pages the server mounts under `/{name}`
#[async_trait]
pub trait Module: Sync + Send {
    /// Path segment and log label for the module
    fn name(&self) -> &'static str;

    /// Runs once at startup, before the listener binds
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
    }

    /// Runs after every module has been initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the server has drained, in reverse registration order
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
