//! Verne application library
//!
//! Catalog pages and the bootstrap that wires them into the HTTP server.

pub mod modules;
pub mod utils;

use anyhow::Context;
use verne_kernel::settings::Settings;
use verne_kernel::{InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Build the registry, run the module lifecycle and serve until shutdown.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);

    let ctx = InitCtx { settings };
    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module start failed")?;

    let served = verne_http::start_server(&registry, settings).await;

    registry.stop_all().await.context("module stop failed")?;
    served
}
