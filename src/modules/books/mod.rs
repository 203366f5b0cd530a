pub mod client;
pub mod form;
pub mod listing;
pub mod models;
pub mod pages;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use verne_kernel::settings::UiSettings;
use verne_kernel::{InitCtx, Module};

use crate::utils;
use client::CatalogApi;
use routes::BooksState;

/// Path the module's pages are served under.
pub const MOUNT_PATH: &str = "/books";

/// Catalog pages: listing, search and admin book creation.
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(catalog: Arc<dyn CatalogApi>, ui: &UiSettings) -> Self {
        Self {
            state: BooksState {
                catalog,
                role: ui.role,
                site_title: Arc::from(ui.site_title.as_str()),
            },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            target: "verne::modules",
            module = self.name(),
            prefix = %utils::log_target(self.name()),
            catalog = %ctx.settings.catalog.endpoint,
            role = %self.state.role,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_page).post(routes::create_book))
            .route("/health", get(routes::health_check))
            .with_state(self.state.clone())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(target: "verne::modules", module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(target: "verne::modules", module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(catalog: Arc<dyn CatalogApi>, ui: &UiSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(catalog, ui))
}
