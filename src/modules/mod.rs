pub mod books;

use std::sync::Arc;

use verne_kernel::settings::Settings;
use verne_kernel::ModuleRegistry;

use books::client::HttpCatalogClient;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    let catalog = Arc::new(HttpCatalogClient::new(settings.catalog.endpoint.clone()));
    registry.register(books::create_module(catalog, &settings.ui));
}
