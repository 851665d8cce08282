//! Bookshelf application library
//!
//! Feature modules of the bookshelf service and the bootstrap that wires
//! them into the kernel registry and the HTTP server.

pub mod modules;

use anyhow::Context;
use bookshelf_kernel::{InitCtx, ModuleRegistry, Settings};

/// Re-export commonly used types
pub use modules::*;

/// Registry holding every module of the application.
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Run the modules and the HTTP server until ctrl-c.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry
        .stop_modules()
        .await
        .context("failed to stop modules")?;

    served
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
