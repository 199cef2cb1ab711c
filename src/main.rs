use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, RouterOptions, build_router};
use folio_core::{
    CoreConfig, LocalFs, ResourceStore,
    config::{deployment_mode_from_env_value, number_from_env_value},
    constants::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_UPLOAD_DIR},
};

/// Main entry point for the Folio server
///
/// Resolves configuration once, makes sure the storage roots exist and serves the REST API
/// together with the public tree (so project logo URLs resolve).
///
/// # Environment Variables
/// - `PORT`: listening port (default: 3020)
/// - `FOLIO_BIND_HOST`: listening host (default: "0.0.0.0")
/// - `FOLIO_ENV`: `development` or `production` (default: production)
/// - `FOLIO_PUBLIC_DIR`: root of `posts/` and `projects/` (default: "public")
/// - `FOLIO_UPLOAD_DIR`: temporary upload directory (default: "uploads")
/// - `FOLIO_MAX_UPLOAD_BYTES`: request body limit (default: 10 MiB)
///
/// # Errors
/// Returns an error if:
/// - a variable holds an invalid value,
/// - the storage or upload directories cannot be created, or
/// - the address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio_run=info".parse()?)
                .add_directive("folio_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = number_from_env_value("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)?;
    let host = std::env::var("FOLIO_BIND_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let mode = deployment_mode_from_env_value(std::env::var("FOLIO_ENV").ok());
    let max_upload_bytes = number_from_env_value(
        "FOLIO_MAX_UPLOAD_BYTES",
        std::env::var("FOLIO_MAX_UPLOAD_BYTES").ok(),
        DEFAULT_MAX_UPLOAD_BYTES,
    )?;
    let public_dir = PathBuf::from(
        std::env::var("FOLIO_PUBLIC_DIR").unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.into()),
    );
    let upload_dir = PathBuf::from(
        std::env::var("FOLIO_UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into()),
    );

    let cfg = CoreConfig::new(public_dir, upload_dir, mode, port);

    std::fs::create_dir_all(cfg.upload_dir()).map_err(|e| {
        anyhow::anyhow!(
            "cannot create upload directory {}: {e}",
            cfg.upload_dir().display()
        )
    })?;
    let store = ResourceStore::open(Arc::new(LocalFs::new()), &cfg)?;

    let options = RouterOptions {
        max_upload_bytes,
        permissive_cors: cfg.mode().is_development(),
        static_dir: Some(cfg.public_dir().to_path_buf()),
    };
    let app = build_router(AppState::new(store, cfg.upload_dir()), &options);

    let addr = format!("{host}:{port}");
    tracing::info!("++ Starting Folio ({}) on {}", cfg.mode(), addr);
    tracing::info!("++ Serving {}", cfg.public_dir().display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
