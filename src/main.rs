//! `preview-sync` - runs the preview bridge standalone.
//!
//! Starts the bridge, prints the bootstrap document for every source path
//! given on the command line, and serves rendering surfaces until Ctrl-C.
//! Host requests (reveal source, errors) are written to the log.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use preview_sync::adapters::{
    BridgeServer, CommandCompiler, LocalArtifactStore, SynctexMapper, TracingHost,
};
use preview_sync::application::{PreviewContentProvider, PreviewLauncher, SyncRelay};
use preview_sync::config::{AppConfig, ConfigError};
use preview_sync::domain::preview::SourceDocument;
use preview_sync::ports::EditorHost;

/// Set to any value to log as JSON lines.
const LOG_JSON_VAR: &str = "PREVIEW_SYNC_LOG_JSON";

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json = std::env::var_os(LOG_JSON_VAR).is_some();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    init_tracing(&config.bridge.log_level);

    let host: Arc<dyn EditorHost> = Arc::new(TracingHost::new());
    let relay = Arc::new(SyncRelay::new(
        Arc::new(SynctexMapper::new(&config.mapper)),
        host.clone(),
    ));

    let server = BridgeServer::new(&config.bridge, relay);
    let endpoint = server.start().await?;

    let provider = Arc::new(PreviewContentProvider::new(
        Arc::new(server.endpoint_handle()),
        host.clone(),
        &config.preview,
    ));
    let launcher = PreviewLauncher::new(
        host,
        Arc::new(LocalArtifactStore::new()),
        Arc::new(CommandCompiler::new(&config.compiler)),
        provider.clone(),
        &config.preview,
    );

    let cwd = std::env::current_dir()?;
    for arg in std::env::args_os().skip(1) {
        let source = match SourceDocument::new(cwd.join(PathBuf::from(arg))) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Skipping argument: {}", e);
                continue;
            }
        };

        let preview = launcher.open(Some(source.clone()), None).await?;
        let payload = provider.provide(&source)?;
        tracing::info!(preview = %preview, "Bootstrap document ready");
        println!("{}", payload);
    }

    tracing::info!(endpoint = %endpoint, "Waiting for rendering surfaces (Ctrl-C to quit)");
    tokio::signal::ctrl_c().await?;

    server.stop().await;
    Ok(())
}
