//! Application layer - Orchestration between the bridge and the host.
//!
//! This layer coordinates domain operations across ports. It owns no I/O of
//! its own; every external effect goes through a port.
//!
//! - `SyncRelay` - Turns mapper outcomes into host navigation or errors
//! - `PreviewContentProvider` - Bootstrap documents and change notifications
//! - `PreviewLauncher` - Shows previews and reveals their sources

mod content_provider;
mod launcher;
mod sync_relay;

pub use content_provider::PreviewContentProvider;
pub use launcher::PreviewLauncher;
pub use sync_relay::SyncRelay;
