//! Preview module - the vocabulary of preview synchronization.
//!
//! - [`identity`] - source documents, artifacts and preview URIs
//! - [`slot`] - editor columns a preview can occupy
//! - [`position`] - mapper queries and results
//! - [`bootstrap`] - the document that boots a rendering surface
//! - [`notification`] - re-fetch notifications for the host

pub mod bootstrap;
mod errors;
pub mod identity;
pub mod notification;
pub mod position;
pub mod slot;

pub use bootstrap::{render_bootstrap, BootstrapPayload, BridgeEndpoint};
pub use errors::PreviewError;
pub use identity::{ArtifactIdentity, ArtifactNaming, PreviewUri, SourceDocument};
pub use notification::ChangeNotification;
pub use position::{FailureKind, FailureReport, MapperQuery, MapperResult, SourceLocation};
pub use slot::DisplaySlot;
