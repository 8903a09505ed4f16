//! WebSocket adapters for the preview bridge.
//!
//! Rendering surfaces connect here, announce the artifact they display and
//! send click positions. Clicks are resolved to source locations off the
//! connection's message loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Rendering surfaces (viewers)                     │
//! │   surface-a (main.pdf)   surface-b (appendix.pdf)   surface-c        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ ws://127.0.0.1:<port>
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         BridgeServer                                 │
//! │   - Binds an ephemeral loopback port                                 │
//! │   - Decodes frames into ClientMessage                                │
//! │   - open  → ClientRegistry                                          │
//! │   - click → SyncRelay (spawned per click)                           │
//! └─────────────────────────────────────────────────────────────────────┘
//!                 │                                   │
//!                 │ registers                         │ relays
//!                 ▼                                   ▼
//! ┌───────────────────────────────┐   ┌─────────────────────────────────┐
//! │        ClientRegistry         │   │   PositionMapper → EditorHost   │
//! │   /proj/main.pdf → surface-a  │   │   reveal source / show error    │
//! └───────────────────────────────┘   └─────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol types
//! - [`registry`] - Artifact → connection routing
//! - [`handler`] - Axum WebSocket upgrade handler
//! - [`server`] - Listener lifecycle and published endpoint

pub mod handler;
pub mod messages;
pub mod registry;
pub mod server;

pub use handler::{bridge_router, ws_handler, BridgeState};
pub use messages::{ClickMessage, ClientMessage, MessageError, OpenMessage, ServerMessage};
pub use registry::{ClientConnection, ClientId, ClientRegistry};
pub use server::{BridgeServer, EndpointHandle};
