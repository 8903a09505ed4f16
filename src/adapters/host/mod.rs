//! Editor host adapters.
//!
//! Implementations of the `EditorHost` port:
//!
//! - `TracingHost` - Logs requests; used when no editor is attached
//! - `MockEditorHost` - Records requests for tests

mod mock;
mod tracing_host;

pub use mock::{HostCall, MockEditorHost};
pub use tracing_host::TracingHost;
