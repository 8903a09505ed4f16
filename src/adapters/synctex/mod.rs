//! Position mapper adapters.
//!
//! - `SynctexMapper` - Runs the `synctex` executable
//! - `MockPositionMapper` - Scripted results for tests

mod invoker;
mod mock;
mod output;

pub use invoker::SynctexMapper;
pub use mock::MockPositionMapper;
pub use output::parse_edit_output;
