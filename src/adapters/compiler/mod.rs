//! Artifact compiler adapters.
//!
//! - `CommandCompiler` - Runs the configured build command
//! - `MockCompiler` - Counts compile requests for tests

mod command;
mod mock;

pub use command::CommandCompiler;
pub use mock::MockCompiler;
