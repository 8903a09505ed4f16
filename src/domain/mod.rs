//! Domain layer containing preview synchronization types.
//!
//! # Module Organization
//!
//! - `preview` - Identities, positions, display slots and bootstrap rendering

pub mod preview;
