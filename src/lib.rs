//! Preview Sync - Keeps a rendered document preview in step with its source
//!
//! This crate implements a loopback bridge between an editor and the
//! rendering surfaces that display compiled artifacts, mapping clicks in the
//! preview back to source locations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
