//! # k8scan common
//!
//! Shared models for the scanner: the immutable run configuration, network
//! blocks and port sets the dispatcher enumerates, and the findings it emits.

pub mod config;
pub mod error;
pub mod finding;
pub mod network;
