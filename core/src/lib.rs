//! # k8scan core
//!
//! The scan engine: reachability gate, HTTP signature prober, ownership
//! registry, notifier, and the dispatcher tying them together.

pub mod network;
pub mod notify;
pub mod registry;
pub mod scanner;
pub mod signature;
