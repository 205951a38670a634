//! Sharekey - ephemeral content sharing behind human-memorable keys
//!
//! A client submits a URL, a text snippet, or a file and receives a short
//! key drawn from a word pool; visiting the key redirects, displays, or
//! downloads the content. Entries expire after a fixed retention window and
//! their keys return to the pool.
//!
//! # Architecture
//! - `store`: key/item store, word pool, upload file storage, expiry sweeper
//! - `api`: HTTP services (create, retrieve, frontend, health)
//! - `config`: configuration management
//! - `runtime`: application lifecycle (startup, server, shutdown)
//! - `system`: logging and system utilities
//! - `utils`: validation helpers

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod store;
pub mod system;
pub mod utils;
