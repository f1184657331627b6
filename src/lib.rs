//! VaultView - Desktop dashboard for a blockchain wallet daemon
//!
//! The library crate exposes the daemon client, the domain types it
//! deserializes, configuration/settings handling, and the egui GUI.

pub mod client;
pub mod config;
pub mod gui;
pub mod types;
pub mod user_settings;
