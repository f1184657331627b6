//! View modules for the GUI
//!
//! This module organizes the different view implementations of the application.
//! Each submodule contains the rendering logic for a specific view/screen.
//!
//! ## Module Structure
//!
//! - `vault` - Account list and selection
//! - `transactions` - Transaction list, lookup, and details
//! - `committees` - Epoch and committee data
//! - `settings` - Application configuration and endpoint management
//!
//! ## Implementation Notes
//!
//! Each view module implements its rendering as `VaultApp` methods; the
//! methods are called from `App::update` in `app.rs`.

pub mod committees;
pub mod settings;
pub mod transactions;
pub mod vault;
