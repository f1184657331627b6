//! GUI module for the VaultView application
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main VaultApp struct, per-section state, and the frame loop
//! - `async_job` - Background fetch polling and the fetch life-cycle
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `helpers` - Utility functions for formatting and validation
//! - `notifications` - Notification entries shown in the top bar
//! - `views` - View rendering functions (vault, transactions, committees, settings)
//! - `widgets` - Reusable UI widgets (TransactionView)
//!
//! ## Usage
//!
//! ```no_run
//! use vaultview::config::Config;
//! use vaultview::gui;
//!
//! let config = Config::default();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod async_job;
pub mod helpers;
pub mod notifications;
pub mod theme;
pub mod views;
pub mod widgets;

// Re-export main public API
pub use app::{launch, Section, VaultApp};

// Re-export commonly used types from submodules for convenience
pub use async_job::{AsyncJob, FetchState};
pub use notifications::NotificationEntry;
pub use theme::{configure_style, AppTheme};
pub use widgets::TransactionView;
