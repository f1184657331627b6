//! Widget components for the GUI
//!
//! This module contains reusable UI widgets that can be embedded in views.
//!
//! ## Available Widgets
//!
//! - `TransactionView` - Status-driven renderer for a fetched transaction

mod transaction_view;

pub use transaction_view::{render_mode, visible_panels, Panel, PanelState, RenderMode, TransactionView};
