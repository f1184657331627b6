#![windows_subsystem = "windows"]

use anyhow::Result;
use tracing_subscriber;
use vaultview::{config::Config, gui};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Create default config - GUI will load user settings and update accordingly
    let config = Config::default();
    gui::launch(config)?;

    Ok(())
}
