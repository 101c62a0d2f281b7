//! Headless entry point: boot the widget, run the initial load, and
//! print the rendered panels.

use std::sync::Arc;

use anyhow::Result;
use skycast_api::{AuthProvider, BackendClient, NoAuth, StaticToken};
use skycast_core::Config;
use skycast_widget::{CachedSource, SystemPositionSource, Widget, WidgetEvent, WidgetOptions};

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _) = Config::load_validated()?;

    let auth: Arc<dyn AuthProvider> = match config.backend.effective_auth_token() {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(NoAuth),
    };
    let client = BackendClient::new(&config.backend.base_url, auth)?;

    let source = Arc::new(CachedSource::new(SystemPositionSource));
    let mut widget = Widget::new(client, source, WidgetOptions::from_config(&config));

    widget.handle_event(WidgetEvent::Loaded);
    widget.run_until_idle().await;

    let panels = widget.panels();
    println!("{}", panels.toggle);
    println!("{}", panels.conditions);
    println!("{}", panels.forecast);
    println!("{}", panels.saved);
    if !panels.status.is_empty() {
        println!("{}", panels.status);
    }

    Ok(())
}
