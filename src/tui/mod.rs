//! Interactive terminal dashboard: metrics, charts and the assistant chat.

mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::{App, ProviderFactory};
use tracing::info;

use crate::config::AppConfig;
use crate::metrics;
use crate::provider::CompletionProvider;
use terminal::TerminalManager;

/// Run the dashboard until the user quits.
///
/// Edits to the API key field take effect on the next submitted message.
pub fn run_dashboard(config: &AppConfig) -> Result<()> {
    let samples = metrics::generate().to_vec();

    let client_config = config.clone();
    let factory: ProviderFactory = Box::new(move |api_key| {
        Box::new(client_config.client_with_key(api_key)) as Box<dyn CompletionProvider>
    });

    info!(model = %config.model, base_url = %config.base_url, "Starting dashboard.");

    let mut manager = TerminalManager::new()?;
    let mut app = App::new(samples, config, factory);
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    info!("Dashboard closed.");
    res
}
