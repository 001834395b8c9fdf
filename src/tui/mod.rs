//! Interactive search screen.

pub mod app;
pub mod search;
pub mod ui;

use crate::core::client::HttpSearchClient;
use crate::core::controller::SearchController;
use crate::core::{ConfigProvider, LinkOpener};
use crate::utils::error::{Result, SearchError};
use app::App;
use url::Url;

/// Opens links with the desktop's default handler.
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &Url) -> Result<()> {
        open::that(url.as_str())?;
        Ok(())
    }
}

/// Show the screen until the user quits. Must be called inside a tokio
/// runtime context; searches are spawned onto it.
pub fn run<C: ConfigProvider>(config: &C) -> Result<()> {
    let client = HttpSearchClient::new(config)?;
    let controller = SearchController::new(client, config.ordering());
    let mut app = App::new(controller, SystemLinkOpener);

    let mut terminal = ratatui::try_init().map_err(|e| SearchError::TerminalError {
        message: e.to_string(),
    })?;
    tracing::info!("Search screen opened");

    let result = app.run(&mut terminal);

    ratatui::restore();
    tracing::info!("Search screen closed");
    result
}
