use std::sync::Arc;
use tokio::sync::Mutex;

use crate::bibox::BiboxClient;
use crate::chart::ChartOptions;
use crate::config::Config;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: Config,
    pub bibox: BiboxClient,

    /// Serializes writes to the output file across concurrent requests.
    pub file_sink: Mutex<()>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let bibox = BiboxClient::new(&config);

        Arc::new(Self {
            config,
            bibox,
            file_sink: Mutex::new(()),
        })
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            title: self.config.title.clone(),
            split_number: self.config.split_number,
            zoom_start: self.config.zoom_start,
            zoom_end: self.config.zoom_end,
        }
    }
}
