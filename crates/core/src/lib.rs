pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    index::{IndexRegistry, MarketIndex},
    outcome::UpdateResult,
    settings::Settings,
};
use providers::{traits::HistoryProvider, yahoo_finance::YahooFinanceProvider};
use services::update_service::UpdateService;

use errors::CoreError;

/// Date format used for every date exchanged with the page.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inputs of one update, as the page's widgets carry them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateRequest {
    pub symbol: String,
    pub start: String,
    pub end: String,
}

/// Main entry point for the index dashboard core library.
/// Holds the settings, the index registry and the update pipeline.
#[must_use]
pub struct IndexDashboard {
    settings: Settings,
    update_service: UpdateService,
}

impl std::fmt::Debug for IndexDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexDashboard")
            .field("settings", &self.settings)
            .field("indices", &self.update_service.registry().len())
            .field("provider", &self.update_service.provider_name())
            .finish()
    }
}

impl IndexDashboard {
    /// Build a dashboard over any history provider.
    /// Fails if the configured default symbol is not a registered index.
    pub fn new(settings: Settings, provider: Box<dyn HistoryProvider>) -> Result<Self, CoreError> {
        let registry = IndexRegistry::builtin();
        settings.validate(&registry)?;
        Ok(Self {
            settings,
            update_service: UpdateService::new(registry, provider),
        })
    }

    /// Build a dashboard backed by the live Yahoo Finance connector.
    pub fn with_yahoo(settings: Settings) -> Result<Self, CoreError> {
        let provider = YahooFinanceProvider::new()?;
        Self::new(settings, Box::new(provider))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All selectable indices, in display order.
    #[must_use]
    pub fn indices(&self) -> Vec<&MarketIndex> {
        self.update_service.registry().iter().collect()
    }

    /// The request the page issues on first load.
    #[must_use]
    pub fn default_request(&self) -> UpdateRequest {
        UpdateRequest {
            symbol: self.settings.default_symbol.clone(),
            start: self.settings.default_start.format(DATE_FORMAT).to_string(),
            end: self.settings.default_end.format(DATE_FORMAT).to_string(),
        }
    }

    /// Run the update pipeline once. Never fails: errors become a
    /// processing-error result.
    pub async fn update(&self, symbol: &str, start: &str, end: &str) -> UpdateResult {
        self.update_service.update(symbol, start, end).await
    }

    pub async fn update_request(&self, request: &UpdateRequest) -> UpdateResult {
        self.update(&request.symbol, &request.start, &request.end)
            .await
    }
}
