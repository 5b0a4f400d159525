use crate::config::{Config, ProviderKind, ProviderSettings};
use crate::food::FoodSource;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::search::providers::{FdcProvider, OpenFoodFactsProvider, StubProvider};
use crate::search::{FallbackSearchAggregator, FoodSearchProvider, FoodSearchRepository};
use crate::session::SearchSession;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable overriding the configured FDC API key
pub const FDC_API_KEY_ENV: &str = "FDC_API_KEY";

/// Wires providers, the aggregator and sessions together from a [`Config`].
///
/// Built once by the hosting application and passed to whatever needs it;
/// there is no global instance.
#[derive(Clone)]
pub struct AppContainer {
    primary: Arc<dyn FoodSearchProvider>,
    secondary: Arc<dyn FoodSearchProvider>,
    repository: Arc<dyn FoodSearchRepository>,
}

impl AppContainer {
    pub fn from_config(config: &Config) -> Result<Self> {
        let primary = build_provider(&config.primary, config.page_size, FoodSource::Primary)
            .context("Failed to build primary provider")?;
        let secondary = build_provider(&config.secondary, config.page_size, FoodSource::Secondary)
            .context("Failed to build secondary provider")?;

        tracing::info!(
            primary = primary.name(),
            secondary = secondary.name(),
            page_size = config.page_size,
            "food search providers initialized"
        );

        Ok(Self::with_providers(primary, secondary))
    }

    /// Assemble from ready-made providers (test doubles, custom adapters)
    pub fn with_providers(
        primary: Arc<dyn FoodSearchProvider>,
        secondary: Arc<dyn FoodSearchProvider>,
    ) -> Self {
        let repository: Arc<dyn FoodSearchRepository> = Arc::new(FallbackSearchAggregator::new(
            Arc::clone(&primary),
            Arc::clone(&secondary),
        ));
        Self {
            primary,
            secondary,
            repository,
        }
    }

    pub fn primary(&self) -> Arc<dyn FoodSearchProvider> {
        Arc::clone(&self.primary)
    }

    pub fn secondary(&self) -> Arc<dyn FoodSearchProvider> {
        Arc::clone(&self.secondary)
    }

    pub fn repository(&self) -> Arc<dyn FoodSearchRepository> {
        Arc::clone(&self.repository)
    }

    /// A fresh session over the shared repository
    pub fn new_session(&self) -> SearchSession {
        SearchSession::new(self.repository())
    }
}

fn build_provider(
    settings: &ProviderSettings,
    page_size: u32,
    source: FoodSource,
) -> Result<Arc<dyn FoodSearchProvider>> {
    let provider: Arc<dyn FoodSearchProvider> = match settings.kind {
        ProviderKind::Stub => Arc::new(StubProvider::new(source)),
        ProviderKind::Fdc => {
            let mut settings = settings.clone();
            if let Ok(key) = std::env::var(FDC_API_KEY_ENV) {
                if !key.trim().is_empty() {
                    settings.api_key = key.trim().to_string();
                }
            }
            if settings.api_key.trim().is_empty() {
                tracing::warn!("FDC api key not set, fdc searches will fail");
            }
            Arc::new(FdcProvider::new(http_client(&settings)?, &settings, page_size, source))
        }
        ProviderKind::OpenFoodFacts => Arc::new(OpenFoodFactsProvider::new(
            http_client(settings)?,
            settings,
            page_size,
            source,
        )),
    };
    Ok(provider)
}

fn http_client(settings: &ProviderSettings) -> Result<Arc<dyn HttpClient>> {
    let client = ReqwestHttpClient::new(Duration::from_secs(settings.timeout_secs))
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(client))
}
