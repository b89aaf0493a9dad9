//! reqwest-backed adapters for the translate, places, and submission backends.

mod location;
mod places;
mod submit;
mod translate;

use reqwest::Client;

use crate::config::IntegrationConfig;
use crate::intake::IntegrationError;

pub use location::ReportedLocation;
pub use places::PlaceAutocompleteClient;
pub use submit::SubmissionGatewayClient;
pub use translate::GoogleTranslateClient;

/// The three HTTP clients, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpIntegrations {
    pub translator: GoogleTranslateClient,
    pub places: PlaceAutocompleteClient,
    pub gateway: SubmissionGatewayClient,
}

impl HttpIntegrations {
    pub fn from_config(config: &IntegrationConfig) -> Result<Self, IntegrationError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| IntegrationError::Transport(err.to_string()))?;

        Ok(Self {
            translator: GoogleTranslateClient::new(client.clone(), config.translate_url.clone()),
            places: PlaceAutocompleteClient::new(
                client.clone(),
                config.places_url.clone(),
                config.search_radius,
            ),
            gateway: SubmissionGatewayClient::new(client, config.submit_url.clone()),
        })
    }
}
