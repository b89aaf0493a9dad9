use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::intake::{AddressSuggestion, IntegrationError, PlacesProvider};

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    predictions: Option<Vec<AddressSuggestion>>,
}

/// Client for the place autocomplete proxy.
#[derive(Debug, Clone)]
pub struct PlaceAutocompleteClient {
    client: Client,
    endpoint: Url,
    radius: u32,
}

impl PlaceAutocompleteClient {
    pub fn new(client: Client, endpoint: Url, radius: u32) -> Self {
        Self {
            client,
            endpoint,
            radius,
        }
    }
}

impl PlacesProvider for PlaceAutocompleteClient {
    async fn autocomplete(&self, input: &str) -> Result<Vec<AddressSuggestion>, IntegrationError> {
        let radius = self.radius.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("input", input), ("radius", radius.as_str())])
            .send()
            .await
            .map_err(|err| IntegrationError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(IntegrationError::Status(response.status().as_u16()));
        }

        let body: AutocompleteResponse = response
            .json()
            .await
            .map_err(|err| IntegrationError::Decode(err.to_string()))?;

        Ok(body.predictions.unwrap_or_default())
    }
}
