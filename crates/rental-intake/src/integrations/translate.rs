use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::intake::{IntegrationError, Language, Translator};

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for the Google Translate v2 proxy.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: Url,
}

impl GoogleTranslateClient {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target: Language) -> Result<String, IntegrationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("q", text), ("target", target.code())])
            .send()
            .await
            .map_err(|err| IntegrationError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(IntegrationError::Status(response.status().as_u16()));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|err| IntegrationError::Decode(err.to_string()))?;

        body.data
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.translated_text)
            .ok_or(IntegrationError::EmptyTranslation)
    }
}
