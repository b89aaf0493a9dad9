use reqwest::Client;
use url::Url;

use crate::intake::{ApplicationGateway, FormRecord, IntegrationError, SubmissionReply};

/// Client for the rental application endpoint.
#[derive(Debug, Clone)]
pub struct SubmissionGatewayClient {
    client: Client,
    endpoint: Url,
}

impl SubmissionGatewayClient {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl ApplicationGateway for SubmissionGatewayClient {
    // The backend reports rejections in the body, so the status code is not checked.
    async fn submit(&self, form: &FormRecord) -> Result<SubmissionReply, IntegrationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await
            .map_err(|err| IntegrationError::Transport(err.to_string()))?;

        response
            .json::<SubmissionReply>()
            .await
            .map_err(|err| IntegrationError::Decode(err.to_string()))
    }
}
