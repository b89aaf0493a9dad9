use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use rental_intake::config::AppConfig;
use rental_intake::error::AppError;
use rental_intake::intake::{IntakeSession, SessionRegistry};
use rental_intake::integrations::{
    GoogleTranslateClient, HttpIntegrations, PlaceAutocompleteClient, SubmissionGatewayClient,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type HttpRegistry =
    SessionRegistry<GoogleTranslateClient, PlaceAutocompleteClient, SubmissionGatewayClient>;

pub(crate) type HttpSession =
    IntakeSession<GoogleTranslateClient, PlaceAutocompleteClient, SubmissionGatewayClient>;

pub(crate) fn build_registry(config: &AppConfig) -> Result<HttpRegistry, AppError> {
    let HttpIntegrations {
        translator,
        places,
        gateway,
    } = HttpIntegrations::from_config(&config.integrations)?;

    Ok(SessionRegistry::new(
        Arc::new(translator),
        Arc::new(places),
        Arc::new(gateway),
        config.intake.clone(),
    ))
}

pub(crate) fn build_session(config: &AppConfig) -> Result<HttpSession, AppError> {
    let HttpIntegrations {
        translator,
        places,
        gateway,
    } = HttpIntegrations::from_config(&config.integrations)?;

    Ok(IntakeSession::new(
        Arc::new(translator),
        Arc::new(places),
        Arc::new(gateway),
        &config.intake,
    ))
}
