use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::address::Coordinates;
use super::form::{FieldValue, FormField};
use super::localization::Language;
use super::ports::{ApplicationGateway, PlacesProvider, Translator};
use super::registry::{SessionId, SessionRegistry};
use super::session::SessionError;
use super::submission::SubmissionOutcome;
use crate::error::AppError;
use crate::integrations::ReportedLocation;

#[derive(Debug, Deserialize)]
pub(crate) struct FieldUpdateRequest {
    pub(crate) field: String,
    pub(crate) value: FieldValue,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageRequest {
    pub(crate) language: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressSearchRequest {
    #[serde(default)]
    pub(crate) text: String,
}

/// Location report from the client: a fix, or the reason there is none.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LocateRequest {
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

impl LocateRequest {
    fn into_location(self) -> ReportedLocation {
        match (self.error, self.latitude, self.longitude) {
            (Some(reason), _, _) => ReportedLocation::Denied(reason),
            (None, Some(latitude), Some(longitude)) => {
                ReportedLocation::Position(Coordinates::new(latitude, longitude))
            }
            _ => ReportedLocation::Unsupported,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectSuggestionRequest {
    pub(crate) place_id: String,
}

type Registry<T, P, G> = State<Arc<SessionRegistry<T, P, G>>>;

/// Router exposing intake sessions as JSON endpoints.
pub fn intake_router<T, P, G>(registry: Arc<SessionRegistry<T, P, G>>) -> Router
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    Router::new()
        .route("/api/v1/intake/sessions", post(open_handler::<T, P, G>))
        .route(
            "/api/v1/intake/sessions/:session_id",
            get(view_handler::<T, P, G>).delete(close_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/fields",
            patch(field_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/language",
            put(language_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/language/refresh",
            post(refresh_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/address/search",
            post(search_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/address/locate",
            post(locate_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/address/select",
            post(select_handler::<T, P, G>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/submit",
            post(submit_handler::<T, P, G>),
        )
        .with_state(registry)
}

pub(crate) async fn open_handler<T, P, G>(State(registry): Registry<T, P, G>) -> Response
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let (id, session) = registry.open();
    let view = session.lock().await.view();
    let payload = json!({ "session_id": id, "view": view });
    (StatusCode::CREATED, Json(payload)).into_response()
}

pub(crate) async fn view_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let session = registry.get(&SessionId(session_id))?;
    let view = session.lock().await.view();
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn close_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    registry.close(&SessionId(session_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub(crate) async fn field_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
    Json(request): Json<FieldUpdateRequest>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let id = SessionId(session_id);
    let field = FormField::from_name(&request.field).map_err(SessionError::from)?;

    // The address input drives suggestions, so it takes the search path.
    if let (FormField::CurrentAddress, FieldValue::Text(text)) = (field, &request.value) {
        let view = registry.search_address(&id, text.clone()).await?;
        return Ok((StatusCode::OK, Json(view)).into_response());
    }

    let session = registry.get(&id)?;
    let mut guard = session.lock().await;
    guard
        .update_field(field, request.value)
        .map_err(SessionError::from)?;
    Ok((StatusCode::OK, Json(guard.view())).into_response())
}

pub(crate) async fn language_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
    Json(request): Json<LanguageRequest>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let language = Language::from_code(&request.language).map_err(SessionError::from)?;
    let view = registry
        .select_language(&SessionId(session_id), language)
        .await?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn refresh_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let view = registry.refresh_labels(&SessionId(session_id)).await?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn search_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
    Json(request): Json<AddressSearchRequest>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let view = registry
        .search_address(&SessionId(session_id), request.text)
        .await?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn locate_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
    Json(request): Json<LocateRequest>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let session = registry.get(&SessionId(session_id))?;
    let location = request.into_location();
    let mut guard = session.lock().await;
    // Location failures are reported through the view, not the status code.
    let _ = guard.use_current_location(&location).await;
    Ok((StatusCode::OK, Json(guard.view())).into_response())
}

pub(crate) async fn select_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectSuggestionRequest>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let session = registry.get(&SessionId(session_id))?;
    let mut guard = session.lock().await;
    guard.select_suggestion(&request.place_id)?;
    Ok((StatusCode::OK, Json(guard.view())).into_response())
}

pub(crate) async fn submit_handler<T, P, G>(
    State(registry): Registry<T, P, G>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    T: Translator + 'static,
    P: PlacesProvider + 'static,
    G: ApplicationGateway + 'static,
{
    let (outcome, view) = registry.submit(&SessionId(session_id)).await?;
    let response = match outcome {
        SubmissionOutcome::Blocked { violations } => {
            let payload = json!({
                "error": "application is incomplete",
                "violations": violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        SubmissionOutcome::InFlight => {
            let payload = json!({ "error": "a submission is already in flight", "view": view });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        outcome => {
            let payload = json!({ "outcome": outcome, "view": view });
            (StatusCode::OK, Json(payload)).into_response()
        }
    };
    Ok(response)
}
