//! One-shot commands that drive a single intake session against the
//! configured backends and print the result as JSON.

use std::fs;

use rental_intake::config::AppConfig;
use rental_intake::error::AppError;
use rental_intake::intake::{
    Coordinates, FieldValue, FormField, FormRecord, SessionError, SubmissionOutcome,
};
use rental_intake::integrations::ReportedLocation;
use rental_intake::telemetry;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::cli::{LabelsArgs, LocateArgs, SearchArgs, SubmitArgs};
use crate::infra::{build_session, HttpSession};

fn prepare() -> Result<HttpSession, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    build_session(&config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) async fn labels(args: LabelsArgs) -> Result<(), AppError> {
    let mut session = prepare()?;
    session
        .select_language_code(&args.language)
        .await
        .map_err(SessionError::from)?;

    let view = session.view();
    let missing = session.labels().missing();
    if !missing.is_empty() {
        info!(missing = missing.len(), "some labels kept their source text");
    }

    print_json(&json!({
        "language": view.language,
        "direction": view.direction,
        "labels": view.labels,
        "employment_options": view.employment_options,
    }))
}

pub(crate) async fn search(args: SearchArgs) -> Result<(), AppError> {
    let mut session = prepare()?;
    let suggestions = session.search_address(args.text).await;
    print_json(&suggestions)
}

pub(crate) async fn locate(args: LocateArgs) -> Result<(), AppError> {
    let mut session = prepare()?;
    let location = ReportedLocation::Position(Coordinates::new(args.latitude, args.longitude));

    session.use_current_location(&location).await?;

    let address = session.form().current_address.as_str();
    print_json(&json!({
        "latitude": args.latitude,
        "longitude": args.longitude,
        "address": if address.is_empty() { None } else { Some(address) },
    }))
}

pub(crate) async fn submit(args: SubmitArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.file)?;
    let answers: FormRecord = serde_json::from_str(&raw).map_err(|err| {
        AppError::Input(format!("{} is not a valid application: {err}", args.file.display()))
    })?;

    let mut session = prepare()?;
    for field in FormField::ALL {
        let value = match answers.text(field) {
            Some(text) => FieldValue::from(text),
            None => FieldValue::Flag(answers.has_pets),
        };
        session
            .update_field(field, value)
            .map_err(SessionError::from)?;
    }

    let outcome = session.submit().await;
    print_json(&json!({ "outcome": &outcome, "status": session.status() }))?;

    match outcome {
        SubmissionOutcome::Accepted => Ok(()),
        SubmissionOutcome::Blocked { .. } => {
            Err(AppError::Input("application is incomplete".to_string()))
        }
        SubmissionOutcome::Rejected { message } => Err(AppError::Input(message)),
        SubmissionOutcome::Failed { reason } => Err(AppError::Input(reason)),
        SubmissionOutcome::InFlight => {
            Err(AppError::Input("a submission is already in flight".to_string()))
        }
    }
}
