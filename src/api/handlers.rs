//! HTTP request handlers for the Coach Desk API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::SalaryPeriod;
use crate::error::{EngineError, EngineResult};
use crate::feedback::NotificationStatus;
use crate::models::{AttendanceUpsert, CoachSummary, FeedbackPatch, NewFeedback};
use crate::store::{AttendanceStore, CoachStore, FeedbackStore};

use super::request::{CreateFeedbackRequest, MarkAttendanceRequest, SalaryRequest};
use super::response::{ApiError, ApiErrorResponse, MessageResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/salaries/calculate", post(calculate_salaries_handler))
        .route("/api/salaries/seed", post(seed_coaches_handler))
        .route(
            "/api/attendance",
            get(list_attendance_handler).post(mark_attendance_handler),
        )
        .route("/api/attendance/coaches", get(list_coaches_handler))
        .route("/api/attendance/:id", delete(delete_attendance_handler))
        .route(
            "/api/feedback",
            get(list_feedback_handler).post(create_feedback_handler),
        )
        .route("/api/feedback/players", get(list_players_handler))
        .route(
            "/api/feedback/:id",
            put(update_feedback_handler).delete(delete_feedback_handler),
        )
        .with_state(state)
}

/// Handler for POST /api/salaries/calculate.
///
/// Accepts `{year, month}` and returns one salary line per coach.
async fn calculate_salaries_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let period = match SalaryPeriod::from_json(request.year.as_ref(), request.month.as_ref()) {
        Ok(period) => period,
        Err(err) => return error_response(err, correlation_id, "Invalid salary period"),
    };

    let start_time = Instant::now();
    match state.calculator().calculate_period(&period).await {
        Ok(lines) => {
            info!(
                correlation_id = %correlation_id,
                year = period.year(),
                month = period.month(),
                coach_count = lines.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Salary calculation completed successfully"
            );
            json_response(StatusCode::OK, &lines)
        }
        Err(err) => error_response(err, correlation_id, "Salary calculation failed"),
    }
}

/// Handler for POST /api/salaries/seed.
///
/// Replaces the coach store with the configured roster.
async fn seed_coaches_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let coaches = state.roster().coaches.clone();
    let count = coaches.len();

    match state.coaches().replace_all(coaches).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, coach_count = count, "Coach store seeded");
            json_response(
                StatusCode::CREATED,
                &MessageResponse::new(format!("Seeded {} coaches", count)),
            )
        }
        Err(err) => error_response(err, correlation_id, "Seeding coaches failed"),
    }
}

/// Handler for GET /api/attendance.
async fn list_attendance_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.attendance().list_all().await {
        Ok(records) => json_response(StatusCode::OK, &records),
        Err(err) => error_response(err, correlation_id, "Listing attendance failed"),
    }
}

/// Handler for POST /api/attendance.
///
/// Marks a coach's attendance for a day, replacing any earlier mark for the
/// same coach and day.
async fn mark_attendance_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let upsert = match AttendanceUpsert::try_from(request) {
        Ok(upsert) => upsert,
        Err(err) => return error_response(err, correlation_id, "Invalid attendance entry"),
    };

    match state.attendance().upsert(upsert).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                coach_id = %record.coach_id,
                date = %record.date,
                status = %record.status,
                "Attendance marked"
            );
            json_response(StatusCode::CREATED, &record)
        }
        Err(err) => error_response(err, correlation_id, "Marking attendance failed"),
    }
}

/// Handler for DELETE /api/attendance/:id.
async fn delete_attendance_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let id = parse_id(&id)?;
        state.attendance().delete_by_id(id).await
    }
    .await;

    match result {
        Ok(()) => json_response(
            StatusCode::OK,
            &MessageResponse::new("Attendance record deleted"),
        ),
        Err(err) => error_response(err, correlation_id, "Deleting attendance failed"),
    }
}

/// Handler for GET /api/attendance/coaches.
async fn list_coaches_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.coaches().list_all().await {
        Ok(coaches) => {
            let summaries: Vec<CoachSummary> = coaches.iter().map(CoachSummary::from).collect();
            json_response(StatusCode::OK, &summaries)
        }
        Err(err) => error_response(err, correlation_id, "Listing coaches failed"),
    }
}

/// Handler for GET /api/feedback.
async fn list_feedback_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.feedback().store().list_all().await {
        Ok(entries) => json_response(StatusCode::OK, &entries),
        Err(err) => error_response(err, correlation_id, "Listing feedback failed"),
    }
}

/// Handler for POST /api/feedback.
///
/// Stores the feedback and emails the player. The entry is kept even when
/// the email cannot be sent.
async fn create_feedback_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let new = match NewFeedback::try_from(request) {
        Ok(new) => new,
        Err(err) => return error_response(err, correlation_id, "Invalid feedback"),
    };

    match state.feedback().create(new).await {
        Ok(receipt) => {
            info!(
                correlation_id = %correlation_id,
                feedback_id = %receipt.feedback.id,
                notified = matches!(receipt.notification, NotificationStatus::Sent),
                "Feedback created"
            );
            json_response(StatusCode::CREATED, &receipt.feedback)
        }
        Err(err) => error_response(err, correlation_id, "Creating feedback failed"),
    }
}

/// Handler for PUT /api/feedback/:id.
async fn update_feedback_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FeedbackPatch>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let result = async {
        let id = parse_id(&id)?;
        state.feedback().store().update(id, patch).await
    }
    .await;

    match result {
        Ok(feedback) => json_response(StatusCode::OK, &feedback),
        Err(err) => error_response(err, correlation_id, "Updating feedback failed"),
    }
}

/// Handler for DELETE /api/feedback/:id.
async fn delete_feedback_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = async {
        let id = parse_id(&id)?;
        state.feedback().store().delete_by_id(id).await
    }
    .await;

    match result {
        Ok(()) => json_response(StatusCode::OK, &MessageResponse::new("Feedback deleted")),
        Err(err) => error_response(err, correlation_id, "Deleting feedback failed"),
    }
}

/// Handler for GET /api/feedback/players.
async fn list_players_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, &state.roster().players)
}

fn parse_id(raw: &str) -> EngineResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| EngineError::invalid_input("id", format!("'{}' is not a valid id", raw)))
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError, correlation_id: Uuid, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{}", context
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
