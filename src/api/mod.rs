//! HTTP API module for Coach Desk.
//!
//! This module provides the REST endpoints for monthly coach salaries,
//! attendance marking and player feedback.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CreateFeedbackRequest, MarkAttendanceRequest, SalaryRequest};
pub use response::{ApiError, ApiErrorResponse, MessageResponse};
pub use state::AppState;
