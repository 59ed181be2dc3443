//! Contact form handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError, models::contact::ContactRequest, services::contact_service,
    state::AppState,
};

/// Submit the contact form.
///
/// # Request Body
///
/// ```json
/// {
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "email": "ada@example.com",
///   "phone": "",
///   "message": "Hello",
///   "agreed": true
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the stored contact
/// - **400**: a required field is missing or `agreed` is not a boolean
pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let created = contact_service::submit_contact(state.store.as_ref(), request).await?;

    Ok((StatusCode::CREATED, Json(created)))
}
