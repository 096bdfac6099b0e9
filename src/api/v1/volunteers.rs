//! Volunteer endpoint handlers

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::{RequireCredentials, RequireReporter};
use crate::api::state::AppState;
use crate::api::types::{null_as_empty, ApiError, Json, MessageResponse};
use crate::domain::volunteer::Volunteer;
use crate::infrastructure::volunteer::{CreateVolunteerRequest, UpdateVolunteerRequest};

/// Volunteer body for create and update.
///
/// Unknown fields such as `id` are ignored. On create `password` is ignored too.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct VolunteerBody {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub firstname: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lastname: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// GET /v1/volunteers/
pub async fn list_volunteers(
    State(state): State<AppState>,
    _reporter: RequireReporter,
) -> Result<Json<Vec<Volunteer>>, ApiError> {
    debug!("Listing volunteers");

    let volunteers = state
        .volunteer_service
        .list()
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(volunteers))
}

/// GET /v1/volunteers/{email}
pub async fn get_volunteer(
    State(state): State<AppState>,
    RequireCredentials(caller): RequireCredentials,
    Path(email): Path<String>,
) -> Result<Json<Volunteer>, ApiError> {
    debug!(email = %email, "Getting volunteer");

    let volunteer = state
        .volunteer_service
        .get(&email, caller.identity())
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(volunteer))
}

/// POST /v1/volunteers
pub async fn create_volunteer(
    State(state): State<AppState>,
    Json(body): Json<VolunteerBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = CreateVolunteerRequest {
        email: body.email,
        first_name: body.firstname,
        last_name: body.lastname,
    };

    let created = state
        .volunteer_service
        .create(request)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(MessageResponse::created(created.email())))
}

/// PUT /v1/volunteers/{email}
pub async fn update_volunteer(
    State(state): State<AppState>,
    RequireCredentials(caller): RequireCredentials,
    Path(email): Path<String>,
    Json(body): Json<VolunteerBody>,
) -> Result<Json<Volunteer>, ApiError> {
    let request = UpdateVolunteerRequest {
        email: body.email,
        first_name: body.firstname,
        last_name: body.lastname,
        password: body.password,
    };

    let updated = state
        .volunteer_service
        .update(&email, request, caller.identity())
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(updated))
}

/// DELETE /v1/volunteers/{email}
pub async fn delete_volunteer(
    State(state): State<AppState>,
    RequireCredentials(caller): RequireCredentials,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .volunteer_service
        .delete(&email, caller.identity())
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(MessageResponse::deleted(&email)))
}
