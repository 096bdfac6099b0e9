//! Team endpoint handlers

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::{RequireCredentials, RequireReporter};
use crate::api::state::AppState;
use crate::api::types::{null_as_empty, ApiError, Json, MessageResponse};
use crate::domain::team::{Assignment, Team};
use crate::infrastructure::team::CreateTeamRequest;

/// Team body for create; `id` and `volunteeremails` are ignored
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct TeamBody {
    #[serde(deserialize_with = "null_as_empty")]
    pub identifier: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
}

/// Assignment body for sign/deassign; `TeamID` comes from the path
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AssignmentBody {
    #[serde(rename = "volunteeremail", deserialize_with = "null_as_empty")]
    pub volunteer_email: String,
}

/// POST /v1/teams
pub async fn create_team(
    State(state): State<AppState>,
    _caller: RequireCredentials,
    Json(body): Json<TeamBody>,
) -> Result<Json<Team>, ApiError> {
    let request = CreateTeamRequest {
        identifier: body.identifier,
        name: body.name,
    };

    let team = state
        .team_service
        .create(request)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(team))
}

/// GET /v1/teams/
pub async fn list_teams(
    State(state): State<AppState>,
    _reporter: RequireReporter,
) -> Result<Json<Vec<Team>>, ApiError> {
    debug!("Listing teams");

    let teams = state
        .team_service
        .list()
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(teams))
}

/// GET /v1/teams/{identifier}
pub async fn get_team(
    State(state): State<AppState>,
    _caller: RequireCredentials,
    Path(identifier): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = state
        .team_service
        .get(&identifier)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(team))
}

/// DELETE /v1/teams/{identifier}
pub async fn delete_team(
    State(state): State<AppState>,
    _caller: RequireCredentials,
    Path(identifier): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .team_service
        .delete(&identifier)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(MessageResponse::deleted(&identifier)))
}

/// PUT /v1/teams/{identifier}/sign
pub async fn assign_volunteer(
    State(state): State<AppState>,
    _caller: RequireCredentials,
    Path(identifier): Path<String>,
    Json(body): Json<AssignmentBody>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .team_service
        .assign(&identifier, &body.volunteer_email)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(assignment))
}

/// PUT /v1/teams/{identifier}/deassign
pub async fn deassign_volunteer(
    State(state): State<AppState>,
    _caller: RequireCredentials,
    Path(identifier): Path<String>,
    Json(body): Json<AssignmentBody>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state
        .team_service
        .deassign(&identifier, &body.volunteer_email)
        .await
        .map_err(|e| state.errors.map(e))?;

    Ok(Json(assignment))
}
