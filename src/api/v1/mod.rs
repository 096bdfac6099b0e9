//! v1 API endpoints

pub mod teams;
pub mod volunteers;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/volunteers/", get(volunteers::list_volunteers))
        .route("/volunteers", post(volunteers::create_volunteer))
        .route(
            "/volunteers/{email}",
            get(volunteers::get_volunteer)
                .put(volunteers::update_volunteer)
                .delete(volunteers::delete_volunteer),
        )
        .route("/teams", post(teams::create_team))
        .route("/teams/", get(teams::list_teams))
        .route(
            "/teams/{identifier}",
            get(teams::get_team).delete(teams::delete_team),
        )
        .route("/teams/{identifier}/sign", put(teams::assign_volunteer))
        .route("/teams/{identifier}/deassign", put(teams::deassign_volunteer))
}
