use axum::{
    Router,
    routing::{post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::{reports, roster, teams, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/addUser", put(users::add_user))
        .route("/getUser", post(users::get_user))
        .route("/addTeam", post(teams::add_team))
        .route("/getTeam", post(teams::get_team))
        .route("/getStatsOfTeam", post(teams::get_stats_of_team))
        .route("/addReport", post(reports::add_report))
        .route(
            "/getAllMembersOfTeamThatAreScoutersAndCaptains",
            post(roster::list_scouters_and_captains),
        )
        .route(
            "/updateMemberTimeTable",
            post(roster::update_member_time_table),
        )
        .route("/updateMemberName", post(roster::update_member_name))
        .route("/updateMemberPass", post(roster::update_member_pass))
        .route("/updateMemberEmail", post(roster::update_member_email))
        .route("/updateMemberTeam", post(roster::update_member_team))
        .route("/updateMemberRole", post(roster::update_member_role))
        .route("/deleteMember", post(roster::delete_member))
        .route("/updateTimeTable", post(roster::update_time_table))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Build the registry router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
