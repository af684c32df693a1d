//! User registration and login endpoints.

use api_types::{
    Success, WriteResponse, WriteResult,
    user::{AddUser, GetUser, LoginResponse, UserView},
};
use axum::{Json, extract::State};

use crate::{ServerError, extract::Payload, present, server::ServerState};

/// Handle requests for registering a user in an existing team
pub async fn add_user(
    State(state): State<ServerState>,
    Payload(payload): Payload<AddUser>,
) -> Result<Json<Success<WriteResponse>>, ServerError> {
    let (Some(email), Some(name), Some(team_code), Some(password)) = (
        present(payload.email),
        present(payload.name),
        present(payload.team_code),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ServerError::Generic("All fields are required".to_string()));
    };

    state
        .engine
        .add_user(&email, &name, &team_code, &password, payload.role.as_deref())
        .await?;

    Ok(Json(Success::new(WriteResponse {
        result: WriteResult { changes: 1 },
    })))
}

/// Handle login requests
pub async fn get_user(
    State(state): State<ServerState>,
    Payload(payload): Payload<GetUser>,
) -> Result<Json<Success<LoginResponse>>, ServerError> {
    let (Some(email), Some(password)) = (
        present(payload.email),
        payload.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ServerError::Generic(
            "Email and Password are required".to_string(),
        ));
    };

    let user = state.engine.authenticate(&email, &password).await?;

    Ok(Json(Success::new(LoginResponse {
        message: "User authenticated successfully".to_string(),
        data: UserView {
            email: user.email,
            team_code: user.team_code,
            name: user.name,
            password: user.password,
            role: user.role,
            time_table: user.time_table,
        },
    })))
}
