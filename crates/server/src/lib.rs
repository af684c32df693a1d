use api_types::Failure;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use extract::Payload;
pub use server::{app, run_with_listener};

mod extract;
mod reports;
mod roster;
mod server;
mod teams;
mod users;

pub mod types {
    pub use api_types::{
        Failure, Integer, MessageResponse, Scalar, Success, TeamNumber, WriteResponse, WriteResult,
    };

    pub mod user {
        pub use api_types::user::{AddUser, GetUser, LoginResponse, UserView};
    }

    pub mod team {
        pub use api_types::team::{AddTeam, DataSetsView, TeamLookup, TeamResponse, TeamView};
    }

    pub mod report {
        pub use api_types::report::{AddReport, ReportEntry};
    }

    pub mod roster {
        pub use api_types::roster::{
            DeleteMember, MemberView, MembersResponse, TeamCodeLookup, UpdateMemberEmail,
            UpdateMemberField, UpdateMemberPass, UpdateMemberTeam, UpdateMemberTimeTable,
            UpdateTimeTable,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidInput(_) | EngineError::InvalidReport(_) => StatusCode::BAD_REQUEST,
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::PasswordHash(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Failure::new(error))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// A request field that is present and not blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;

    #[test]
    fn engine_invalid_input_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_invalid_report_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidReport("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_unauthorized_maps_to_401() {
        let res = ServerError::from(EngineError::Unauthorized("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn database_error_maps_to_500_with_generic_message() {
        let err = EngineError::Database(DbErr::Custom("disk I/O error".to_string()));
        assert_eq!(
            status_for_engine_error(&err),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(message_for_engine_error(err), "internal server error");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_fields_are_absent() {
        assert_eq!(present(Some("  ".to_string())), None);
        assert_eq!(present(None), None);
        assert_eq!(present(Some("x".to_string())), Some("x".to_string()));
    }
}
