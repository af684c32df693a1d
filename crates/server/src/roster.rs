//! Roster endpoints.
//!
//! Updates answer 404 when no user matched instead of reporting success.

use api_types::{
    MessageResponse, Scalar, Success,
    roster::{
        DeleteMember, MemberView, MembersResponse, TeamCodeLookup, UpdateMemberEmail,
        UpdateMemberField, UpdateMemberPass, UpdateMemberTeam, UpdateMemberTimeTable,
        UpdateTimeTable,
    },
};
use axum::{Json, extract::State};

use crate::{ServerError, extract::Payload, present, server::ServerState};

type Updated = Result<Json<Success<MessageResponse>>, ServerError>;

fn updated(message: &str, changes: u64) -> Updated {
    Ok(Json(Success::new(MessageResponse {
        message: message.to_string(),
        changes: Some(changes),
    })))
}

fn missing_fields() -> ServerError {
    ServerError::Generic("All fields are required".to_string())
}

/// Handle requests for the scouters and captains of a team
pub async fn list_scouters_and_captains(
    State(state): State<ServerState>,
    Payload(payload): Payload<TeamCodeLookup>,
) -> Result<Json<Success<MembersResponse>>, ServerError> {
    let team_code = present(payload.team_code)
        .ok_or_else(|| ServerError::Generic("Team code is required".to_string()))?;

    let members = state
        .engine
        .list_scouters_and_captains(&team_code)
        .await?
        .into_iter()
        .map(|user| MemberView {
            name: user.name,
            email: user.email,
            role: user.role,
            time_table: user.time_table,
        })
        .collect();

    Ok(Json(Success::new(MembersResponse { members })))
}

pub async fn update_member_time_table(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateMemberTimeTable>,
) -> Updated {
    let (Some(time), Some(date), Some(team), Some(member)) = (
        present(payload.time.map(Scalar::into_text)),
        present(payload.date.map(Scalar::into_text)),
        present(payload.team.map(Scalar::into_text)),
        present(payload.member),
    ) else {
        return Err(missing_fields());
    };

    let changes = state
        .engine
        .update_member_time_table(&member, &time, &date, &team)
        .await?;
    updated("time table updated", changes)
}

pub async fn update_member_name(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateMemberField>,
) -> Updated {
    let (Some(old), Some(email), Some(new)) = (
        present(payload.old),
        present(payload.email),
        present(payload.new),
    ) else {
        return Err(missing_fields());
    };

    let changes = state.engine.update_member_name(&old, &email, &new).await?;
    updated("name updated", changes)
}

pub async fn update_member_pass(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateMemberPass>,
) -> Updated {
    let (Some(name), Some(email), Some(new)) = (
        present(payload.name),
        present(payload.email),
        payload.new.filter(|p| !p.is_empty()),
    ) else {
        return Err(missing_fields());
    };

    let changes = state
        .engine
        .update_member_password(&name, &email, &new)
        .await?;
    updated("password updated", changes)
}

pub async fn update_member_email(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateMemberEmail>,
) -> Updated {
    let (Some(name), Some(old_email), Some(new)) = (
        present(payload.name),
        present(payload.old_email),
        present(payload.new),
    ) else {
        return Err(missing_fields());
    };

    let changes = state
        .engine
        .update_member_email(&name, &old_email, &new)
        .await?;
    updated("email updated", changes)
}

pub async fn update_member_team(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateMemberTeam>,
) -> Updated {
    let (Some(old), Some(new), Some(name), Some(email)) = (
        present(payload.old),
        present(payload.new),
        present(payload.name),
        present(payload.email),
    ) else {
        return Err(missing_fields());
    };

    let changes = state
        .engine
        .update_member_team(&old, &new, &name, &email)
        .await?;
    updated("team updated", changes)
}

pub async fn update_member_role(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateMemberField>,
) -> Updated {
    let (Some(email), Some(name), Some(old), Some(new)) = (
        present(payload.email),
        present(payload.name),
        present(payload.old),
        present(payload.new),
    ) else {
        return Err(missing_fields());
    };

    let changes = state
        .engine
        .update_member_role(&email, &name, &old, &new)
        .await?;
    updated("role updated", changes)
}

/// Handle member removal
///
/// Without `email`, every user with the given name is removed.
pub async fn delete_member(
    State(state): State<ServerState>,
    Payload(payload): Payload<DeleteMember>,
) -> Updated {
    let name = present(payload.name)
        .ok_or_else(|| ServerError::Generic("Name is required".to_string()))?;

    let changes = state
        .engine
        .delete_member(&name, present(payload.email).as_deref())
        .await?;
    updated("member deleted", changes)
}

pub async fn update_time_table(
    State(state): State<ServerState>,
    Payload(payload): Payload<UpdateTimeTable>,
) -> Updated {
    let (Some(name), Some(team_code), Some(time_table)) = (
        present(payload.name),
        present(payload.team_code),
        payload.timetable.filter(|t| !t.is_null()),
    ) else {
        return Err(missing_fields());
    };

    let changes = state
        .engine
        .update_time_table(&name, &team_code, &time_table)
        .await?;
    updated("time table updated", changes)
}
