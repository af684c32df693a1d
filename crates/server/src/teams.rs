//! Team registration and lookup endpoints.

use api_types::{
    Success, TeamNumber, WriteResponse, WriteResult,
    team::{AddTeam, DataSetsView, TeamLookup, TeamResponse, TeamView},
};
use axum::{Json, extract::State};
use engine::{DataSet, DataSets, Team};

use crate::{ServerError, extract::Payload, present, server::ServerState};

/// Handle requests for registering a team
pub async fn add_team(
    State(state): State<ServerState>,
    Payload(payload): Payload<AddTeam>,
) -> Result<Json<Success<WriteResponse>>, ServerError> {
    let (Some(team_code), Some(number), Some(name)) = (
        present(payload.team_code),
        payload.team_num.as_ref().and_then(TeamNumber::value),
        present(payload.team_name),
    ) else {
        return Err(ServerError::Generic("All fields are required".to_string()));
    };

    state.engine.add_team(&team_code, number, &name).await?;

    Ok(Json(Success::new(WriteResponse {
        result: WriteResult { changes: 1 },
    })))
}

/// Handle requests for a single team, registered or staged
pub async fn get_team(
    State(state): State<ServerState>,
    Payload(payload): Payload<TeamLookup>,
) -> Result<Json<Success<TeamResponse>>, ServerError> {
    let number = team_number(&payload)?;
    let team = state.engine.team(number).await?;

    Ok(Json(Success::new(TeamResponse {
        team: team_view(team),
    })))
}

/// Handle requests for the data set slots of a team
pub async fn get_stats_of_team(
    State(state): State<ServerState>,
    Payload(payload): Payload<TeamLookup>,
) -> Result<Json<Success<DataSetsView>>, ServerError> {
    let number = team_number(&payload)?;
    let stats = state.engine.team_stats(number).await?;

    Ok(Json(Success::new(data_sets_view(&stats))))
}

fn team_number(payload: &TeamLookup) -> Result<i64, ServerError> {
    payload
        .team_num
        .as_ref()
        .and_then(TeamNumber::value)
        .ok_or_else(|| ServerError::Generic("Team number is required".to_string()))
}

fn team_view(team: Team) -> TeamView {
    TeamView {
        number: team.number,
        team_code: team.team_code,
        name: team.name,
        registered: team.registered,
        data_sets: data_sets_view(&team.data_sets),
    }
}

fn data_sets_view(sets: &DataSets) -> DataSetsView {
    let slot = |slot: DataSet| sets.get(slot).map(ToString::to_string);
    DataSetsView {
        data_set_one: slot(DataSet::One),
        data_set_two: slot(DataSet::Two),
        data_set_three: slot(DataSet::Three),
        data_set_four: slot(DataSet::Four),
        data_set_five: slot(DataSet::Five),
        data_set_six: slot(DataSet::Six),
        data_set_seven: slot(DataSet::Seven),
        data_set_eight: slot(DataSet::Eight),
        data_set_nine: slot(DataSet::Nine),
        data_set_ten: slot(DataSet::Ten),
    }
}
