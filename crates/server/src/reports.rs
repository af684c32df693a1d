//! Report endpoint: folds `[type, value]` entries into team data sets.

use api_types::{
    MessageResponse, Success, TeamNumber,
    report::{AddReport, ReportEntry},
};
use axum::{Json, extract::State};
use engine::{DataSet, ReportOutcome, ReportUpdate};

use crate::{ServerError, extract::Payload, server::ServerState};

/// Handle report submissions
///
/// Only the first `NumberOfDataSets` ordinals are read (all ten when the
/// field is absent); ordinals without an entry are skipped.
pub async fn add_report(
    State(state): State<ServerState>,
    Payload(payload): Payload<AddReport>,
) -> Result<Json<Success<MessageResponse>>, ServerError> {
    let number = payload
        .team_number
        .as_ref()
        .and_then(TeamNumber::value)
        .ok_or_else(|| ServerError::Generic("TeamNumber is required".to_string()))?;

    let updates = report_updates(&payload)?;
    let outcome = state.engine.add_report(number, &updates).await?;
    let team = outcome.team();
    if matches!(outcome, ReportOutcome::Staged(_)) {
        tracing::info!("report for unregistered team {}", team.number);
    } else {
        tracing::debug!("report applied to team {}", team.number);
    }

    Ok(Json(Success::new(MessageResponse {
        message: "added new dataset(s)".to_string(),
        changes: None,
    })))
}

fn report_updates(payload: &AddReport) -> Result<Vec<ReportUpdate>, ServerError> {
    let limit = match &payload.number_of_data_sets {
        None => DataSet::ALL.len(),
        Some(count) => count
            .value()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                ServerError::Generic("NumberOfDataSets must be a non-negative integer".to_string())
            })?
            .min(DataSet::ALL.len()),
    };

    DataSet::ALL
        .into_iter()
        .zip(payload.entries())
        .take(limit)
        .filter_map(|(slot, entry)| entry.map(|entry| (slot, entry)))
        .map(|(slot, ReportEntry(kind, value))| {
            ReportUpdate::parse(slot, kind, value).map_err(ServerError::from)
        })
        .collect()
}
