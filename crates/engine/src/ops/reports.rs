use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine,
    data_sets::ReportUpdate,
    teams,
    teams::{DataSets, Team},
};

use super::{Engine, require_team_number, with_tx};

/// Where a report landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The team already existed (registered or staged) and was updated.
    Updated(Team),
    /// No team had the number; an unregistered team was staged.
    Staged(Team),
}

impl ReportOutcome {
    pub fn team(&self) -> &Team {
        match self {
            Self::Updated(team) | Self::Staged(team) => team,
        }
    }
}

impl Engine {
    /// Applies report entries to the data set slots of team `number`.
    ///
    /// The lookup and the write share one transaction, so two reports for an
    /// unknown number cannot both stage a team.
    pub async fn add_report(
        &self,
        number: i64,
        updates: &[ReportUpdate],
    ) -> ResultEngine<ReportOutcome> {
        let number = require_team_number(number)?;
        if updates.is_empty() {
            return Err(EngineError::InvalidReport(
                "no data sets supplied".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let outcome = match teams::Entity::find_by_id(number).one(&db_tx).await? {
                Some(model) => {
                    let mut team = Team::from(model);
                    let mut active = teams::ActiveModel {
                        number: ActiveValue::Unchanged(number),
                        ..Default::default()
                    };
                    for update in updates {
                        let slot = update.slot();
                        let value = update.apply(team.data_sets.get(slot))?;
                        tracing::trace!(
                            "{} report on {} of team {number}",
                            update.kind().as_str(),
                            slot.field()
                        );
                        team.data_sets.set(slot, value.clone());
                        active.set_data_set(slot, value);
                    }
                    active.update(&db_tx).await?;
                    ReportOutcome::Updated(team)
                }
                None => {
                    let mut data_sets = DataSets::default();
                    for update in updates {
                        let slot = update.slot();
                        let value = update.apply(data_sets.get(slot))?;
                        data_sets.set(slot, value);
                    }
                    let team = Team {
                        number,
                        team_code: None,
                        name: None,
                        registered: false,
                        data_sets,
                    };
                    teams::ActiveModel::from(&team).insert(&db_tx).await?;
                    tracing::debug!("staged unregistered team {number}");
                    ReportOutcome::Staged(team)
                }
            };

            Ok(outcome)
        })
    }
}
