use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, teams,
    teams::{DataSets, Team},
};

use super::{Engine, normalize_required, require_team_number, with_tx};

impl Engine {
    /// Registers a team under `team_code` and `number`.
    ///
    /// If reports were already staged for `number`, that unregistered team is
    /// promoted in place: its slot values are kept and the slots it never wrote
    /// become empty strings.
    pub async fn add_team(&self, team_code: &str, number: i64, name: &str) -> ResultEngine<Team> {
        let team_code = normalize_required(team_code, "team code")?;
        let name = normalize_required(name, "team name")?;
        let number = require_team_number(number)?;

        with_tx!(self, |db_tx| {
            let staged = teams::Entity::find_by_id(number).one(&db_tx).await?;
            if staged.as_ref().is_some_and(|team| team.registered) {
                return Err(EngineError::ExistingKey(format!("team {number}")));
            }

            if teams::Entity::find()
                .filter(teams::Column::TeamCode.eq(team_code.as_str()))
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(team_code));
            }

            let team = match staged {
                Some(model) => {
                    let mut team = Team::from(model);
                    team.team_code = Some(team_code);
                    team.name = Some(name);
                    team.registered = true;
                    for slot in crate::DataSet::ALL {
                        if team.data_sets.get(slot).is_none() {
                            team.data_sets.set(slot, String::new());
                        }
                    }
                    teams::ActiveModel::from(&team).update(&db_tx).await?;
                    tracing::debug!("promoted staged team {number}");
                    team
                }
                None => {
                    let team = Team {
                        number,
                        team_code: Some(team_code),
                        name: Some(name),
                        registered: true,
                        data_sets: DataSets::empty(),
                    };
                    teams::ActiveModel::from(&team).insert(&db_tx).await?;
                    tracing::debug!("registered team {number}");
                    team
                }
            };

            Ok(team)
        })
    }

    /// Returns the team with `number`, registered or not.
    pub async fn team(&self, number: i64) -> ResultEngine<Team> {
        let number = require_team_number(number)?;
        teams::Entity::find_by_id(number)
            .one(&self.database)
            .await?
            .map(Team::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("team {number}")))
    }

    /// Returns the ten data set slots of the team with `number`.
    pub async fn team_stats(&self, number: i64) -> ResultEngine<DataSets> {
        self.team(number).await.map(|team| team.data_sets)
    }
}
