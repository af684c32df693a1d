use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, password, teams, users, users::User};

use super::{Engine, normalize_optional, normalize_required, with_tx};

impl Engine {
    /// Registers a user in an existing team.
    ///
    /// Fails with [`EngineError::ExistingKey`] when the email is taken and with
    /// [`EngineError::KeyNotFound`] when no registered team has `team_code`.
    pub async fn add_user(
        &self,
        email: &str,
        name: &str,
        team_code: &str,
        password: &str,
        role: Option<&str>,
    ) -> ResultEngine<User> {
        let email = normalize_required(email, "email")?;
        let name = normalize_required(name, "name")?;
        let team_code = normalize_required(team_code, "team code")?;
        if password.is_empty() {
            return Err(EngineError::InvalidInput("password is required".to_string()));
        }

        let user = User {
            email,
            name,
            team_code,
            password: password::hash(password)?,
            role: normalize_optional(role),
            time_table: None,
        };

        with_tx!(self, |db_tx| {
            if users::Entity::find_by_id(user.email.clone())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(user.email));
            }

            self.require_registered_team(&db_tx, &user.team_code)
                .await?;

            let model = users::ActiveModel::from(&user).insert(&db_tx).await?;
            tracing::debug!("registered user {} in team {}", model.email, model.team_code);
            Ok(User::from(model))
        })
    }

    /// Checks `password` against the stored hash of the user with `email`.
    ///
    /// The error never carries the stored hash.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = normalize_required(email, "email")?;
        if password.is_empty() {
            return Err(EngineError::InvalidInput("password is required".to_string()));
        }

        let user = users::Entity::find_by_id(email.clone())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(email.clone()))?;

        if !password::verify(password, &user.password) {
            tracing::debug!("rejected login for {email}");
            return Err(EngineError::Unauthorized("invalid password".to_string()));
        }

        Ok(User::from(user))
    }

    pub(super) async fn require_registered_team<C: ConnectionTrait>(
        &self,
        db: &C,
        team_code: &str,
    ) -> ResultEngine<teams::Model> {
        teams::Entity::find()
            .filter(teams::Column::TeamCode.eq(team_code))
            .filter(teams::Column::Registered.eq(true))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("team {team_code}")))
    }
}
