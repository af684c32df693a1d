//! Roster management: role listings and targeted member updates.
//!
//! Every mutation reports how many users it touched and fails with
//! [`EngineError::KeyNotFound`] when nothing matched.

use sea_orm::{
    Condition, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use serde_json::json;

use crate::{
    EngineError, ResultEngine, password, users,
    users::{ROLE_CAPTAIN, ROLE_SCOUTER, User},
};

use super::{Engine, normalize_required, require_affected, with_tx};

/// Set `column` to `value` on every user matching `condition`.
async fn update_users<C: ConnectionTrait>(
    db: &C,
    column: users::Column,
    value: String,
    condition: Condition,
    what: &str,
) -> ResultEngine<u64> {
    let result = users::Entity::update_many()
        .col_expr(column, Expr::value(value))
        .filter(condition)
        .exec(db)
        .await?;
    require_affected(result.rows_affected, what)
}

impl Engine {
    /// Lists the scouters and captains of the team with `team_code`.
    pub async fn list_scouters_and_captains(&self, team_code: &str) -> ResultEngine<Vec<User>> {
        let team_code = normalize_required(team_code, "team code")?;

        let members: Vec<User> = users::Entity::find()
            .filter(users::Column::TeamCode.eq(team_code.as_str()))
            .filter(
                Condition::any()
                    .add(users::Column::Role.eq(ROLE_SCOUTER))
                    .add(users::Column::Role.eq(ROLE_CAPTAIN)),
            )
            .order_by_asc(users::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(User::from)
            .collect();

        if members.is_empty() {
            return Err(EngineError::KeyNotFound(format!(
                "scouters or captains of {team_code}"
            )));
        }
        Ok(members)
    }

    /// Stores a `{Time, Date, Team}` schedule entry in the time table of the
    /// users named `member`.
    pub async fn update_member_time_table(
        &self,
        member: &str,
        time: &str,
        date: &str,
        team: &str,
    ) -> ResultEngine<u64> {
        let member = normalize_required(member, "member")?;
        let time_table = json!({
            "Time": normalize_required(time, "time")?,
            "Date": normalize_required(date, "date")?,
            "Team": normalize_required(team, "team")?,
        });

        update_users(
            &self.database,
            users::Column::TimeTable,
            time_table.to_string(),
            Condition::all().add(users::Column::Name.eq(member.as_str())),
            &member,
        )
        .await
    }

    /// Renames the user with `email` currently named `old`.
    pub async fn update_member_name(&self, old: &str, email: &str, new: &str) -> ResultEngine<u64> {
        let old = normalize_required(old, "old name")?;
        let email = normalize_required(email, "email")?;
        let new = normalize_required(new, "new name")?;

        update_users(
            &self.database,
            users::Column::Name,
            new,
            Condition::all()
                .add(users::Column::Name.eq(old.as_str()))
                .add(users::Column::Email.eq(email.as_str())),
            &email,
        )
        .await
    }

    /// Replaces the password of the user identified by `name` and `email`.
    pub async fn update_member_password(
        &self,
        name: &str,
        email: &str,
        new: &str,
    ) -> ResultEngine<u64> {
        let name = normalize_required(name, "name")?;
        let email = normalize_required(email, "email")?;
        if new.is_empty() {
            return Err(EngineError::InvalidInput("password is required".to_string()));
        }
        let hash = password::hash(new)?;

        update_users(
            &self.database,
            users::Column::Password,
            hash,
            Condition::all()
                .add(users::Column::Name.eq(name.as_str()))
                .add(users::Column::Email.eq(email.as_str())),
            &email,
        )
        .await
    }

    /// Moves the user `name` from `old_email` to `new`.
    pub async fn update_member_email(
        &self,
        name: &str,
        old_email: &str,
        new: &str,
    ) -> ResultEngine<u64> {
        let name = normalize_required(name, "name")?;
        let old_email = normalize_required(old_email, "old email")?;
        let new = normalize_required(new, "new email")?;

        with_tx!(self, |db_tx| {
            if new != old_email
                && users::Entity::find_by_id(new.clone())
                    .one(&db_tx)
                    .await?
                    .is_some()
            {
                return Err(EngineError::ExistingKey(new));
            }

            update_users(
                &db_tx,
                users::Column::Email,
                new,
                Condition::all()
                    .add(users::Column::Name.eq(name.as_str()))
                    .add(users::Column::Email.eq(old_email.as_str())),
                &old_email,
            )
            .await
        })
    }

    /// Moves the user identified by `name` and `email` from team `old` to
    /// team `new`. The new team must be registered.
    pub async fn update_member_team(
        &self,
        old: &str,
        new: &str,
        name: &str,
        email: &str,
    ) -> ResultEngine<u64> {
        let old = normalize_required(old, "old team code")?;
        let new = normalize_required(new, "new team code")?;
        let name = normalize_required(name, "name")?;
        let email = normalize_required(email, "email")?;

        with_tx!(self, |db_tx| {
            self.require_registered_team(&db_tx, &new).await?;

            update_users(
                &db_tx,
                users::Column::TeamCode,
                new,
                Condition::all()
                    .add(users::Column::TeamCode.eq(old.as_str()))
                    .add(users::Column::Name.eq(name.as_str()))
                    .add(users::Column::Email.eq(email.as_str())),
                &email,
            )
            .await
        })
    }

    /// Changes the role of the user identified by `email` and `name` from
    /// `old` to `new`.
    pub async fn update_member_role(
        &self,
        email: &str,
        name: &str,
        old: &str,
        new: &str,
    ) -> ResultEngine<u64> {
        let email = normalize_required(email, "email")?;
        let name = normalize_required(name, "name")?;
        let old = normalize_required(old, "old role")?;
        let new = normalize_required(new, "new role")?;

        update_users(
            &self.database,
            users::Column::Role,
            new,
            Condition::all()
                .add(users::Column::Email.eq(email.as_str()))
                .add(users::Column::Name.eq(name.as_str()))
                .add(users::Column::Role.eq(old.as_str())),
            &email,
        )
        .await
    }

    /// Deletes users named `name`.
    ///
    /// Names are not unique: without `email` every user with that name is
    /// deleted, across teams. Pass `email` to delete exactly one user.
    pub async fn delete_member(&self, name: &str, email: Option<&str>) -> ResultEngine<u64> {
        let name = normalize_required(name, "name")?;

        let mut condition = Condition::all().add(users::Column::Name.eq(name.as_str()));
        if let Some(email) = super::normalize_optional(email) {
            condition = condition.add(users::Column::Email.eq(email));
        }

        let result = users::Entity::delete_many()
            .filter(condition)
            .exec(&self.database)
            .await?;
        if result.rows_affected > 1 {
            tracing::warn!("deleted {} users named {name}", result.rows_affected);
        }
        require_affected(result.rows_affected, &name)
    }

    /// Stores `time_table` for the user `name` of team `team_code`.
    ///
    /// Strings are stored verbatim, any other JSON value as its serialized
    /// text.
    pub async fn update_time_table(
        &self,
        name: &str,
        team_code: &str,
        time_table: &serde_json::Value,
    ) -> ResultEngine<u64> {
        let name = normalize_required(name, "name")?;
        let team_code = normalize_required(team_code, "team code")?;
        let time_table = match time_table {
            serde_json::Value::Null => {
                return Err(EngineError::InvalidInput(
                    "time table is required".to_string(),
                ));
            }
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        update_users(
            &self.database,
            users::Column::TimeTable,
            time_table,
            Condition::all()
                .add(users::Column::Name.eq(name.as_str()))
                .add(users::Column::TeamCode.eq(team_code.as_str())),
            &name,
        )
        .await
    }
}
