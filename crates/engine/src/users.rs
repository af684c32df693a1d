//! Users table.
//!
//! A user is identified by email and belongs to a team through its team code.
//! The password column always holds an Argon2 PHC string, never the
//! plain-text password.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

/// Role that makes a user show up in the scouting roster.
pub const ROLE_SCOUTER: &str = "Scouter";
/// Role of a team captain.
pub const ROLE_CAPTAIN: &str = "Captain";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub team_code: String,
    pub password: String,
    pub role: Option<String>,
    pub time_table: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,
    pub name: String,
    pub team_code: String,
    pub password: String,
    pub role: Option<String>,
    pub time_table: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            email: ActiveValue::Set(user.email.clone()),
            name: ActiveValue::Set(user.name.clone()),
            team_code: ActiveValue::Set(user.team_code.clone()),
            password: ActiveValue::Set(user.password.clone()),
            role: ActiveValue::Set(user.role.clone()),
            time_table: ActiveValue::Set(user.time_table.clone()),
        }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            email: model.email,
            name: model.name,
            team_code: model.team_code,
            password: model.password,
            role: model.role,
            time_table: model.time_table,
        }
    }
}
