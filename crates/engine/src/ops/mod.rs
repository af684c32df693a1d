use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod reports;
mod roster;
mod teams;
mod users;

pub use reports::ReportOutcome;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Trim a required field and reject it when blank.
fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn require_team_number(number: i64) -> ResultEngine<i64> {
    if number <= 0 {
        return Err(EngineError::InvalidInput(
            "team number must be > 0".to_string(),
        ));
    }
    Ok(number)
}

/// Turn an update that matched nothing into a not-found error.
fn require_affected(rows_affected: u64, what: &str) -> ResultEngine<u64> {
    if rows_affected == 0 {
        return Err(EngineError::KeyNotFound(what.to_string()));
    }
    Ok(rows_affected)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
