//! Team registry engine.
//!
//! Owns the `users` and `teams` tables and implements every registry
//! operation: user registration and login, team registration, data set
//! reports and roster management.

pub use data_sets::{DataSet, ReportKind, ReportUpdate};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, ReportOutcome};
pub use teams::{DataSets, Team};
pub use users::{ROLE_CAPTAIN, ROLE_SCOUTER, User};

mod data_sets;
mod error;
mod ops;
mod password;
mod teams;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
