//! JSON bodies exchanged with the registry HTTP API.
//!
//! Field names follow the wire format clients already speak, which mixes
//! `camelCase`, `PascalCase` and spaced names. Every request field is optional
//! at the type level so the server can answer a missing field with a 400 and a
//! readable message instead of a body rejection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success envelope: `{"success": true, ...payload}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

/// Failure envelope: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Outcome of a write.
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteResult {
    pub changes: u64,
}

/// Payload wrapping a write outcome under `result`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteResponse {
    pub result: WriteResult,
}

/// Payload for mutations that only report a message and the affected rows.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
}

/// An integer as clients send it: a JSON integer, an integral float such
/// as `254.0`, or a numeric string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Integer {
    Number(i64),
    Float(f64),
    Text(String),
}

impl Integer {
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Float(float) => integral(*float),
            Self::Text(text) => {
                let text = text.trim();
                text.parse()
                    .ok()
                    .or_else(|| text.parse().ok().and_then(integral))
            }
        }
    }
}

fn integral(float: f64) -> Option<i64> {
    (float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64)
        .then_some(float as i64)
}

/// A team number; only positive integers are valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamNumber(pub Integer);

impl TeamNumber {
    /// The number, when it is a positive integer.
    pub fn value(&self) -> Option<i64> {
        self.0.value().filter(|n| *n > 0)
    }
}

/// A free-text field that clients sometimes send as a bare number or boolean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::Bool(flag) => flag.to_string(),
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AddUser {
        pub email: Option<String>,
        pub name: Option<String>,
        #[serde(rename = "teamCode")]
        pub team_code: Option<String>,
        #[serde(rename = "Password")]
        pub password: Option<String>,
        #[serde(rename = "Role")]
        pub role: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GetUser {
        pub email: Option<String>,
        #[serde(rename = "Password")]
        pub password: Option<String>,
    }

    /// Authenticated user as returned by `/getUser`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct UserView {
        pub email: String,
        pub team_code: String,
        pub name: String,
        pub password: String,
        pub role: Option<String>,
        pub time_table: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub message: String,
        pub data: UserView,
    }
}

pub mod team {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AddTeam {
        #[serde(rename = "teamCode")]
        pub team_code: Option<String>,
        #[serde(rename = "teamNum")]
        pub team_num: Option<TeamNumber>,
        #[serde(rename = "teamName")]
        pub team_name: Option<String>,
    }

    /// Body of `/getTeam` and `/getStatsOfTeam`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TeamLookup {
        #[serde(rename = "teamNum")]
        pub team_num: Option<TeamNumber>,
    }

    /// The ten data set slots; `null` for a slot never written.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DataSetsView {
        pub data_set_one: Option<String>,
        pub data_set_two: Option<String>,
        pub data_set_three: Option<String>,
        pub data_set_four: Option<String>,
        pub data_set_five: Option<String>,
        pub data_set_six: Option<String>,
        pub data_set_seven: Option<String>,
        pub data_set_eight: Option<String>,
        pub data_set_nine: Option<String>,
        pub data_set_ten: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TeamView {
        #[serde(rename = "Number")]
        pub number: i64,
        #[serde(rename = "Team Code")]
        pub team_code: Option<String>,
        #[serde(rename = "Name")]
        pub name: Option<String>,
        #[serde(rename = "Registered")]
        pub registered: bool,
        #[serde(flatten)]
        pub data_sets: DataSetsView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TeamResponse {
        pub team: TeamView,
    }
}

pub mod report {
    use super::*;

    /// A `[type, value]` pair such as `["number", 3]`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ReportEntry(pub String, pub Value);

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct AddReport {
        pub team_number: Option<TeamNumber>,
        pub number_of_data_sets: Option<Integer>,
        pub one: Option<ReportEntry>,
        pub two: Option<ReportEntry>,
        pub three: Option<ReportEntry>,
        pub four: Option<ReportEntry>,
        pub five: Option<ReportEntry>,
        pub six: Option<ReportEntry>,
        pub seven: Option<ReportEntry>,
        pub eight: Option<ReportEntry>,
        pub nine: Option<ReportEntry>,
        pub ten: Option<ReportEntry>,
    }

    impl AddReport {
        /// Entries in ordinal order, `None` where the key is absent.
        pub fn entries(&self) -> [Option<&ReportEntry>; 10] {
            [
                self.one.as_ref(),
                self.two.as_ref(),
                self.three.as_ref(),
                self.four.as_ref(),
                self.five.as_ref(),
                self.six.as_ref(),
                self.seven.as_ref(),
                self.eight.as_ref(),
                self.nine.as_ref(),
                self.ten.as_ref(),
            ]
        }
    }
}

pub mod roster {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TeamCodeLookup {
        #[serde(rename = "teamCode")]
        pub team_code: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct MemberView {
        pub name: String,
        pub email: String,
        pub role: Option<String>,
        pub time_table: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MembersResponse {
        pub members: Vec<MemberView>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct UpdateMemberTimeTable {
        pub time: Option<Scalar>,
        pub date: Option<Scalar>,
        pub team: Option<Scalar>,
        #[serde(rename = "member")]
        pub member: Option<String>,
    }

    /// Body of `/updateMemberName` and `/updateMemberRole`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UpdateMemberField {
        pub email: Option<String>,
        pub name: Option<String>,
        pub old: Option<String>,
        pub new: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UpdateMemberPass {
        pub name: Option<String>,
        pub email: Option<String>,
        pub new: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UpdateMemberEmail {
        pub name: Option<String>,
        #[serde(rename = "oldEmail")]
        pub old_email: Option<String>,
        pub new: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UpdateMemberTeam {
        pub old: Option<String>,
        pub new: Option<String>,
        pub name: Option<String>,
        pub email: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DeleteMember {
        pub name: Option<String>,
        pub email: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UpdateTimeTable {
        pub name: Option<String>,
        #[serde(rename = "teamCode")]
        pub team_code: Option<String>,
        pub timetable: Option<Value>,
    }
}
