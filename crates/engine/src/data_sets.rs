//! Data set slots and the report arithmetic applied to them.
//!
//! A team carries ten named slots (`DataSetOne` … `DataSetTen`). Reports
//! address them by ordinal key (`"One"` … `"Ten"`) and say how the submitted
//! value combines with the stored one:
//!
//! - `text`: overwrite.
//! - `number`: add to the stored value.
//! - `avg`: replace with the mean of the stored and the submitted value.
//!
//! Slots are persisted as text. An empty (or never written) slot counts as
//! `0` for `number` and `avg`; any other non-numeric text is rejected.

use serde_json::Value;

use crate::{EngineError, ResultEngine};

/// One of the ten data set slots of a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataSet {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
}

impl DataSet {
    pub const ALL: [DataSet; 10] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
    ];

    /// Ordinal key used in report bodies.
    pub fn key(self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Six => "Six",
            Self::Seven => "Seven",
            Self::Eight => "Eight",
            Self::Nine => "Nine",
            Self::Ten => "Ten",
        }
    }

    /// Field name used when the slot is returned to clients.
    pub fn field(self) -> &'static str {
        match self {
            Self::One => "DataSetOne",
            Self::Two => "DataSetTwo",
            Self::Three => "DataSetThree",
            Self::Four => "DataSetFour",
            Self::Five => "DataSetFive",
            Self::Six => "DataSetSix",
            Self::Seven => "DataSetSeven",
            Self::Eight => "DataSetEight",
            Self::Nine => "DataSetNine",
            Self::Ten => "DataSetTen",
        }
    }
}

impl TryFrom<&str> for DataSet {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key() == value)
            .ok_or_else(|| EngineError::InvalidReport(format!("unknown data set: {value}")))
    }
}

/// How a report value combines with the stored slot value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    Text,
    Number,
    Avg,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Avg => "avg",
        }
    }
}

impl TryFrom<&str> for ReportKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "avg" => Ok(Self::Avg),
            other => Err(EngineError::InvalidReport(format!(
                "invalid data set type: {other}"
            ))),
        }
    }
}

/// A single validated report entry.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportUpdate {
    Text { slot: DataSet, value: String },
    Number { slot: DataSet, value: f64 },
    Avg { slot: DataSet, value: f64 },
}

impl ReportUpdate {
    /// Builds an update from the raw `[type, value]` pair of a report body.
    pub fn parse(slot: DataSet, kind: &str, value: &Value) -> ResultEngine<Self> {
        match ReportKind::try_from(kind)? {
            ReportKind::Text => Ok(Self::Text {
                slot,
                value: text_value(slot, value)?,
            }),
            ReportKind::Number => Ok(Self::Number {
                slot,
                value: numeric_value(slot, value)?,
            }),
            ReportKind::Avg => Ok(Self::Avg {
                slot,
                value: numeric_value(slot, value)?,
            }),
        }
    }

    pub fn slot(&self) -> DataSet {
        match self {
            Self::Text { slot, .. } | Self::Number { slot, .. } | Self::Avg { slot, .. } => *slot,
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Text { .. } => ReportKind::Text,
            Self::Number { .. } => ReportKind::Number,
            Self::Avg { .. } => ReportKind::Avg,
        }
    }

    /// Computes the new slot value from the current one.
    pub fn apply(&self, current: Option<&str>) -> ResultEngine<String> {
        match self {
            Self::Text { value, .. } => Ok(value.clone()),
            Self::Number { slot, value } => {
                let current = stored_number(*slot, current)?;
                render_number(*slot, current + value)
            }
            Self::Avg { slot, value } => {
                let current = stored_number(*slot, current)?;
                render_number(*slot, current / 2.0 + value / 2.0)
            }
        }
    }
}

fn text_value(slot: DataSet, value: &Value) -> ResultEngine<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(EngineError::InvalidReport(format!(
            "{} expects a text value",
            slot.key()
        ))),
    }
}

fn numeric_value(slot: DataSet, value: &Value) -> ResultEngine<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).ok_or_else(|| {
        EngineError::InvalidReport(format!("{} expects a numeric value", slot.key()))
    })
}

fn stored_number(slot: DataSet, current: Option<&str>) -> ResultEngine<f64> {
    let current = current.map(str::trim).unwrap_or_default();
    if current.is_empty() {
        return Ok(0.0);
    }
    current
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            EngineError::InvalidReport(format!("{} holds a non-numeric value", slot.field()))
        })
}

/// Renders a number the way it is stored: integral values without a
/// fractional part. Results that overflow are rejected.
fn render_number(slot: DataSet, value: f64) -> ResultEngine<String> {
    if !value.is_finite() {
        return Err(EngineError::InvalidReport(format!(
            "{} would overflow",
            slot.field()
        )));
    }
    if value == 0.0 {
        // Avoid persisting "-0".
        return Ok("0".to_string());
    }
    Ok(value.to_string())
}
