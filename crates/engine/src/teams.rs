//! The module contains the representation of a team.
//!
//! A team is keyed by its number. It may exist before it is registered: when
//! reports arrive for a number nobody registered yet, an unregistered team is
//! staged with only the slots those reports wrote. Registration assigns the
//! team code and name and fills the remaining slots with empty strings.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::data_sets::DataSet;

/// A team and its ten data set slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub number: i64,
    pub team_code: Option<String>,
    pub name: Option<String>,
    pub registered: bool,
    pub data_sets: DataSets,
}

/// Slot values in ordinal order. `None` means the slot was never written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSets([Option<String>; 10]);

impl DataSets {
    /// All slots set to the empty string, as a freshly registered team has.
    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| Some(String::new())))
    }

    pub fn get(&self, slot: DataSet) -> Option<&str> {
        self.0[slot as usize].as_deref()
    }

    pub fn set(&mut self, slot: DataSet, value: String) {
        self.0[slot as usize] = Some(value);
    }

    /// Iterates `(slot, value)` pairs in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (DataSet, Option<&str>)> {
        DataSet::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: i64,
    #[sea_orm(unique)]
    pub team_code: Option<String>,
    pub name: Option<String>,
    pub registered: bool,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Marks a single slot for writing, leaving the others untouched.
    pub(crate) fn set_data_set(&mut self, slot: DataSet, value: String) {
        let value = ActiveValue::Set(Some(value));
        match slot {
            DataSet::One => self.data_set_one = value,
            DataSet::Two => self.data_set_two = value,
            DataSet::Three => self.data_set_three = value,
            DataSet::Four => self.data_set_four = value,
            DataSet::Five => self.data_set_five = value,
            DataSet::Six => self.data_set_six = value,
            DataSet::Seven => self.data_set_seven = value,
            DataSet::Eight => self.data_set_eight = value,
            DataSet::Nine => self.data_set_nine = value,
            DataSet::Ten => self.data_set_ten = value,
        }
    }
}

impl From<&Team> for ActiveModel {
    fn from(team: &Team) -> Self {
        let [one, two, three, four, five, six, seven, eight, nine, ten] = team.data_sets.0.clone();
        Self {
            number: ActiveValue::Set(team.number),
            team_code: ActiveValue::Set(team.team_code.clone()),
            name: ActiveValue::Set(team.name.clone()),
            registered: ActiveValue::Set(team.registered),
            data_set_one: ActiveValue::Set(one),
            data_set_two: ActiveValue::Set(two),
            data_set_three: ActiveValue::Set(three),
            data_set_four: ActiveValue::Set(four),
            data_set_five: ActiveValue::Set(five),
            data_set_six: ActiveValue::Set(six),
            data_set_seven: ActiveValue::Set(seven),
            data_set_eight: ActiveValue::Set(eight),
            data_set_nine: ActiveValue::Set(nine),
            data_set_ten: ActiveValue::Set(ten),
        }
    }
}

impl From<Model> for Team {
    fn from(model: Model) -> Self {
        Self {
            number: model.number,
            team_code: model.team_code,
            name: model.name,
            registered: model.registered,
            data_sets: DataSets([
                model.data_set_one,
                model.data_set_two,
                model.data_set_three,
                model.data_set_four,
                model.data_set_five,
                model.data_set_six,
                model.data_set_seven,
                model.data_set_eight,
                model.data_set_nine,
                model.data_set_ten,
            ]),
        }
    }
}
