use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::SurveyEvent;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "survey_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    // References assets.asset_number by value; rewritten on rename.
    #[sea_orm(indexed)]
    pub asset_number: String,
    pub survey_date: DateTimeUtc,
    /// UTC date of `survey_date`, unique per asset
    pub survey_day: Date,
    pub completed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SurveyEvent {
    fn from(m: Model) -> Self {
        SurveyEvent {
            id: m.id,
            asset_number: m.asset_number,
            survey_date: m.survey_date,
            completed_at: m.completed_at,
        }
    }
}
