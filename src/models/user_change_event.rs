use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::UserChangeEvent;

/// Append-only audit of employee reassignments
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_change_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub asset_number: String,
    pub old_employee_number: String,
    pub new_employee_number: String,
    pub changed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserChangeEvent {
    fn from(m: Model) -> Self {
        UserChangeEvent {
            id: m.id,
            asset_number: m.asset_number,
            old_employee_number: m.old_employee_number,
            new_employee_number: m.new_employee_number,
            changed_at: m.changed_at,
        }
    }
}
