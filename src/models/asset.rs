use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Asset;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Business key. Unique across deleted rows too, so a soft-deleted
    /// number can only come back through revival.
    #[sea_orm(unique)]
    pub asset_number: String,
    pub pc_management_number: String,
    pub location_name: String,
    pub employee_number: String,
    pub registered_at: DateTimeUtc,
    pub last_updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Asset {
    fn from(m: Model) -> Self {
        Asset {
            id: m.id,
            asset_number: m.asset_number,
            pc_management_number: m.pc_management_number,
            location_name: m.location_name,
            employee_number: m.employee_number,
            registered_at: m.registered_at,
            last_updated_at: m.last_updated_at,
        }
    }
}
