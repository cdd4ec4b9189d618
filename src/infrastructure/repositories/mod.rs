//! Repository implementations using SeaORM

pub mod asset_repository;
pub mod backup_repository;
pub mod survey_repository;

pub use asset_repository::SeaOrmAssetRepository;
pub use backup_repository::SeaOrmBackupRepository;
pub use survey_repository::SeaOrmSurveyRepository;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::models::asset;

/// Non-deleted asset row by number, on a connection or inside a transaction
pub(crate) async fn find_active_asset<C>(
    conn: &C,
    asset_number: &str,
) -> Result<Option<asset::Model>, DbErr>
where
    C: ConnectionTrait,
{
    asset::Entity::find()
        .filter(asset::Column::AssetNumber.eq(asset_number))
        .filter(asset::Column::IsDeleted.eq(false))
        .one(conn)
        .await
}
