//! SeaORM implementation of AssetRepository

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::find_active_asset;
use crate::domain::{
    Asset, AssetListing, AssetRepository, DeletedAssetPolicy, DomainError, RegisterAssetInput,
    Registration, UpdateAssetInput, UserChangeEvent,
};
use crate::models::asset::{ActiveModel, Column, Entity as AssetEntity};
use crate::models::{survey_event, user_change_event};

const DUPLICATE_ASSET: &str = "Asset number is already registered";
const DUPLICATE_RENAME: &str = "The new asset number already exists";

/// SeaORM-based implementation of AssetRepository
pub struct SeaOrmAssetRepository {
    db: DatabaseConnection,
    deleted_policy: DeletedAssetPolicy,
}

impl SeaOrmAssetRepository {
    pub fn new(db: DatabaseConnection, deleted_policy: DeletedAssetPolicy) -> Self {
        Self { db, deleted_policy }
    }
}

#[async_trait]
impl AssetRepository for SeaOrmAssetRepository {
    async fn register(
        &self,
        input: RegisterAssetInput,
        now: DateTime<Utc>,
    ) -> Result<Registration, DomainError> {
        let txn = self.db.begin().await?;

        // Deleted rows included: the number is unique across the whole table
        let existing = AssetEntity::find()
            .filter(Column::AssetNumber.eq(input.asset_number.as_str()))
            .one(&txn)
            .await?;

        let registration = match existing {
            Some(asset) if !asset.is_deleted => {
                return Err(DomainError::Conflict(DUPLICATE_ASSET.to_string()));
            }
            Some(asset) => {
                if self.deleted_policy == DeletedAssetPolicy::Reject {
                    return Err(DomainError::Conflict(
                        "Asset number belongs to a deleted asset".to_string(),
                    ));
                }

                let mut active: ActiveModel = asset.into();
                active.is_deleted = Set(false);
                active.pc_management_number = Set(input.pc_management_number);
                active.location_name = Set(input.location_name);
                active.employee_number = Set(input.employee_number);
                active.last_updated_at = Set(now);
                let revived = active.update(&txn).await?;

                Registration {
                    id: revived.id,
                    asset_number: revived.asset_number,
                    revived: true,
                }
            }
            None => {
                let new_asset = ActiveModel {
                    asset_number: Set(input.asset_number),
                    pc_management_number: Set(input.pc_management_number),
                    location_name: Set(input.location_name),
                    employee_number: Set(input.employee_number),
                    registered_at: Set(now),
                    last_updated_at: Set(now),
                    is_deleted: Set(false),
                    ..Default::default()
                };
                let created = new_asset
                    .insert(&txn)
                    .await
                    .map_err(|e| DomainError::from_write(e, DUPLICATE_ASSET))?;

                Registration {
                    id: created.id,
                    asset_number: created.asset_number,
                    revived: false,
                }
            }
        };

        txn.commit().await?;

        if registration.revived {
            tracing::info!("Asset {} revived (id {})", registration.asset_number, registration.id);
        } else {
            tracing::info!("Asset {} registered (id {})", registration.asset_number, registration.id);
        }
        Ok(registration)
    }

    async fn find_active(&self, asset_number: &str) -> Result<Option<Asset>, DomainError> {
        let asset = find_active_asset(&self.db, asset_number).await?;
        Ok(asset.map(Asset::from))
    }

    async fn reassign_user(
        &self,
        asset_number: &str,
        new_employee_number: String,
        now: DateTime<Utc>,
    ) -> Result<UserChangeEvent, DomainError> {
        let txn = self.db.begin().await?;

        let asset = find_active_asset(&txn, asset_number)
            .await?
            .ok_or_else(DomainError::asset_not_found)?;

        let change = user_change_event::ActiveModel {
            asset_number: Set(asset.asset_number.clone()),
            old_employee_number: Set(asset.employee_number.clone()),
            new_employee_number: Set(new_employee_number.clone()),
            changed_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut active: ActiveModel = asset.into();
        active.employee_number = Set(new_employee_number);
        active.last_updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "Asset {} reassigned from {} to {}",
            change.asset_number,
            change.old_employee_number,
            change.new_employee_number
        );
        Ok(change.into())
    }

    async fn update_info(
        &self,
        asset_number: &str,
        input: UpdateAssetInput,
        now: DateTime<Utc>,
    ) -> Result<Asset, DomainError> {
        let txn = self.db.begin().await?;

        let asset = find_active_asset(&txn, asset_number)
            .await?
            .ok_or_else(DomainError::asset_not_found)?;
        let mut active: ActiveModel = asset.into();

        let rename = input
            .new_asset_number
            .filter(|new_number| new_number != asset_number);

        if let Some(new_number) = rename {
            // Stricter than registration: a deleted row also blocks the new number
            let taken = AssetEntity::find()
                .filter(Column::AssetNumber.eq(new_number.as_str()))
                .count(&txn)
                .await?;
            if taken > 0 {
                return Err(DomainError::Conflict(DUPLICATE_RENAME.to_string()));
            }

            // History tables key on the number itself, so rewrite them by hand
            let surveys = survey_event::Entity::update_many()
                .col_expr(
                    survey_event::Column::AssetNumber,
                    Expr::value(new_number.clone()),
                )
                .filter(survey_event::Column::AssetNumber.eq(asset_number))
                .exec(&txn)
                .await
                .map_err(|e| DomainError::from_write(e, DUPLICATE_RENAME))?;

            let changes = user_change_event::Entity::update_many()
                .col_expr(
                    user_change_event::Column::AssetNumber,
                    Expr::value(new_number.clone()),
                )
                .filter(user_change_event::Column::AssetNumber.eq(asset_number))
                .exec(&txn)
                .await?;

            tracing::info!(
                "Asset {} renamed to {} ({} surveys, {} user changes moved)",
                asset_number,
                new_number,
                surveys.rows_affected,
                changes.rows_affected
            );
            active.asset_number = Set(new_number);
        }

        if let Some(pc_management_number) = input.pc_management_number {
            active.pc_management_number = Set(pc_management_number);
        }
        if let Some(location_name) = input.location_name {
            active.location_name = Set(location_name);
        }
        if let Some(employee_number) = input.employee_number {
            active.employee_number = Set(employee_number);
        }
        active.last_updated_at = Set(now);

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| DomainError::from_write(e, DUPLICATE_RENAME))?;

        txn.commit().await?;

        Ok(updated.into())
    }

    async fn soft_delete(
        &self,
        asset_number: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let asset = find_active_asset(&self.db, asset_number)
            .await?
            .ok_or_else(DomainError::asset_not_found)?;

        let mut active: ActiveModel = asset.into();
        active.is_deleted = Set(true);
        active.last_updated_at = Set(now);
        active.update(&self.db).await?;

        tracing::info!("Asset {} deleted", asset_number);
        Ok(())
    }

    async fn list_active(&self, day: NaiveDate) -> Result<Vec<AssetListing>, DomainError> {
        let assets = AssetEntity::find()
            .filter(Column::IsDeleted.eq(false))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        let surveyed: HashSet<String> = survey_event::Entity::find()
            .select_only()
            .column(survey_event::Column::AssetNumber)
            .filter(survey_event::Column::SurveyDay.eq(day))
            .into_tuple::<String>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(assets
            .into_iter()
            .map(|a| {
                let surveyed_today = surveyed.contains(&a.asset_number);
                AssetListing {
                    asset: a.into(),
                    surveyed_today,
                }
            })
            .collect())
    }
}
