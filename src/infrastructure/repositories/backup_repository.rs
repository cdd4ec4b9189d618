//! SeaORM implementation of BackupRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::domain::{Asset, BackupRepository, BackupSnapshot, DomainError};
use crate::models::{asset, survey_event, user_change_event};

/// SeaORM-based implementation of BackupRepository
pub struct SeaOrmBackupRepository {
    db: DatabaseConnection,
}

impl SeaOrmBackupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BackupRepository for SeaOrmBackupRepository {
    async fn snapshot(&self, now: DateTime<Utc>) -> Result<BackupSnapshot, DomainError> {
        // Read all three tables in one transaction so the dump is consistent
        let txn = self.db.begin().await?;

        let assets = asset::Entity::find()
            .filter(asset::Column::IsDeleted.eq(false))
            .order_by_asc(asset::Column::Id)
            .all(&txn)
            .await?;
        let surveys = survey_event::Entity::find()
            .order_by_asc(survey_event::Column::Id)
            .all(&txn)
            .await?;
        let user_changes = user_change_event::Entity::find()
            .order_by_asc(user_change_event::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(BackupSnapshot {
            backup_date: now,
            assets: assets.into_iter().map(Asset::from).collect(),
            surveys: surveys.into_iter().map(Into::into).collect(),
            user_changes: user_changes.into_iter().map(Into::into).collect(),
        })
    }
}
