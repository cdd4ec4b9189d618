//! SeaORM implementation of SurveyRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationDef, Set,
};

use super::find_active_asset;
use crate::domain::report::{
    survey_day, HISTORY_TIMESTAMP_FORMAT, MISSING_FIELD, MISSING_LOCATION,
};
use crate::domain::{DomainError, SurveyEvent, SurveyHistoryEntry, SurveyRepository, SurveyStatus};
use crate::models::asset;
use crate::models::survey_event::{ActiveModel, Column, Entity as SurveyEntity};

/// survey_date, asset_number, then the asset columns (NULL without a match)
type HistoryRow = (
    DateTime<Utc>,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

const ALREADY_SURVEYED: &str = "Survey already completed for this asset today";

/// SeaORM-based implementation of SurveyRepository
pub struct SeaOrmSurveyRepository {
    db: DatabaseConnection,
}

impl SeaOrmSurveyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SurveyRepository for SeaOrmSurveyRepository {
    async fn complete(
        &self,
        asset_number: &str,
        now: DateTime<Utc>,
    ) -> Result<SurveyEvent, DomainError> {
        let asset = find_active_asset(&self.db, asset_number)
            .await?
            .ok_or_else(DomainError::asset_not_found)?;

        let day = survey_day(now);
        let done_today = SurveyEntity::find()
            .filter(Column::AssetNumber.eq(asset_number))
            .filter(Column::SurveyDay.eq(day))
            .count(&self.db)
            .await?;
        if done_today > 0 {
            return Err(DomainError::Conflict(ALREADY_SURVEYED.to_string()));
        }

        // The (asset_number, survey_day) index catches a concurrent duplicate
        let survey = ActiveModel {
            asset_number: Set(asset.asset_number),
            survey_date: Set(now),
            survey_day: Set(day),
            completed_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::from_write(e, ALREADY_SURVEYED))?;

        tracing::info!("Survey completed for asset {} on {}", survey.asset_number, day);
        Ok(survey.into())
    }

    async fn status(&self, day: NaiveDate) -> Result<SurveyStatus, DomainError> {
        let total = asset::Entity::find()
            .filter(asset::Column::IsDeleted.eq(false))
            .count(&self.db)
            .await?;

        // Surveys left behind by deleted assets do not count
        let active_numbers = Query::select()
            .column(asset::Column::AssetNumber)
            .from(asset::Entity)
            .and_where(asset::Column::IsDeleted.eq(false))
            .to_owned();

        let surveyed: Vec<String> = SurveyEntity::find()
            .select_only()
            .column(Column::AssetNumber)
            .distinct()
            .filter(Column::SurveyDay.eq(day))
            .filter(Column::AssetNumber.in_subquery(active_numbers))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(SurveyStatus::from_counts(day, total, surveyed.len() as u64))
    }

    async fn history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SurveyHistoryEntry>, DomainError> {
        // Left join: the asset row may be gone or renamed away
        let to_asset: RelationDef = SurveyEntity::belongs_to(asset::Entity)
            .from(Column::AssetNumber)
            .to(asset::Column::AssetNumber)
            .into();

        let rows: Vec<HistoryRow> = SurveyEntity::find()
            .select_only()
            .column(Column::SurveyDate)
            .column(Column::AssetNumber)
            .column(asset::Column::PcManagementNumber)
            .column(asset::Column::LocationName)
            .column(asset::Column::EmployeeNumber)
            .join(JoinType::LeftJoin, to_asset)
            .filter(Column::SurveyDay.gte(start))
            .filter(Column::SurveyDay.lte(end))
            .order_by_desc(Column::SurveyDate)
            .order_by_desc(Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(survey_date, asset_number, pc_management_number, location_name, employee_number)| {
                    SurveyHistoryEntry {
                        survey_date: survey_date.format(HISTORY_TIMESTAMP_FORMAT).to_string(),
                        asset_number,
                        pc_management_number: pc_management_number
                            .unwrap_or_else(|| MISSING_FIELD.to_string()),
                        location_name: location_name
                            .unwrap_or_else(|| MISSING_LOCATION.to_string()),
                        employee_number: employee_number
                            .unwrap_or_else(|| MISSING_FIELD.to_string()),
                    }
                },
            )
            .collect())
    }
}
