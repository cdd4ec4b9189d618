//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::report::SurveyStatus;
use super::DomainError;

/// Asset data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    pub id: i32,
    pub asset_number: String,
    pub pc_management_number: String,
    pub location_name: String,
    pub employee_number: String,
    pub registered_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

/// Asset row in the admin listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssetListing {
    #[serde(flatten)]
    pub asset: Asset,
    pub surveyed_today: bool,
}

/// Input for registering an asset
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterAssetInput {
    pub asset_number: String,
    pub pc_management_number: String,
    pub location_name: String,
    pub employee_number: String,
}

/// Result of a registration
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub id: i32,
    pub asset_number: String,
    /// True when a soft-deleted row was reactivated instead of inserting
    pub revived: bool,
}

/// What registration does with an asset number held by a soft-deleted row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletedAssetPolicy {
    /// Reactivate the row and overwrite its mutable fields
    Revive,
    /// Refuse with `Conflict`
    Reject,
}

/// Partial update applied by an administrator.
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAssetInput {
    pub new_asset_number: Option<String>,
    pub pc_management_number: Option<String>,
    pub location_name: Option<String>,
    pub employee_number: Option<String>,
}

/// Completed physical check of an asset
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SurveyEvent {
    pub id: i32,
    pub asset_number: String,
    pub survey_date: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Audit row written on every user reassignment
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserChangeEvent {
    pub id: i32,
    pub asset_number: String,
    pub old_employee_number: String,
    pub new_employee_number: String,
    pub changed_at: DateTime<Utc>,
}

/// Survey event joined with whatever asset row still carries its number
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SurveyHistoryEntry {
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub survey_date: String,
    pub asset_number: String,
    pub pc_management_number: String,
    pub location_name: String,
    pub employee_number: String,
}

/// Full data dump
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BackupSnapshot {
    pub backup_date: DateTime<Utc>,
    pub assets: Vec<Asset>,
    pub surveys: Vec<SurveyEvent>,
    pub user_changes: Vec<UserChangeEvent>,
}

/// Repository trait for Asset entity
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Register a new asset, or revive a soft-deleted one depending on policy
    async fn register(
        &self,
        input: RegisterAssetInput,
        now: DateTime<Utc>,
    ) -> Result<Registration, DomainError>;

    /// Find a non-deleted asset by its number
    async fn find_active(&self, asset_number: &str) -> Result<Option<Asset>, DomainError>;

    /// Change the assigned employee and append an audit row, atomically
    async fn reassign_user(
        &self,
        asset_number: &str,
        new_employee_number: String,
        now: DateTime<Utc>,
    ) -> Result<UserChangeEvent, DomainError>;

    /// Admin update, including renaming the asset number with cascade
    async fn update_info(
        &self,
        asset_number: &str,
        input: UpdateAssetInput,
        now: DateTime<Utc>,
    ) -> Result<Asset, DomainError>;

    /// Soft-delete; history rows are kept
    async fn soft_delete(&self, asset_number: &str, now: DateTime<Utc>)
        -> Result<(), DomainError>;

    /// All non-deleted assets flagged with whether they were surveyed on `day`
    async fn list_active(&self, day: NaiveDate) -> Result<Vec<AssetListing>, DomainError>;
}

/// Repository trait for survey events and survey reports
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Record a survey for an active asset; at most one per UTC day
    async fn complete(&self, asset_number: &str, now: DateTime<Utc>)
        -> Result<SurveyEvent, DomainError>;

    /// Completion figures for one day
    async fn status(&self, day: NaiveDate) -> Result<SurveyStatus, DomainError>;

    /// Surveys with `start <= day <= end`, newest first
    async fn history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SurveyHistoryEntry>, DomainError>;
}

/// Repository trait for full-data export
#[async_trait]
pub trait BackupRepository: Send + Sync {
    async fn snapshot(&self, now: DateTime<Utc>) -> Result<BackupSnapshot, DomainError>;
}
