//! Survey report helpers

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::DomainError;

pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shown in history rows whose asset record is gone
pub const MISSING_FIELD: &str = "-";
pub const MISSING_LOCATION: &str = "정보 없음";

/// Survey completion figures for one day
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SurveyStatus {
    pub survey_date: NaiveDate,
    pub total: u64,
    pub completed: u64,
    pub remaining: u64,
    pub completion_rate: f64,
}

impl SurveyStatus {
    pub fn from_counts(survey_date: NaiveDate, total: u64, completed: u64) -> Self {
        Self {
            survey_date,
            total,
            completed,
            remaining: total.saturating_sub(completed),
            completion_rate: completion_rate(completed, total),
        }
    }
}

/// Percentage rounded to two decimals, 0 when there is nothing to survey
pub fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = completed as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Parse a `YYYY-MM-DD` query parameter
pub fn parse_report_date(field: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT).map_err(|_| {
        DomainError::InvalidArgument(format!(
            "{} must be a date in YYYY-MM-DD format, got '{}'",
            field, value
        ))
    })
}

/// Calendar day a timestamp belongs to (UTC)
pub fn survey_day(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}
