//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AssetRepository, BackupRepository, DeletedAssetPolicy, SurveyRepository};
use crate::infrastructure::config::AuthConfig;
use crate::infrastructure::{
    SeaOrmAssetRepository, SeaOrmBackupRepository, SeaOrmSurveyRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    auth: Arc<AuthConfig>,
    /// Asset repository
    pub asset_repo: Arc<dyn AssetRepository>,
    /// Survey repository
    pub survey_repo: Arc<dyn SurveyRepository>,
    /// Backup repository
    pub backup_repo: Arc<dyn BackupRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, policy: DeletedAssetPolicy, auth: AuthConfig) -> Self {
        let asset_repo = Arc::new(SeaOrmAssetRepository::new(db.clone(), policy));
        let survey_repo = Arc::new(SeaOrmSurveyRepository::new(db.clone()));
        let backup_repo = Arc::new(SeaOrmBackupRepository::new(db));

        Self {
            auth: Arc::new(auth),
            asset_repo,
            survey_repo,
            backup_repo,
        }
    }

    /// Configured bearer secrets
    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }
}
