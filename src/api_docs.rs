use crate::api;
use crate::domain;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::root,
        api::assets::register_asset,
        api::assets::get_asset,
        api::assets::reassign_user,
        api::survey::complete_survey,
        api::admin::list_assets,
        api::admin::survey_status,
        api::admin::survey_history,
        api::admin::update_asset_info,
        api::admin::delete_asset,
        api::admin::backup,
    ),
    components(
        schemas(
            domain::Asset,
            domain::AssetListing,
            domain::RegisterAssetInput,
            domain::SurveyEvent,
            domain::UserChangeEvent,
            domain::SurveyHistoryEntry,
            domain::SurveyStatus,
            domain::BackupSnapshot,
            api::assets::ReassignUserRequest,
            api::survey::CompleteSurveyRequest,
            api::admin::UpdateAssetInfoRequest,
        )
    ),
    tags(
        (name = "asset-registry", description = "PC asset registry API")
    )
)]
pub struct ApiDoc;
