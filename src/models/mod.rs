pub mod asset;
pub mod survey_event;
pub mod user_change_event;
