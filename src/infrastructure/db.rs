use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::models::{asset, survey_event, user_change_event};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    run_migrations(&db).await?;

    tracing::info!("Database ready ({:?})", db.get_database_backend());
    Ok(db)
}

/// Create tables and indexes from the entity definitions. Idempotent.
async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, asset::Entity).await?;
    create_table(db, survey_event::Entity).await?;
    create_table(db, user_change_event::Entity).await?;

    // One survey per asset per day
    let mut daily = Index::create();
    daily
        .name("idx_survey_events_asset_day")
        .table(survey_event::Entity)
        .col(survey_event::Column::AssetNumber)
        .col(survey_event::Column::SurveyDay)
        .unique()
        .if_not_exists();
    db.execute(db.get_database_backend().build(&daily)).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    Ok(())
}
