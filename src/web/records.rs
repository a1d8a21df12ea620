use crate::{
    db::{queries, CreatedResponse, Database, ListResponse, RECORD_CREATED_MESSAGE},
    generator::RecordGenerator,
    web::ApiError,
};
use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::info;

/// GET /records - every Record node, unfiltered and unpaginated
pub async fn list_records_handler(
    State(db): State<Database>,
) -> Result<Json<ListResponse>, ApiError> {
    let records = queries::list_records(&db).await?;

    info!("Returning {} records", records.len());
    Ok(Json(ListResponse::new(records)))
}

/// POST /records - store one generated record and echo what was stored.
/// Any request body is ignored.
pub async fn create_record_handler(
    State(db): State<Database>,
    State(generator): State<Arc<dyn RecordGenerator>>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let record = generator.generate();
    let stored = queries::create_record(&db, &record).await?;

    info!(
        "Created record {} {} (population {}, ghg {})",
        record.iso_code, record.year, record.population, record.total_ghg
    );
    Ok(Json(CreatedResponse {
        message: RECORD_CREATED_MESSAGE.to_string(),
        data: stored,
    }))
}
