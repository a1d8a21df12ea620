use crate::{
    db::{queries, Database, ListResponse},
    web::ApiError,
};
use axum::{extract::State, response::Json};
use tracing::info;

/// GET /countries - every Country node with whatever properties it holds
pub async fn countries_handler(
    State(db): State<Database>,
) -> Result<Json<ListResponse>, ApiError> {
    let countries = queries::list_countries(&db).await?;

    info!("Returning {} countries", countries.len());
    Ok(Json(ListResponse::new(countries)))
}
