use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    models::{CreateItineraryInput, ItineraryCreatedResponse, ItineraryEntry},
    AppError, AppResult, AppState,
};

/// POST /api/itinerary - Generate description + image for a location and
/// store the entry
#[utoipa::path(
    post,
    path = "/api/itinerary",
    request_body = CreateItineraryInput,
    responses(
        (status = 201, description = "Itinerary entry created", body = ItineraryCreatedResponse),
        (status = 400, description = "Missing location/date or malformed date"),
        (status = 502, description = "Description provider failure")
    ),
    tag = "itinerary"
)]
pub async fn create_itinerary(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateItineraryInput>,
) -> AppResult<(StatusCode, Json<ItineraryCreatedResponse>)> {
    let location = input.location.filter(|l| !l.is_empty());
    let date = input.date.filter(|d| !d.is_empty());

    let (Some(location), Some(date)) = (location, date) else {
        return Err(AppError::BadRequest(
            "Location and date are required".to_string(),
        ));
    };

    NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("Invalid date format, use YYYY-MM-DD".to_string())
    })?;

    // Both provider calls run sequentially on the request task. A description
    // failure aborts the request before anything is stored; an image failure
    // only costs the picture.
    let description = state.description_generator.generate(&location).await?;
    let image_url = state.image_generator.generate(&location).await.into_url();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO itinerary (location, date, description, image_url) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&location)
    .bind(&date)
    .bind(&description)
    .bind(&image_url)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(id, location, date, has_image = image_url.is_some(), "Itinerary entry created");

    Ok((
        StatusCode::CREATED,
        Json(ItineraryCreatedResponse {
            message: "Itinerary added".to_string(),
            location,
            date,
            description,
            image_url,
        }),
    ))
}

/// GET /api/itinerary - All entries, ascending by date
#[utoipa::path(
    get,
    path = "/api/itinerary",
    responses(
        (status = 200, description = "All itinerary entries ordered by date", body = Vec<ItineraryEntry>)
    ),
    tag = "itinerary"
)]
pub async fn list_itinerary(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<ItineraryEntry>>> {
    let entries = sqlx::query_as::<_, ItineraryEntry>(
        "SELECT location, date, description, image_url FROM itinerary ORDER BY date",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
