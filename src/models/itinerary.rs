use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One stored itinerary row as returned by the list endpoint. The table also
/// carries an autoincrement `id`, which is not exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ItineraryEntry {
    pub location: String,
    /// Calendar date in `YYYY-MM-DD` form; stored as text so ascending text
    /// order is ascending chronological order.
    pub date: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
