use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input for creating an itinerary entry. Both fields are optional at the
/// deserialization layer so a missing field surfaces as our 400 response
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateItineraryInput {
    pub location: Option<String>,
    pub date: Option<String>,
}

/// Response body for a successful create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItineraryCreatedResponse {
    pub message: String,
    pub location: String,
    pub date: String,
    pub description: String,
    pub image_url: Option<String>,
}
