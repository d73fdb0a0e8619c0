use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wayfarer API",
        version = "1.0.0",
        description = "Backend API for the Wayfarer travel itinerary planner"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::itinerary_handler::create_itinerary,
        crate::handlers::itinerary_handler::list_itinerary,
    ),
    components(
        schemas(
            crate::models::ItineraryEntry,
            crate::models::CreateItineraryInput,
            crate::models::ItineraryCreatedResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "itinerary", description = "Itinerary entry creation and listing"),
    )
)]
pub struct ApiDoc;
