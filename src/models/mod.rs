pub mod itinerary;
pub mod itinerary_input;

pub use itinerary::ItineraryEntry;
pub use itinerary_input::{CreateItineraryInput, ItineraryCreatedResponse};
