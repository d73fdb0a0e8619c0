pub mod health;
pub mod itinerary_handler;
pub mod metrics;

pub use health::health_check;
pub use metrics::{metrics_handler, setup_metrics_recorder, MetricsState};
