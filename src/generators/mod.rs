pub mod description;
pub mod image;

pub use description::{DescriptionConfig, DescriptionError, DescriptionGenerator};
pub use image::{ImageConfig, ImageError, ImageGenerator, ImageOutcome};
