use metrics::counter;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

const IMAGE_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-3.5-large";

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image provider credential not configured")]
    MissingApiKey,

    #[error("image provider request timed out")]
    Timeout,

    #[error("image provider request failed: {0}")]
    Http(reqwest::Error),

    #[error("image provider error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("failed to write image file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ImageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ImageError::Timeout
        } else {
            ImageError::Http(e)
        }
    }
}

/// Result of an image-generation attempt. Failures are carried as data so the
/// create flow can proceed without an image instead of aborting.
#[derive(Debug)]
pub enum ImageOutcome {
    /// Image written to the static directory; holds its servable URL.
    Generated(String),
    Skipped(ImageError),
}

impl ImageOutcome {
    pub fn into_url(self) -> Option<String> {
        match self {
            ImageOutcome::Generated(url) => Some(url),
            ImageOutcome::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub static_dir: PathBuf,
    pub public_base_url: String,
}

impl ImageConfig {
    pub fn new(api_key: Option<String>, static_dir: PathBuf, public_base_url: String) -> Self {
        Self {
            api_key,
            endpoint: IMAGE_ENDPOINT.to_string(),
            static_dir,
            public_base_url,
        }
    }
}

/// Generates a scenic image for a location via the Hugging Face inference API
/// and stores it under the static directory.
#[derive(Debug, Clone)]
pub struct ImageGenerator {
    client: Client,
    config: ImageConfig,
}

impl ImageGenerator {
    pub fn new(config: ImageConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self { client, config })
    }

    /// Attempt to generate an image for `location`.
    ///
    /// Never fails the caller: a missing credential, provider error, timeout,
    /// or file-write error is logged and returned as `Skipped`, and the
    /// itinerary entry is stored without an image.
    pub async fn generate(&self, location: &str) -> ImageOutcome {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::info!(location, "Image provider credential not set, skipping image");
            counter!("images_skipped_total", "reason" => "missing_api_key").increment(1);
            return ImageOutcome::Skipped(ImageError::MissingApiKey);
        };

        match self.try_generate(location, api_key).await {
            Ok(url) => {
                counter!("images_generated_total").increment(1);
                tracing::debug!(location, url = %url, "Image generated");
                ImageOutcome::Generated(url)
            }
            Err(e) => {
                tracing::warn!(error = %e, location, "Image generation failed, continuing without image");
                counter!("images_skipped_total", "reason" => "provider_failure").increment(1);
                ImageOutcome::Skipped(e)
            }
        }
    }

    async fn try_generate(&self, location: &str, api_key: &str) -> Result<String, ImageError> {
        let prompt = format!(
            "A scenic view of {}, vibrant and detailed, suitable for a travel itinerary",
            location
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&serde_json::json!({ "inputs": prompt }))
            .send()
            .await?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;

        let file_name = image_file_name(location);
        let path = self.config.static_dir.join(&file_name);
        // Same location, same path: a second entry overwrites the first image.
        tokio::fs::write(&path, &bytes).await?;

        Ok(format!("{}/static/{}", self.config.public_base_url, file_name))
    }

    pub fn static_dir(&self) -> &Path {
        &self.config.static_dir
    }
}

/// Derive the on-disk file name from a location, replacing spaces with
/// underscores.
fn image_file_name(location: &str) -> String {
    format!("{}.jpg", location.replace(' ', "_"))
}
