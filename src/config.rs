use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Base URL clients can reach this server on; prefixed onto generated
    /// image paths so the stored `image_url` is directly fetchable.
    pub public_base_url: String,
    pub static_dir: PathBuf,
    pub google_api_key: String,
    /// Optional; when absent, image generation is skipped rather than failing
    /// the request.
    pub huggingface_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:itinerary.db".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => 8080,
        };

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let google_api_key =
            env::var("GOOGLE_API_KEY").map_err(|_| "GOOGLE_API_KEY must be set".to_string())?;

        let huggingface_api_key = env::var("HUGGINGFACE_API_KEY").ok();

        Ok(Self {
            database_url,
            port,
            public_base_url,
            static_dir,
            google_api_key,
            huggingface_api_key,
        })
    }
}
