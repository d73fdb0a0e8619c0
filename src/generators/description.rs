use metrics::counter;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed prompt template; `{location}` is substituted in.
const PROMPT_TEMPLATE: &str = "Provide a concise yet engaging description of {location} as a \
     travel destination, highlighting key cultural, historical, and natural attractions in \
     200-300 words, suitable for a travel itinerary.";

#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("language model request timed out")]
    Timeout,

    #[error("language model request failed: {0}")]
    Http(reqwest::Error),

    #[error("language model API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("language model returned no text")]
    Empty,
}

impl From<reqwest::Error> for DescriptionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DescriptionError::Timeout
        } else {
            DescriptionError::Http(e)
        }
    }
}

#[derive(Debug, Clone)]
pub struct DescriptionConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl DescriptionConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 1000,
        }
    }
}

// Gemini generateContent wire types

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    code: u16,
    message: String,
}

/// Generates travel descriptions via the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct DescriptionGenerator {
    client: Client,
    config: DescriptionConfig,
    base_url: String,
}

impl DescriptionGenerator {
    pub fn new(config: DescriptionConfig) -> Result<Self, reqwest::Error> {
        Self::with_base_url(config, GEMINI_BASE_URL.to_string())
    }

    /// Create a generator against a custom base URL (for testing).
    pub fn with_base_url(
        config: DescriptionConfig,
        base_url: String,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Generate a 200-300 word travel description for `location`.
    ///
    /// Failures propagate to the caller; there is no retry and no fallback
    /// text, so the create request aborts without inserting a row.
    pub async fn generate(&self, location: &str) -> Result<String, DescriptionError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.config.model, self.config.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: PROMPT_TEMPLATE.replace("{location}", location),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::debug!(location, model = %self.config.model, "Requesting description");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let error_detail = serde_json::from_str::<GeminiErrorResponse>(&error_body)
                .ok()
                .and_then(|e| e.error);

            let (code, message) = error_detail
                .map(|e| (e.code, e.message))
                .unwrap_or((status.as_u16(), error_body));

            tracing::error!(code, message = %message, location, "Gemini API error");

            return Err(DescriptionError::Api { code, message });
        }

        let body: GenerateResponse = response.json().await?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(DescriptionError::Empty)?;

        counter!("descriptions_generated_total").increment(1);
        tracing::debug!(location, chars = text.len(), "Description generated");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> DescriptionConfig {
        DescriptionConfig::new("test-api-key".to_string())
    }

    fn mock_generate_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[tokio::test]
    async fn generate_returns_candidate_text() {
        let mock_server = MockServer::start().await;
        let generator = DescriptionGenerator::with_base_url(test_config(), mock_server.uri())
            .expect("build generator");

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_generate_response("Paris is the capital of France.")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let text = generator.generate("Paris").await.expect("generate");
        assert_eq!(text, "Paris is the capital of France.");
    }

    #[tokio::test]
    async fn generate_substitutes_location_into_prompt() {
        let mock_server = MockServer::start().await;
        let generator = DescriptionGenerator::with_base_url(test_config(), mock_server.uri())
            .expect("build generator");

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(mock_generate_response("ok")),
            )
            .mount(&mock_server)
            .await;

        generator.generate("Kyoto").await.expect("generate");

        let requests = mock_server.received_requests().await.expect("requests");
        let body: serde_json::Value =
            serde_json::from_slice(&requests[0].body).expect("request body");
        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .expect("prompt text");
        assert!(prompt.contains("Kyoto"));
        assert!(prompt.contains("200-300 words"));

        let gen_config = &body["generationConfig"];
        assert_eq!(gen_config["maxOutputTokens"], 1000);
    }

    #[tokio::test]
    async fn generate_maps_api_error_to_typed_variant() {
        let mock_server = MockServer::start().await;
        let generator = DescriptionGenerator::with_base_url(test_config(), mock_server.uri())
            .expect("build generator");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "code": 429, "message": "Resource exhausted" }
            })))
            .mount(&mock_server)
            .await;

        let err = generator.generate("Paris").await.expect_err("should fail");
        match err {
            DescriptionError::Api { code, message } => {
                assert_eq!(code, 429);
                assert_eq!(message, "Resource exhausted");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_rejects_empty_candidates() {
        let mock_server = MockServer::start().await;
        let generator = DescriptionGenerator::with_base_url(test_config(), mock_server.uri())
            .expect("build generator");

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&mock_server)
            .await;

        let err = generator.generate("Paris").await.expect_err("should fail");
        assert!(matches!(err, DescriptionError::Empty));
    }
}
