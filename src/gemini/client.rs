use std::env;

use reqwest::Client;
use tracing::{debug, error, warn};

use super::grounding::normalize_response;
use super::types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GoogleSearch,
    GuideResponse, Tool,
};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash";

/// Persona and formatting rules sent with every request.
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "You are DigiTravel, an expert, real-time global travel companion. \n",
    "        Your goal is to provide accurate, up-to-date, and helpful information to travelers exploring any part of the world.\n",
    "        Use the Google Search tool to find the latest prices, opening hours, weather, events, and travel advisories for any location requested.\n",
    "        Format your response nicely with clear paragraphs. Do not use markdown headers (like # or ##), use bolding for emphasis instead.\n",
    "        Be welcoming, inspiring, and culturally aware of the destination being discussed.",
);

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY not set. Get one at https://aistudio.google.com/apikey")]
    ApiKeyNotSet,

    #[error("API key rejected ({code}): {message}")]
    Unauthorized { code: u16, message: String },

    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Grounded travel question answering.
/// Implemented by `GeminiClient` for production; mock implementations used in tests.
pub trait GuideClient {
    async fn query(&self, prompt: &str) -> Result<GuideResponse, GeminiError>;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl GeminiClient {
    pub fn from_env(http: Client) -> Result<Self, GeminiError> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| GeminiError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(GeminiError::ApiKeyNotSet);
        }
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            base_url: base_url.to_string(),
        }
    }

    async fn generate_with_search(
        &self,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/{}:generateContent", self.base_url, MODEL);

        let request = GenerateContentRequest {
            contents: vec![Content::text(None, prompt)],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
        };

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<GenerateContentResponse>(&text)
                && let Some(err) = &body.error
            {
                return Err(classify_api_error(err, status.as_u16()));
            }
            let snippet = if text.len() > 200 {
                &text[..text.floor_char_boundary(200)]
            } else {
                &text
            };
            return Err(classify_api_error(
                &ApiError {
                    code: Some(status.as_u16()),
                    message: Some(format!("HTTP {status}: {snippet}")),
                },
                status.as_u16(),
            ));
        }

        let body: GenerateContentResponse = serde_json::from_str(&text)?;
        debug!(model = MODEL, "gemini grounded query complete");

        if let Some(err) = &body.error {
            warn!("Gemini API error in 200 response");
            return Err(classify_api_error(err, status.as_u16()));
        }

        Ok(body)
    }
}

impl GuideClient for GeminiClient {
    async fn query(&self, prompt: &str) -> Result<GuideResponse, GeminiError> {
        let response = self
            .generate_with_search(prompt)
            .await
            .inspect_err(|e| error!(error = %e, "Gemini API error"))?;
        Ok(normalize_response(&response))
    }
}

/// Maps an API error object to a `GeminiError`, using `status` when the body carries no code.
fn classify_api_error(err: &ApiError, status: u16) -> GeminiError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code.unwrap_or(status) {
        code @ (401 | 403) => GeminiError::Unauthorized { code, message },
        429 => GeminiError::RateLimited,
        code => GeminiError::Api { code, message },
    }
}
