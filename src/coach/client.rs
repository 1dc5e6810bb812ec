//! Generative model seam and the Gemini REST client behind it.

use super::error::CoachError;
use super::image::EncodedImage;
use crate::config::CoachConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// One prompt, optionally with an inline image and a JSON response schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<EncodedImage>,
    /// When set, the model is asked for JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: EncodedImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A text generation backend.
pub trait GenerativeModel {
    /// Returns the generated text. An empty string means the model
    /// answered without any text.
    fn generate(&self, request: &GenerationRequest) -> Result<String, CoachError>;
}

// ============================================================================
// Gemini wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Blocking client for the Google Generative Language API.
pub struct GeminiClient {
    config: CoachConfig,
    agent: ureq::Agent,
}

impl GeminiClient {
    pub fn new(config: CoachConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self { config, agent }
    }

    fn build_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        )
    }
}

impl GenerativeModel for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, CoachError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CoachError::MissingApiKey)?;

        debug!(
            model = %self.config.model,
            with_image = request.image.is_some(),
            structured = request.response_schema.is_some(),
            "sending generation request"
        );

        let body = build_gemini_request(request);
        let response = self
            .agent
            .post(&self.build_url(api_key))
            .set("Content-Type", "application/json")
            .send_json(&body);

        match response {
            Ok(resp) => {
                let parsed: GeminiResponse =
                    resp.into_json().map_err(|e| CoachError::Request {
                        message: format!("failed to parse response: {}", e),
                    })?;
                extract_text(parsed)
            }
            Err(ureq::Error::Status(status, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                let err = map_api_error(status, &text);
                warn!(status, "generation request rejected");
                Err(err)
            }
            Err(e) => Err(CoachError::Request {
                message: e.to_string(),
            }),
        }
    }
}

fn build_gemini_request(request: &GenerationRequest) -> GeminiRequest {
    let mut parts = Vec::new();
    if let Some(image) = &request.image {
        parts.push(RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        });
    }
    parts.push(RequestPart::Text {
        text: request.prompt.clone(),
    });

    GeminiRequest {
        contents: vec![GeminiContent { parts }],
        generation_config: request
            .response_schema
            .as_ref()
            .map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            }),
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, CoachError> {
    if let Some(error) = response.error {
        return Err(CoachError::Api {
            status: 200,
            message: error.message,
        });
    }

    let text = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}

fn map_api_error(status: u16, body: &str) -> CoachError {
    let message = serde_json::from_str::<GeminiResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_string(), |e| e.message);
    CoachError::Api { status, message }
}
