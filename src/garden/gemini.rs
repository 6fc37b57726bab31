//! HTTP theme provider backed by the Gemini `generateContent` API.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::ThemeProviderConfig;
use super::mood::{parse_theme_payload, ThemeError, ThemeProvider};
use super::theme::GardenTheme;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: ThemeSchema,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Response schema constraining the model to the five theme fields.
#[derive(Debug, Serialize)]
struct ThemeSchema {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: BTreeMap<&'static str, SchemaField>,
    required: [&'static str; 5],
}

#[derive(Debug, Serialize)]
struct SchemaField {
    #[serde(rename = "type")]
    kind: &'static str,
    description: &'static str,
}

const THEME_FIELDS: [(&str, &str); 5] = [
    ("primaryColor", "HEX color for flowers"),
    ("secondaryColor", "HEX color for accent features"),
    ("groundColor", "HEX color for the grass/ground"),
    ("skyColor", "HEX color for the horizon/sky"),
    ("moodDescription", "Poetic 1-sentence description"),
];

fn theme_schema() -> ThemeSchema {
    ThemeSchema {
        kind: "OBJECT",
        properties: THEME_FIELDS
            .iter()
            .map(|&(name, description)| (name, SchemaField { kind: "STRING", description }))
            .collect(),
        required: THEME_FIELDS.map(|(name, _)| name),
    }
}

fn prompt(mood: &str) -> String {
    format!(
        "Generate a visual theme for a 3D garden based on the mood: \"{mood}\". \
         Provide a color palette and a brief poetic description of the atmosphere."
    )
}

/// Pull the generated text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String, ThemeError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ThemeError::Malformed(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ThemeError::Malformed("response has no candidate text".into()))
}

pub struct GeminiThemeProvider {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiThemeProvider {
    /// Build a provider from config. The API key is read from the
    /// configured environment variable; a missing key is reported per
    /// request rather than here.
    pub fn new(config: &ThemeProviderConfig) -> Result<Self, ThemeError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ThemeError::Network(format!("failed to create HTTP client: {e}")))?;
        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            log::warn!("{} is not set; mood themes will use the fallback", config.api_key_env);
        }
        Ok(Self {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key,
            timeout,
        })
    }

    async fn generate(&self, mood: &str) -> Result<GardenTheme, ThemeError> {
        let key = self.api_key.as_deref().ok_or(ThemeError::MissingApiKey)?;
        let request = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt(mood) }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: theme_schema(),
            },
        };

        let send = self.client.post(&self.url).header("x-goog-api-key", key).json(&request).send();
        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) if e.is_timeout() => return Err(ThemeError::Timeout),
            Ok(Err(e)) => return Err(ThemeError::Network(e.to_string())),
            Err(_) => return Err(ThemeError::Timeout),
        };

        if !response.status().is_success() {
            return Err(ThemeError::Http(response.status().as_u16()));
        }

        let body = response.text().await.map_err(|e| ThemeError::Network(e.to_string()))?;
        let text = extract_text(&body)?;
        parse_theme_payload(&text)
    }
}

impl ThemeProvider for GeminiThemeProvider {
    async fn request_theme(&self, mood: &str) -> Result<GardenTheme, ThemeError> {
        self.generate(mood).await
    }
}
