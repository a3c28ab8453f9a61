use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_MODEL: &str = "gpt-5";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_COUNTRY: &str = "PL";
pub const DEFAULT_TIMEZONE: &str = "Europe/Warsaw";

/// Response metadata the search tool attaches when asked to.
const INCLUDE_SEARCH_SOURCES: &str = "web_search_call.action.sources";

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("Missing OPENAI_API_KEY environment variable")]
    MissingApiKey,
    #[error("Invalid OPENAI_BASE_URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Empty response from OpenAI (no output text)")]
    EmptyResponse,
    #[error("OpenAI API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OpenAiConfig {
    #[serde(rename = "openai_api_key")]
    pub api_key: Option<String>,
    #[serde(rename = "openai_model")]
    pub model: Option<String>,
    #[serde(rename = "openai_base_url")]
    pub base_url: Option<String>,
    #[serde(rename = "agent_country")]
    pub country: Option<String>,
    #[serde(rename = "agent_timezone")]
    pub timezone: Option<String>,
    /// Comma-separated list of domains the search tool may cite.
    pub allowed_domains: Option<String>,
}

/// Client for the Responses API with the hosted web search tool enabled.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    model: String,
    endpoint: String,
    country: String,
    timezone: String,
    allowed_domains: Vec<String>,
    client: Client,
}

#[derive(Serialize, Debug)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    tools: Vec<WebSearchTool<'a>>,
    tool_choice: &'a str,
    include: Vec<&'a str>,
}

#[derive(Serialize, Debug)]
struct WebSearchTool<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    user_location: UserLocation<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<SearchFilters<'a>>,
}

#[derive(Serialize, Debug)]
struct UserLocation<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    country: &'a str,
    timezone: &'a str,
}

#[derive(Serialize, Debug)]
struct SearchFilters<'a> {
    allowed_domains: &'a [String],
}

#[derive(Deserialize, Debug)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    WebSearchCall {
        #[serde(default)]
        action: Option<SearchAction>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText {
        text: String,
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug)]
struct Annotation {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Deserialize, Debug)]
struct SearchAction {
    #[serde(default)]
    sources: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl ResponsesResponse {
    /// Concatenates every `output_text` part of every message item.
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                _ => None,
            })
            .flatten()
            .filter_map(|part| match part {
                ContentPart::OutputText { text, .. } => Some(text.as_str()),
                ContentPart::Other => None,
            })
            .collect()
    }

    fn source_count(&self) -> usize {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::WebSearchCall {
                    action: Some(action),
                } => Some(action.sources.len()),
                _ => None,
            })
            .sum()
    }

    fn citation_count(&self) -> usize {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                _ => None,
            })
            .flatten()
            .map(|part| match part {
                ContentPart::OutputText { annotations, .. } => annotations
                    .iter()
                    .filter(|a| a.kind == "url_citation")
                    .count(),
                ContentPart::Other => 0,
            })
            .sum()
    }
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, OpenAiError> {
        let api_key = config
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;

        let base_url = config
            .base_url
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(base_url.trim())
            .map_err(|_| OpenAiError::InvalidBaseUrl(base_url.clone()))?;
        let endpoint = format!("{}/responses", base_url.as_str().trim_end_matches('/'));

        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("Invalid OPENAI_API_KEY for Authorization header")?;
        headers.insert(AUTHORIZATION, auth_value);
        // No request timeout on completions.
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build OpenAI HTTP client")?;

        Ok(Self {
            model: resolve_model(config.model.as_deref()),
            endpoint,
            country: config
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            timezone: config
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            allowed_domains: parse_allowed_domains(config.allowed_domains.as_deref()),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Runs one web-search-backed completion and returns the trimmed output text.
    pub async fn complete(&self, prompt: &str) -> Result<String, OpenAiError> {
        let filters = if self.allowed_domains.is_empty() {
            None
        } else {
            Some(SearchFilters {
                allowed_domains: &self.allowed_domains,
            })
        };
        let request = ResponsesRequest {
            model: &self.model,
            input: prompt,
            tools: vec![WebSearchTool {
                kind: "web_search",
                user_location: UserLocation {
                    kind: "approximate",
                    country: &self.country,
                    timezone: &self.timezone,
                },
                filters,
            }],
            tool_choice: "auto",
            include: vec![INCLUDE_SEARCH_SOURCES],
        };

        log::info!(
            "requesting brief from {} (country: {}, timezone: {}, allowed domains: {})...",
            self.model,
            self.country,
            self.timezone,
            self.allowed_domains.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("OpenAI responses request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::ApiStatus { status, body });
        }

        let body = response.text().await.context("OpenAI responses body")?;
        let response_data: ResponsesResponse =
            serde_json::from_str(&body).context("OpenAI responses JSON")?;

        log::debug!(
            "search returned {} sources, output carries {} url citations",
            response_data.source_count(),
            response_data.citation_count()
        );
        if let Some(usage) = &response_data.usage {
            log::debug!(
                "token usage: {} input, {} output",
                usage.input_tokens,
                usage.output_tokens
            );
        }

        let text = response_data.output_text().trim().to_string();
        if text.is_empty() {
            return Err(OpenAiError::EmptyResponse);
        }
        log::info!("received brief ({} chars)", text.chars().count());
        Ok(text)
    }
}

/// Resolves the configured model, falling back to [`DEFAULT_MODEL`] when the
/// value is unset or blank.
pub fn resolve_model(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MODEL)
        .to_string()
}

pub fn parse_allowed_domains(csv: Option<&str>) -> Vec<String> {
    csv.unwrap_or_default()
        .split(',')
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}
