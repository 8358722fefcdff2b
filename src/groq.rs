use crate::error::DispatchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 60;

// Model constants - all handle text; the vision models also accept images.
pub const LLAMA_4_MAVERICK: &str = "llama-4-maverick-17b-128e-instruct";
pub const LLAMA_4_SCOUT: &str = "llama-4-scout-17b-16e-instruct";
pub const LLAMA_32_90B_VISION: &str = "llama-3.2-90b-vision-preview";
pub const LLAMA_32_11B_VISION: &str = "llama-3.2-11b-vision-preview";
pub const QWEN_25_72B: &str = "qwen-2.5-72b-versatile";
pub const LLAMA_33_70B: &str = "llama-3.3-70b-versatile";

pub const DEFAULT_MODEL: &str = LLAMA_4_MAVERICK;

/// Selectable models: (display name, model id) in menu order.
pub const GROQ_MODELS: &[(&str, &str)] = &[
    ("Llama 4 Maverick (Recommended)", LLAMA_4_MAVERICK),
    ("Llama 4 Scout", LLAMA_4_SCOUT),
    ("Llama 3.2 90B Vision", LLAMA_32_90B_VISION),
    ("Llama 3.2 11B Vision", LLAMA_32_11B_VISION),
    ("Qwen 2.5 72B", QWEN_25_72B),
    ("Llama 3.3 70B", LLAMA_33_70B),
];

/// Resolve a model id against the fixed table.
pub fn lookup_model(id: &str) -> Option<&'static str> {
    GROQ_MODELS
        .iter()
        .find(|(_, model_id)| *model_id == id)
        .map(|(_, model_id)| *model_id)
}

#[derive(Debug, Serialize, Clone)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// Everything the dispatcher hands to the model for one turn: persona
/// directives as system guidance, the conversation context, and any tool
/// capabilities the persona declares.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub web_search: bool,
}

/// Seam between the dispatcher and the hosted LLM service. The production
/// implementation is `GroqClient`; tests substitute a scripted backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, DispatchError>;
}

#[derive(Debug, Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    tool_type: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<PromptMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolSpec>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: &str) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
        })
    }

    fn parse_error_body(status: u16, body: &str) -> DispatchError {
        let message = match serde_json::from_str::<GroqError>(body) {
            Ok(parsed) => format!("{} - {}", parsed.error.error_type, parsed.error.message),
            Err(_) => body.to_string(),
        };

        match status {
            401 | 403 => DispatchError::Auth { status, message },
            429 => DispatchError::Quota(message),
            _ => DispatchError::Malformed(format!("Groq API error ({}): {}", status, message)),
        }
    }
}

/// Flatten a `CompletionRequest` into the wire shape: system guidance first,
/// then the conversation, with the tool declaration only when the persona
/// carries the capability.
fn build_wire_request(request: CompletionRequest) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(PromptMessage {
        role: "system".to_string(),
        content: request.system_prompt,
    });
    messages.extend(request.messages);

    let tools = if request.web_search {
        Some(vec![ToolSpec {
            tool_type: "browser_search".to_string(),
        }])
    } else {
        None
    };

    ChatCompletionRequest {
        model: request.model,
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        tools,
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, DispatchError> {
        let wire = build_wire_request(request);

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&wire)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error_body(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::Malformed(format!("unparseable response body: {}", e)))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DispatchError::Malformed("no choices in response".to_string()))
    }
}
