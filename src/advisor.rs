// 🤖 Home Advisor - chat pass-through to a text-completion API
//
// One question in, one reply out. The home's key facts are folded into the
// prompt; failures become a fixed apology in the transcript and never bubble up.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::AdvisorConfig;
use crate::home::HomeProfile;

pub const MISSING_KEY_REPLY: &str =
    "API Key is missing. Please configure your environment to use the AI Advisor.";
pub const FAILURE_REPLY: &str =
    "Sorry, I encountered an error while analyzing your request. Please try again.";
pub const EMPTY_REPLY: &str = "I couldn't generate a response at this time.";

// ============================================================================
// TRANSCRIPT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Advisor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
        }
    }
}

/// Append-only conversation, opened by a greeting about the home
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(home: &HomeProfile) -> Self {
        let greeting = format!(
            "Hi! I'm your Home Assistant. I know about your property at {}. \
             Ask me about maintenance, renovation costs, or maximizing your home value!",
            home.address
        );
        Transcript {
            messages: vec![ChatMessage::new(Sender::Advisor, greeting)],
        }
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::new(sender, text));
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ============================================================================
// PROMPT
// ============================================================================

/// Key facts about the home, one per line
pub fn home_context(home: &HomeProfile) -> String {
    format!(
        "Address: {}\nValue: ${}\nSqft: {}\nBuilt: {}\nBeds: {}\nBaths: {}",
        home.address, home.current_value, home.sqft, home.year_built, home.beds, home.baths
    )
}

pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Context: The user is a homeowner using a management dashboard.\n\
         Home Details: {context}\n\
         \n\
         User Question: {question}\n\
         \n\
         Provide a helpful, concise response focusing on home value, maintenance advice, \
         or financial impact. Format with clear paragraphs."
    )
}

// ============================================================================
// COMPLETION CLIENT
// ============================================================================

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor API key is not configured")]
    MissingApiKey,

    #[error("failed to reach completion API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Anything that can turn a prompt into text
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
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

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` over HTTPS
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let api_key = config.api_key.clone().ok_or(AdvisorError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(GeminiClient {
            client,
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

// ============================================================================
// ADVISOR
// ============================================================================

/// Front door used by the UI and the server. `ask` always yields display text.
#[derive(Clone)]
pub struct Advisor {
    client: Option<Arc<dyn CompletionClient>>,
    context: String,
}

impl Advisor {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, home: &HomeProfile) -> Self {
        Advisor {
            client,
            context: home_context(home),
        }
    }

    /// Wire up Gemini from config. A missing key leaves the advisor offline.
    pub fn from_config(config: &AdvisorConfig, home: &HomeProfile) -> Self {
        let client: Option<Arc<dyn CompletionClient>> = match GeminiClient::new(config) {
            Ok(client) => Some(Arc::new(client)),
            Err(AdvisorError::MissingApiKey) => {
                tracing::warn!("no API key configured; advisor will reply with a setup message");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to build completion client");
                None
            }
        };
        Advisor::new(client, home)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub async fn ask(&self, question: &str) -> String {
        let client = match &self.client {
            Some(client) => client,
            None => return MISSING_KEY_REPLY.to_string(),
        };

        let prompt = build_prompt(question, &self.context);
        match client.complete(&prompt).await {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "advisor request failed");
                FAILURE_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    struct CannedClient {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn new(reply: Result<String, u16>) -> Arc<Self> {
            Arc::new(CannedClient {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(AdvisorError::Api {
                    status: *status,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    /// Answer exactly one HTTP request with a canned response; hands back the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_lowercase();
                            lower.strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn test_config(api_base: String) -> AdvisorConfig {
        AdvisorConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-2.5-flash".to_string(),
            api_base,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_transcript_starts_with_greeting() {
        let home = HomeProfile::sample();
        let transcript = Transcript::new(&home);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::Advisor);
        assert!(transcript.messages()[0].text.contains("123 Arbor Lane, Austin TX"));
    }

    #[test]
    fn test_transcript_appends_in_order() {
        let mut transcript = Transcript::new(&HomeProfile::sample());
        transcript.push(Sender::User, "Should I redo the kitchen?");
        transcript.push(Sender::Advisor, "Maybe.");

        let senders: Vec<Sender> = transcript.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::Advisor, Sender::User, Sender::Advisor]);
        assert_ne!(transcript.messages()[1].id, transcript.messages()[2].id);
    }

    #[test]
    fn test_prompt_includes_context_and_question() {
        let context = home_context(&HomeProfile::sample());
        assert!(context.contains("Value: $452000"));
        assert!(context.contains("Built: 2005"));
        assert!(context.contains("Baths: 2.5"));

        let prompt = build_prompt("Is my roof old?", &context);
        assert!(prompt.contains("User Question: Is my roof old?"));
        assert!(prompt.contains("Address: 123 Arbor Lane, Austin TX"));
        assert!(prompt.contains("Format with clear paragraphs."));
    }

    #[tokio::test]
    async fn test_ask_without_key_returns_setup_message() {
        let advisor = Advisor::from_config(&AdvisorConfig::default(), &HomeProfile::sample());
        assert!(!advisor.is_configured());
        assert_eq!(advisor.ask("hello").await, MISSING_KEY_REPLY);
    }

    #[tokio::test]
    async fn test_ask_passes_reply_through() {
        let client = CannedClient::new(Ok("Clean your gutters twice a year.".to_string()));
        let shared: Arc<dyn CompletionClient> = client.clone();
        let advisor = Advisor::new(Some(shared), &HomeProfile::sample());

        let reply = advisor.ask("What should I do this fall?").await;
        assert_eq!(reply, "Clean your gutters twice a year.");

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("What should I do this fall?"));
    }

    #[tokio::test]
    async fn test_ask_maps_failures_to_apology() {
        let client: Arc<dyn CompletionClient> = CannedClient::new(Err(500));
        let advisor = Advisor::new(Some(client), &HomeProfile::sample());
        assert_eq!(advisor.ask("anything").await, FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_ask_maps_blank_reply() {
        let client: Arc<dyn CompletionClient> = CannedClient::new(Ok("  ".to_string()));
        let advisor = Advisor::new(Some(client), &HomeProfile::sample());
        assert_eq!(advisor.ask("anything").await, EMPTY_REPLY);
    }

    #[test]
    fn test_gemini_client_requires_key() {
        let result = GeminiClient::new(&AdvisorConfig::default());
        assert!(matches!(result, Err(AdvisorError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_gemini_client_parses_candidates() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"homeowner."}]}}]}"#,
        )
        .await;

        let client = GeminiClient::new(&test_config(base)).unwrap();
        let reply = client.complete("prompt text").await.unwrap();
        assert_eq!(reply, "Hello homeowner.");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /models/gemini-2.5-flash:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(raw.contains("prompt text"));
    }

    #[tokio::test]
    async fn test_gemini_client_empty_candidates() {
        let (base, _request) = serve_once("200 OK", r#"{"candidates":[]}"#).await;
        let client = GeminiClient::new(&test_config(base)).unwrap();
        assert_eq!(client.complete("prompt").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_gemini_client_surfaces_api_errors() {
        let (base, _request) = serve_once("403 Forbidden", r#"{"error":{"message":"bad key"}}"#).await;
        let client = GeminiClient::new(&test_config(base)).unwrap();

        match client.complete("prompt").await {
            Err(AdvisorError::Api { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected API error, got {:?}", other.map(|_| ())),
        }
    }
}
