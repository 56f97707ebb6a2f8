//! Solution grading through an OpenAI-compatible chat-completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::environment::GraderConfig;
use crate::modules::problems::model::Problem;

const SYSTEM_PROMPT: &str =
    "You are an expert code reviewer who provides accurate and helpful feedback on solutions.";
const TEMPERATURE: f32 = 0.3;

#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response contained no message content")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Match percentage out of range: {0}")]
    OutOfRange(f64),
}

/// Everything the grader needs to compare two solutions
#[derive(Debug, Clone)]
pub struct GradingRequest {
    pub title: String,
    pub description: String,
    pub functional_requirements: Vec<String>,
    pub non_functional_requirements: Vec<String>,
    pub user_solution: String,
    pub reference_solution: String,
}

impl GradingRequest {
    pub fn for_problem(problem: &Problem, user_solution: &str) -> Self {
        Self {
            title: problem.title.clone(),
            description: problem.description.clone(),
            functional_requirements: problem.functional_requirements.clone(),
            non_functional_requirements: problem.non_functional_requirements.clone(),
            user_solution: user_solution.to_string(),
            reference_solution: problem.reference_solution.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    #[serde(rename = "matchPercentage")]
    pub match_percentage: f64,
    pub feedback: String,
}

#[async_trait]
pub trait Grader: Send + Sync {
    async fn evaluate(&self, request: &GradingRequest) -> Result<GradingResult, GraderError>;
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(request: &GradingRequest) -> String {
    format!(
        "You are an expert code reviewer. Compare the user's solution with the reference solution for the following problem:\n\
         \n\
         Problem Title: {title}\n\
         Problem Description: {description}\n\
         \n\
         Functional Requirements:\n\
         {functional}\n\
         \n\
         Non-Functional Requirements:\n\
         {non_functional}\n\
         \n\
         User's Solution:\n\
         {user}\n\
         \n\
         Reference Solution:\n\
         {reference}\n\
         \n\
         Please analyze the user's solution compared to the reference solution and provide:\n\
         1. A match percentage (0-100) based on how well the user's solution addresses the problem requirements and matches the approach of the reference solution. Don't require exact word matching, focus on the approach and key concepts.\n\
         2. Detailed feedback explaining the match percentage, highlighting strengths and areas for improvement.\n\
         \n\
         Format your response as JSON:\n\
         {{\n  \"matchPercentage\": number,\n  \"feedback\": \"detailed feedback here\"\n}}\n",
        title = request.title,
        description = request.description,
        functional = bullet_list(&request.functional_requirements),
        non_functional = bullet_list(&request.non_functional_requirements),
        user = request.user_solution,
        reference = request.reference_solution,
    )
}

/// Parse the model's JSON reply, rejecting anything outside 0..=100.
pub fn parse_grading_payload(content: &str) -> Result<GradingResult, GraderError> {
    let result: GradingResult =
        serde_json::from_str(content).map_err(|e| GraderError::Parse(e.to_string()))?;

    if !result.match_percentage.is_finite() || !(0.0..=100.0).contains(&result.match_percentage) {
        return Err(GraderError::OutOfRange(result.match_percentage));
    }

    Ok(result)
}

// =============================================================================
// CHAT COMPLETIONS CLIENT
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiGrader {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiGrader {
    pub fn new(config: &GraderConfig) -> Result<Self, GraderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GraderError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Grader for OpenAiGrader {
    async fn evaluate(&self, request: &GradingRequest) -> Result<GradingResult, GraderError> {
        let prompt = build_prompt(request);
        tracing::debug!("Grading prompt built ({} bytes) for '{}'", prompt.len(), request.title);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GraderError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GraderError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GraderError::Parse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GraderError::EmptyResponse)?;

        parse_grading_payload(&content)
    }
}
