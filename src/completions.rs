use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_SUMMARY_MODEL: &str = "amazon/nova-2-lite-v1:free";
pub const DEFAULT_QA_MODEL: &str = "mistralai/devstral-2512:free";

/// Output ceiling for both summarization and question answering
const MAX_COMPLETION_TOKENS: u32 = 900;

const SUMMARY_SYSTEM_PROMPT_EN: &str = "You are an AI assistant tasked with summarizing YouTube video transcripts. \
Provide concise, informative summaries that capture the main points of the video content.\n\
Instructions:\n\
1. Summarize the transcript in an ordered list (1., 2., 3., etc.) with clear headings in **bold** where appropriate.\n\
2. Use a new line for each point.\n\
3. Ignore any timestamps in your summary.\n\
4. Focus on the spoken content of the video.";

const SUMMARY_SYSTEM_PROMPT_ZH: &str = "You are an AI assistant tasked with summarizing YouTube video transcripts. \
Provide concise, informative summaries that capture the main points of the video content in Chinese.\n\
Instructions:\n\
1. Summarize the transcript in an ordered list (1., 2., 3., etc.) with clear headings in **bold** where appropriate in Chinese.\n\
2. Use a new line for each point.\n\
3. Ignore any timestamps in your summary.\n\
4. Focus on the spoken content of the video.";

const QA_SYSTEM_PROMPT: &str = "You are an expert assistant providing detailed and accurate answers based on the following video content. \
Your responses should be:\n\
1. Precise and free from repetition\n\
2. Consistent with the information provided in the video\n\
3. Well-organized and easy to understand\n\
4. Focused on addressing the user's question directly\n\
If you encounter conflicting information in the video content, use your best judgment to provide the most likely correct answer based on context.";

const NO_SUMMARY_FALLBACK: &str = "No summary generated";
const NO_ANSWER_FALLBACK: &str = "No answer generated";

/// Summary output language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    /// Anything other than "chinese" reads as English
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("chinese") {
            Language::Chinese
        } else {
            Language::English
        }
    }

    fn summary_system_prompt(self) -> &'static str {
        match self {
            Language::English => SUMMARY_SYSTEM_PROMPT_EN,
            Language::Chinese => SUMMARY_SYSTEM_PROMPT_ZH,
        }
    }
}

/// Chat-completion requester for summaries and question answering
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl CompletionClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: OPENROUTER_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Summarize a transcript in the requested language
    pub async fn summarize(&self, transcript: &str, language: Language, model: &str) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(Error::MissingInput);
        }

        let user_prompt = format!("Please summarize the following YouTube video transcript:\n\n{transcript}");
        let content = self
            .complete(language.summary_system_prompt(), &user_prompt, model)
            .await?;

        Ok(content.unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string()))
    }

    /// Answer a question using the full transcript as context
    pub async fn answer(&self, transcript: &str, question: &str, model: &str) -> Result<String> {
        if transcript.trim().is_empty() || question.trim().is_empty() {
            return Err(Error::MissingInput);
        }

        let user_prompt = format!(
            "Relevant Video Context: {transcript}\n\
             Based on the above context, please answer the following question:\n\
             {question}"
        );
        let content = self.complete(QA_SYSTEM_PROMPT, &user_prompt, model).await?;

        Ok(content.unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string()))
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str, model: &str) -> Result<Option<String>> {
        debug!("Requesting completion from model {model}");

        let body = serde_json::json!({
            "model": model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt }
            ],
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::ModelUnavailable);
        }

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("completion endpoint returned {status}: {body}")));
        }

        let parsed: CompletionResponse = resp.json().await?;
        Ok(extract_content(parsed))
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

fn extract_content(resp: CompletionResponse) -> Option<String> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_defaults_to_english() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::from_name("english"), Language::English);
        assert_eq!(Language::from_name("klingon"), Language::English);
    }

    #[test]
    fn test_language_chinese_by_name() {
        assert_eq!(Language::from_name("chinese"), Language::Chinese);
        assert_eq!(Language::from_name("Chinese"), Language::Chinese);
    }

    #[test]
    fn test_chinese_selects_chinese_prompt() {
        assert!(Language::Chinese.summary_system_prompt().contains("in Chinese"));
        assert!(!Language::English.summary_system_prompt().contains("in Chinese"));
    }

    #[test]
    fn test_extract_content() {
        let resp: CompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Summary of the video." } }
            ]
        }))
        .unwrap();
        assert_eq!(extract_content(resp).as_deref(), Some("Summary of the video."));
    }

    #[test]
    fn test_extract_content_no_choices() {
        let resp: CompletionResponse = serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert_eq!(extract_content(resp), None);
    }

    #[test]
    fn test_extract_content_empty_string() {
        let resp: CompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [ { "message": { "content": "" } } ]
        }))
        .unwrap();
        assert_eq!(extract_content(resp), None);
    }

    #[test]
    fn test_model_unavailable_message_suggests_another_model() {
        let msg = Error::ModelUnavailable.to_string();
        assert!(msg.contains("try a different model"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_empty_transcript() {
        let client = CompletionClient::new(reqwest::Client::new(), "key");
        let err = client.summarize("  ", Language::English, DEFAULT_SUMMARY_MODEL).await.unwrap_err();
        assert!(matches!(err, Error::MissingInput));
    }

    #[tokio::test]
    async fn test_answer_rejects_empty_question() {
        let client = CompletionClient::new(reqwest::Client::new(), "key");
        let err = client.answer("some transcript", "", DEFAULT_QA_MODEL).await.unwrap_err();
        assert!(matches!(err, Error::MissingInput));
    }
}
