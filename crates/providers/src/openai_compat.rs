//! OpenAI-compatible adapter.
//!
//! Works with OpenAI, vLLM, LM Studio, llama.cpp server, and any other
//! endpoint that follows the chat completions contract. The assembled
//! prompt is sent as a single user message.

use serde_json::{json, Value};

use dl_domain::config::LlmConfig;
use dl_domain::error::{Error, Result};

use crate::traits::Generator;
use crate::util::{build_client, from_reqwest, resolve_api_key};

pub struct OpenAiCompatGenerator {
    id: String,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    client: reqwest::Client,
}

impl OpenAiCompatGenerator {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        Ok(Self {
            id: format!("openai_compat:{}", cfg.model),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key: resolve_api_key(cfg)?,
            temperature: cfg.temperature,
            client: build_client(cfg)?,
        })
    }

    fn authed_post(&self, url: &str) -> reqwest::RequestBuilder {
        let rb = self
            .client
            .post(url)
            .header("Content-Type", "application/json");
        match self.api_key {
            Some(ref key) => rb.header("Authorization", format!("Bearer {key}")),
            None => rb,
        }
    }

    fn build_chat_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": false,
        });
        if let Some(temp) = self.temperature {
            body["temperature"] = json!(temp);
        }
        body
    }
}

fn parse_chat_response(provider: &str, body: &Value) -> Result<String> {
    let choice = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Provider {
            provider: provider.into(),
            message: "no choices in response".into(),
        })?;

    let content = choice
        .pointer("/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Provider {
            provider: provider.into(),
            message: "no message content in choice".into(),
        })?;
    Ok(content.trim().to_string())
}

#[async_trait::async_trait]
impl Generator for OpenAiCompatGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(provider = %self.id, url = %url, "openai_compat chat request");

        let resp = self
            .authed_post(&url)
            .json(&self.build_chat_body(prompt))
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;
        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        parse_chat_response(&self.id, &resp_json)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_goes_in_one_user_message() {
        let gen = OpenAiCompatGenerator::from_config(&LlmConfig::default()).unwrap();
        let body = gen.build_chat_body("SYSTEM block\n\nUser: hi");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "SYSTEM block\n\nUser: hi");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn first_choice_content_is_returned() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": " Sure. "}, "finish_reason": "stop"}],
            "model": "qwen2.5"
        });
        assert_eq!(parse_chat_response("oc", &body).unwrap(), "Sure.");
    }

    #[test]
    fn empty_choices_is_provider_error() {
        let err = parse_chat_response("oc", &json!({"choices": []})).unwrap_err();
        assert!(matches!(err, Error::Provider { .. }));
    }
}
