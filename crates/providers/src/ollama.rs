//! Ollama adapter (`POST /api/generate`, non-streaming).

use serde_json::{json, Value};

use dl_domain::config::LlmConfig;
use dl_domain::error::{Error, Result};

use crate::traits::Generator;
use crate::util::{build_client, from_reqwest};

pub struct OllamaGenerator {
    id: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    client: reqwest::Client,
}

impl OllamaGenerator {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        Ok(Self {
            id: format!("ollama:{}", cfg.model),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            client: build_client(cfg)?,
        })
    }

    fn build_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });
        if let Some(temp) = self.temperature {
            body["options"] = json!({ "temperature": temp });
        }
        body
    }
}

fn parse_generate_response(provider: &str, body: &Value) -> Result<String> {
    body.get("response")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| Error::Provider {
            provider: provider.into(),
            message: match body.get("error").and_then(Value::as_str) {
                Some(err) => err.to_string(),
                None => "no `response` field in generate reply".into(),
            },
        })
}

#[async_trait::async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::debug!(provider = %self.id, url = %url, prompt_chars = prompt.len(), "ollama generate request");

        let resp = self
            .client
            .post(&url)
            .json(&self.build_body(prompt))
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
        parse_generate_response(&self.id, &resp_json)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_non_streaming_with_optional_temperature() {
        let mut cfg = LlmConfig::default();
        let gen = OllamaGenerator::from_config(&cfg).unwrap();
        let body = gen.build_body("hi");
        assert_eq!(body["stream"], false);
        assert_eq!(body["model"], "llama3:8b");
        assert!(body.get("options").is_none());

        cfg.temperature = Some(0.2);
        let gen = OllamaGenerator::from_config(&cfg).unwrap();
        assert!(gen.build_body("hi")["options"]["temperature"].is_number());
    }

    #[test]
    fn response_is_trimmed() {
        let out = parse_generate_response("ollama", &json!({"response": "  Hello!\n", "done": true}));
        assert_eq!(out.unwrap(), "Hello!");
    }

    #[test]
    fn error_field_is_surfaced() {
        let err = parse_generate_response("ollama", &json!({"error": "model 'x' not found"}))
            .unwrap_err();
        assert!(err.to_string().contains("model 'x' not found"));
    }
}
