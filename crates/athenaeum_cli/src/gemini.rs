//! Gemini REST adapter for the librarian.

use athenaeum_core::{GeneratedImage, GenerativeModel, ModelError, TextRequest};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEXT_MODEL: &str = "gemini-3-flash-preview";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct GeminiModel {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ModelError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    fn generate(&self, model: &str, body: &GenerateRequest<'_>) -> Result<GenerateResponse, ModelError> {
        let url = format!("{API_BASE}/{model}:generateContent");
        debug!("event=gemini_call module=cli status=start model={model}");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .map_err(|err| ModelError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ModelError::Transport(format!(
                "HTTP {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<GenerateResponse>()
            .map_err(|err| ModelError::InvalidResponse(err.to_string()))
    }
}

impl GenerativeModel for GeminiModel {
    fn generate_text(&self, request: &TextRequest) -> Result<String, ModelError> {
        let body = GenerateRequest::text(&request.prompt, request.temperature, request.top_p);
        Ok(self.generate(TEXT_MODEL, &body)?.text())
    }

    fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, ModelError> {
        let body = GenerateRequest::text(prompt, None, None);
        Ok(self.generate(IMAGE_MODEL, &body)?.first_image())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateRequest<'a> {
    fn text(prompt: &'a str, temperature: Option<f32>, top_p: Option<f32>) -> Self {
        let generation_config = if temperature.is_some() || top_p.is_some() {
            Some(GenerationConfig { temperature, top_p })
        } else {
            None
        };
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
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
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.parts()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .concat()
    }

    fn first_image(&self) -> Option<GeneratedImage> {
        self.parts()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| GeneratedImage {
                mime_type: inline.mime_type.clone(),
                data: inline.data.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerateRequest, GenerateResponse};

    #[test]
    fn request_omits_generation_config_when_unset() {
        let plain = serde_json::to_value(GenerateRequest::text("hi", None, None)).unwrap();
        assert!(plain.get("generationConfig").is_none());
        assert_eq!(plain["contents"][0]["parts"][0]["text"], "hi");

        let tuned = serde_json::to_value(GenerateRequest::text("hi", Some(0.5), None)).unwrap();
        assert_eq!(tuned["generationConfig"]["temperature"], 0.5);
        assert!(tuned["generationConfig"].get("topP").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Seek "},{"text":"within."}]}},
                     {"content":{"parts":[{"text":"ignored"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "Seek within.");
        assert!(response.first_image().is_none());
    }

    #[test]
    fn response_image_uses_first_inline_part() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"here"},
                     {"inlineData":{"mimeType":"image/png","data":"AAAA"}}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        let image = response.first_image().expect("inline image");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "AAAA");
    }

    #[test]
    fn empty_response_yields_empty_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }
}
