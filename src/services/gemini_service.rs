// src/services/gemini_service.rs
use std::time::Instant;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use log::{info, warn};
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::Config;
use crate::errors::{EditorError, Result};
use crate::models::{AnalysisResult, ImageBlob};
use crate::services::backend::{GenerationBackend, GenerationRequest};

const ANALYSIS_PROMPT: &str = "Analyze this photorealistic exterior architectural image. Provide the following information in a structured JSON format: 1. architecturalStyle: Identify the primary architectural style (e.g., Modern, Classic, Minimalist). 2. keyMaterials: List the main visible materials (e.g., Concrete, Wood, Glass). 3. lightingConditions: Describe the lighting (e.g., Bright Daylight, Overcast, Golden Hour). 4. improvementSuggestions: Provide three distinct, creative suggestions to enhance the image. Each suggestion should be a concise, actionable prompt for an image editor. For example: 'Add a modern swimming pool in the foreground' or 'Change the season to autumn with golden leaves on the trees'.";

const ANGLE_PROMPT: &str = "Analyze the provided architectural image. Suggest 3 to 5 creative and suitable camera angles for re-rendering the scene. The suggestions should be short, descriptive phrases. Return the result as a JSON array of strings. For example: [\"dramatic low-angle shot\", \"bird's eye view\", \"wide-angle from the left corner\"].";

pub struct GeminiService {
    api_key: String,
    api_base: String,
    image_model: String,
    text_model: String,
    client: Client,
}

impl GeminiService {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| EditorError::Config("GEMINI_API_KEY must be set".to_string()))?;
        Ok(Self {
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            image_model: config.image_model.clone(),
            text_model: config.text_model.clone(),
            client: Client::new(),
        })
    }

    async fn generate_content(&self, model: &str, body: Value) -> Result<Value> {
        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EditorError::Connection(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_http_failure(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| EditorError::MalformedResponse(format!("Failed to parse Gemini response: {}", e)))
    }

    fn json_request(image: &ImageBlob, prompt: &str, schema: Value) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "inline_data": { "mime_type": image.mime_type, "data": image.to_base64() } },
                    { "text": prompt }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        })
    }
}

/// Builds the `generateContent` body for an image edit.
pub fn edit_request_body(request: &GenerationRequest) -> Value {
    let mut parts = vec![
        json!({ "inline_data": { "mime_type": request.source.mime_type, "data": request.source.to_base64() } }),
        json!({ "text": request.instruction }),
    ];
    if let Some(mask) = &request.mask {
        parts.push(json!({
            "inline_data": { "mime_type": "image/png", "data": general_purpose::STANDARD.encode(mask) }
        }));
    }

    let mut config = json!({ "responseModalities": ["IMAGE"] });
    if let Some(sampling) = &request.sampling {
        config["temperature"] = json!(sampling.temperature);
        config["topK"] = json!(sampling.top_k);
        config["topP"] = json!(sampling.top_p);
        if let Some(seed) = sampling.request_seed() {
            config["seed"] = json!(seed);
        }
    }

    json!({
        "contents": [{ "parts": parts }],
        "generationConfig": config
    })
}

pub fn classify_http_failure(status: u16, body: &str) -> EditorError {
    if status == 429 || body.contains("RESOURCE_EXHAUSTED") {
        EditorError::QuotaExceeded
    } else if status >= 500 {
        EditorError::Connection(format!("HTTP {}", status))
    } else {
        EditorError::Unknown(format!("HTTP {}: {}", status, body))
    }
}

/// Extracts the generated image, mapping the failure shapes onto error kinds.
pub fn parse_edit_response(response: &Value) -> Result<ImageBlob> {
    let Some(candidate) = response["candidates"].as_array().and_then(|c| c.first()) else {
        return match response["promptFeedback"]["blockReason"].as_str() {
            Some(reason) => Err(EditorError::SafetyBlock(reason.to_string())),
            None => Err(EditorError::EmptyResponse),
        };
    };

    let parts = candidate["content"]["parts"]
        .as_array()
        .filter(|parts| !parts.is_empty());
    let Some(parts) = parts else {
        return match candidate["finishReason"].as_str() {
            Some("NO_IMAGE") => Err(EditorError::NoImageProduced),
            Some(reason) if reason != "STOP" => Err(EditorError::GenerationStopped(reason.to_string())),
            _ => Err(EditorError::MalformedResponse(
                "candidate has no content".to_string(),
            )),
        };
    };

    let inline = parts.iter().find_map(|part| {
        let data = part.get("inlineData").or_else(|| part.get("inline_data"))?;
        let encoded = data["data"].as_str()?;
        let mime = data["mimeType"]
            .as_str()
            .or_else(|| data["mime_type"].as_str())
            .unwrap_or("image/png");
        Some((encoded, mime))
    });

    match inline {
        Some((encoded, mime)) => ImageBlob::from_base64(encoded, mime),
        None => Err(EditorError::NoImageProduced),
    }
}

fn response_text(response: &Value) -> Result<String> {
    let text: String = response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|part| part["text"].as_str()).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return match response["promptFeedback"]["blockReason"].as_str() {
            Some(reason) => Err(EditorError::SafetyBlock(reason.to_string())),
            None => Err(EditorError::EmptyResponse),
        };
    }
    Ok(text)
}

/// Removes a surrounding ```json fence if the model added one.
pub fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```json") else {
        return trimmed;
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(strip_json_fence(text))
        .map_err(|e| EditorError::MalformedResponse(format!("analysis is not JSON: {}", e)))?;

    let style_present = value["architecturalStyle"]
        .as_str()
        .is_some_and(|style| !style.is_empty());
    if !style_present || !value["improvementSuggestions"].is_array() {
        return Err(EditorError::MalformedResponse(
            "analysis is missing architecturalStyle or improvementSuggestions".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| EditorError::MalformedResponse(format!("analysis has wrong shape: {}", e)))
}

pub fn parse_angle_suggestions(text: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(strip_json_fence(text))
        .map_err(|e| EditorError::MalformedResponse(format!("suggestions are not JSON: {}", e)))?;
    let items = value
        .as_array()
        .ok_or_else(|| EditorError::MalformedResponse("suggestions are not an array".to_string()))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| EditorError::MalformedResponse("suggestion is not a string".to_string()))
        })
        .collect()
}

#[async_trait]
impl GenerationBackend for GeminiService {
    async fn edit_image(&self, request: GenerationRequest) -> Result<ImageBlob> {
        let start = Instant::now();
        let source_bytes = request.source.len();
        let outcome = self
            .generate_content(&self.image_model, edit_request_body(&request))
            .await
            .and_then(|response| parse_edit_response(&response));

        match &outcome {
            Ok(image) => info!(
                "edit_image: {} byte source -> {} byte result in {} ms",
                source_bytes,
                image.len(),
                start.elapsed().as_millis()
            ),
            Err(e) => warn!("edit_image: {} byte source failed: {}", source_bytes, e),
        }
        outcome
    }

    async fn analyze_image(&self, image: &ImageBlob) -> Result<AnalysisResult> {
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "architecturalStyle": { "type": "STRING" },
                "keyMaterials": { "type": "ARRAY", "items": { "type": "STRING" } },
                "lightingConditions": { "type": "STRING" },
                "improvementSuggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
            },
            "required": ["architecturalStyle", "keyMaterials", "lightingConditions", "improvementSuggestions"]
        });
        let response = self
            .generate_content(&self.text_model, Self::json_request(image, ANALYSIS_PROMPT, schema))
            .await?;
        let analysis = parse_analysis(&response_text(&response)?)?;
        info!("analyze_image: {} byte image, style {}", image.len(), analysis.architectural_style);
        Ok(analysis)
    }

    async fn suggest_camera_angles(&self, image: &ImageBlob) -> Result<Vec<String>> {
        let schema = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
        let response = self
            .generate_content(&self.text_model, Self::json_request(image, ANGLE_PROMPT, schema))
            .await?;
        let angles = parse_angle_suggestions(&response_text(&response)?)?;
        info!("suggest_camera_angles: {} byte image, {} suggestions", image.len(), angles.len());
        Ok(angles)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
