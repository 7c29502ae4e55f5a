// src/models.rs
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::{EditorError, Result};

/// An encoded image held as an opaque blob plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub data: Bytes,
    pub mime_type: String,
}

impl ImageBlob {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn from_base64(encoded: &str, mime_type: impl Into<String>) -> Result<Self> {
        let data = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| EditorError::MalformedResponse(format!("invalid base64 image: {}", e)))?;
        Ok(Self::new(data, mime_type))
    }
}

/// Broad scene the user is editing; selects which option groups apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Exterior,
    Interior,
    Plan,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditingMode {
    #[default]
    Default,
    /// Only free text applies, restricted to the painted region.
    Masked,
}

/// What kind of action produced a history step. Drives labelling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    StyleVariation,
    AngleVariation,
    Edit,
    Upscale,
    GeometricVariation,
    Transform,
}

impl StepKind {
    pub fn default_label(&self) -> &'static str {
        match self {
            StepKind::Edit => "Edited",
            StepKind::Transform => "Transformed",
            StepKind::Upscale => "Upscaled",
            StepKind::StyleVariation => "Style",
            StepKind::AngleVariation => "Angle",
            StepKind::GeometricVariation => "View",
        }
    }
}

pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_TOP_K: u32 = 32;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const MAX_RANDOM_SEED: u64 = 1_000_000_000;

/// Sampling parameters forwarded to the generation backend. A seed of 0 means "random".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub seed: u64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            seed: 0,
        }
    }
}

impl SamplingParams {
    pub fn clamped(self) -> Self {
        Self {
            temperature: self.temperature.clamp(0.0, 1.0),
            top_k: self.top_k.clamp(1, 40),
            top_p: self.top_p.clamp(0.0, 1.0),
            seed: self.seed,
        }
    }

    pub fn request_seed(&self) -> Option<u64> {
        (self.seed > 0).then_some(self.seed)
    }
}

/// Structured result of the analysis collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub architectural_style: String,
    #[serde(default)]
    pub key_materials: Vec<String>,
    #[serde(default)]
    pub lighting_conditions: String,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
}

impl Transform {
    pub fn label(&self) -> &'static str {
        match self {
            Transform::RotateLeft => "Rotate left 90°",
            Transform::RotateRight => "Rotate right 90°",
            Transform::FlipHorizontal => "Flip horizontal",
            Transform::FlipVertical => "Flip vertical",
        }
    }
}

/// The discrete JPEG qualities offered by the save dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    High,
    #[default]
    Good,
    Medium,
    Low,
}

impl ExportQuality {
    pub fn from_fraction(value: f32) -> Option<Self> {
        [Self::High, Self::Good, Self::Medium, Self::Low]
            .into_iter()
            .find(|q| (q.fraction() - value).abs() < 1e-3)
    }

    pub fn fraction(&self) -> f32 {
        match self {
            ExportQuality::High => 1.0,
            ExportQuality::Good => 0.92,
            ExportQuality::Medium => 0.75,
            ExportQuality::Low => 0.50,
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        (self.fraction() * 100.0).round() as u8
    }
}

#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub image: ImageBlob,
}

/// A file handed over by the upload surface, not yet decoded.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_clamps_into_backend_ranges() {
        let params = SamplingParams {
            temperature: 1.7,
            top_k: 0,
            top_p: -0.2,
            seed: 7,
        }
        .clamped();
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.top_k, 1);
        assert_eq!(params.top_p, 0.0);
        assert_eq!(params.request_seed(), Some(7));
        assert_eq!(SamplingParams::default().request_seed(), None);
    }

    #[test]
    fn export_quality_only_accepts_listed_levels() {
        assert_eq!(ExportQuality::from_fraction(0.92), Some(ExportQuality::Good));
        assert_eq!(ExportQuality::from_fraction(0.5), Some(ExportQuality::Low));
        assert_eq!(ExportQuality::from_fraction(0.8), None);
        assert_eq!(ExportQuality::High.jpeg_quality(), 100);
    }

    #[test]
    fn data_url_round_trips_through_base64() {
        let blob = ImageBlob::new(vec![1u8, 2, 3], "image/png");
        assert!(blob.to_data_url().starts_with("data:image/png;base64,"));
        let back = ImageBlob::from_base64(&blob.to_base64(), "image/png").unwrap();
        assert_eq!(back, blob);
    }
}
