// src/services/backend.rs
use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::Result;
use crate::models::{AnalysisResult, ImageBlob, SamplingParams};

/// One image edit request. The source is already downscaled for submission.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub source: ImageBlob,
    pub instruction: String,
    /// Opaque PNG, white = edit, black = preserve.
    pub mask: Option<Bytes>,
    pub sampling: Option<SamplingParams>,
}

impl GenerationRequest {
    pub fn new(source: ImageBlob, instruction: impl Into<String>) -> Self {
        Self {
            source,
            instruction: instruction.into(),
            mask: None,
            sampling: None,
        }
    }

    pub fn with_mask(mut self, mask: Option<Bytes>) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = Some(sampling.clamped());
        self
    }
}

/// The generative collaborator: image editing, analysis and angle suggestions.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn edit_image(&self, request: GenerationRequest) -> Result<ImageBlob>;

    async fn analyze_image(&self, image: &ImageBlob) -> Result<AnalysisResult>;

    async fn suggest_camera_angles(&self, image: &ImageBlob) -> Result<Vec<String>>;

    fn name(&self) -> &str;
}
