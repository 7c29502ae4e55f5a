// src/services/mod.rs
pub mod backend;
pub mod gemini_service;
pub mod image_processor;

pub use backend::{GenerationBackend, GenerationRequest};
pub use gemini_service::GeminiService;
pub use image_processor::ImageProcessor;
