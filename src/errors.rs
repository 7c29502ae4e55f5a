// src/errors.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Upload read failure: {0}")]
    UploadRead(String),

    #[error("Mask export failure")]
    MaskExport,

    #[error("Blocked by safety filter: {0}")]
    SafetyBlock(String),

    #[error("Backend returned an empty response")]
    EmptyResponse,

    #[error("Backend produced no image")]
    NoImageProduced,

    #[error("Generation stopped: {0}")]
    GenerationStopped(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Backend quota exceeded")]
    QuotaExceeded,

    #[error("Backend connection error: {0}")]
    Connection(String),

    #[error("Backend error: {0}")]
    Unknown(String),

    #[error("No active image")]
    NoActiveImage,

    #[error("Nothing to submit")]
    NothingToSubmit,

    #[error("No result selected")]
    NoSelectedResult,

    #[error("Another generation is in progress")]
    Busy,

    #[error("Invalid index: {0}")]
    InvalidIndex(usize),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EditorError {
    /// The single message surfaced to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            EditorError::UploadRead(name) => {
                format!("Could not read \"{}\". The file is not a supported image.", name)
            }
            EditorError::MaskExport => {
                "Could not create a mask from your drawing. Please try again.".to_string()
            }
            EditorError::SafetyBlock(reason) => format!(
                "Your request was blocked for safety reasons: {}. Please adjust the instruction or the image.",
                reason
            ),
            EditorError::EmptyResponse => {
                "The AI did not return a response. Please try again with a different instruction."
                    .to_string()
            }
            EditorError::NoImageProduced => {
                "The AI could not produce an image from this instruction. Try a clearer editing instruction (e.g. \"change the background to a beach\")."
                    .to_string()
            }
            EditorError::GenerationStopped(reason) => format!(
                "Generation was stopped because of: {}. Please adjust your instruction.",
                reason
            ),
            EditorError::MalformedResponse(_) => {
                "The AI returned an incomplete result. Please try again.".to_string()
            }
            EditorError::QuotaExceeded => {
                "You have exceeded your API quota. Please check your plan or try again later."
                    .to_string()
            }
            EditorError::Connection(_) => {
                "A connection error occurred with the AI. Please check your internet connection and try again."
                    .to_string()
            }
            EditorError::Unknown(_) => {
                "Image generation failed. The AI may not be able to fulfil this request. Please try another instruction or image."
                    .to_string()
            }
            EditorError::NoActiveImage => "Please upload and select an image first.".to_string(),
            EditorError::NothingToSubmit => {
                "Please enter an edit instruction or choose an option.".to_string()
            }
            EditorError::NoSelectedResult => "There is no selected result to work on.".to_string(),
            EditorError::Busy => "Please wait for the current generation to finish.".to_string(),
            EditorError::InvalidIndex(index) => format!("There is no item at position {}.", index),
            EditorError::InvalidValue(detail) => format!("Invalid value: {}.", detail),
            EditorError::ImageProcessing(_) => {
                "The image could not be processed. Please try another image.".to_string()
            }
            EditorError::Config(detail) => format!("The editor is misconfigured: {}.", detail),
        }
    }

    /// Backend failures are the kinds that may come back from a collaborator call.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            EditorError::SafetyBlock(_)
                | EditorError::EmptyResponse
                | EditorError::NoImageProduced
                | EditorError::GenerationStopped(_)
                | EditorError::MalformedResponse(_)
                | EditorError::QuotaExceeded
                | EditorError::Connection(_)
                | EditorError::Unknown(_)
        )
    }

    fn category(&self) -> &'static str {
        match self {
            EditorError::UploadRead(_) => "Upload error",
            EditorError::MaskExport => "Mask error",
            EditorError::QuotaExceeded => "Quota exceeded",
            EditorError::Connection(_) => "AI service unavailable",
            EditorError::NoActiveImage
            | EditorError::NothingToSubmit
            | EditorError::NoSelectedResult
            | EditorError::InvalidIndex(_)
            | EditorError::InvalidValue(_) => "Validation error",
            EditorError::Busy => "Busy",
            EditorError::ImageProcessing(_) => "Image processing error",
            EditorError::Config(_) => "Configuration error",
            _ => "AI service error",
        }
    }
}

impl ResponseError for EditorError {
    fn status_code(&self) -> StatusCode {
        match self {
            EditorError::UploadRead(_)
            | EditorError::MaskExport
            | EditorError::NoActiveImage
            | EditorError::NothingToSubmit
            | EditorError::NoSelectedResult
            | EditorError::InvalidIndex(_)
            | EditorError::InvalidValue(_)
            | EditorError::ImageProcessing(_) => StatusCode::BAD_REQUEST,
            EditorError::Busy => StatusCode::CONFLICT,
            EditorError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            EditorError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EditorError::SafetyBlock(_)
            | EditorError::EmptyResponse
            | EditorError::NoImageProduced
            | EditorError::GenerationStopped(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EditorError::MalformedResponse(_)
            | EditorError::Connection(_)
            | EditorError::Unknown(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.category(),
            "message": self.user_message()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kinds_are_flagged() {
        assert!(EditorError::QuotaExceeded.is_backend_failure());
        assert!(EditorError::SafetyBlock("SAFETY".into()).is_backend_failure());
        assert!(!EditorError::MaskExport.is_backend_failure());
        assert!(!EditorError::Busy.is_backend_failure());
    }

    #[test]
    fn safety_message_carries_reason() {
        let message = EditorError::SafetyBlock("PROHIBITED_CONTENT".into()).user_message();
        assert!(message.contains("PROHIBITED_CONTENT"));
    }

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(EditorError::Busy.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            EditorError::QuotaExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            EditorError::NothingToSubmit.status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
