// src/handlers.rs
use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{Error, HttpResponse, web};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::errors::EditorError;
use crate::mask::Stroke;
use crate::models::{ImageUpload, Transform};
use crate::prompts::build_instruction;
use crate::prompts::catalog::catalog;
use crate::selection::Selection;
use crate::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/options", web::get().to(options))
            .route("/state", web::get().to(state))
            .route("/images", web::post().to(upload_images))
            .route("/images/{index}", web::delete().to(remove_image))
            .route("/images/{index}/activate", web::post().to(activate_image))
            .route("/display", web::get().to(display_image))
            .route("/selection", web::put().to(put_selection))
            .route("/compose", web::post().to(compose))
            .route("/generate", web::post().to(generate))
            .route("/variations/{kind}", web::post().to(variations))
            .route("/random-preset", web::post().to(random_preset))
            .route("/upscale", web::post().to(upscale))
            .route("/transform/{kind}", web::post().to(transform))
            .route("/undo", web::post().to(undo))
            .route("/redo", web::post().to(redo))
            .route("/reset", web::post().to(reset))
            .route("/variants/{index}/select", web::post().to(select_variant))
            .route("/mask", web::put().to(resize_mask))
            .route("/mask", web::delete().to(clear_mask))
            .route("/mask/strokes", web::put().to(paint_mask))
            .route("/analyze", web::post().to(analyze))
            .route("/suggest-angles", web::post().to(suggest_angles))
            .route("/export", web::get().to(export)),
    )
    .route("/health", web::get().to(health_check));
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "atelier",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn state_response(data: &web::Data<AppState>) -> HttpResponse {
    let editor = data.orchestrator.editor().lock().await;
    HttpResponse::Ok().json(editor.snapshot())
}

pub async fn options() -> HttpResponse {
    HttpResponse::Ok().json(catalog())
}

pub async fn state(data: web::Data<AppState>) -> HttpResponse {
    state_response(&data).await
}

pub async fn upload_images(
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let mut uploads = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        let filename = field
            .content_disposition()
            .get_filename()
            .unwrap_or("image")
            .to_string();

        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut image_data = BytesMut::new();
        while let Some(chunk) = field.try_next().await? {
            image_data.extend_from_slice(&chunk);
        }

        uploads.push(ImageUpload {
            filename,
            content_type,
            data: image_data.freeze(),
        });
    }

    if uploads.is_empty() {
        return Err(EditorError::InvalidValue("no files in upload".to_string()).into());
    }

    let report = data.orchestrator.add_images(uploads).await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "added": report.added,
        "failures": report.failures,
        "count": report.added.len()
    })))
}

pub async fn remove_image(
    path: web::Path<usize>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    data.orchestrator
        .editor()
        .lock()
        .await
        .remove_session(path.into_inner())?;
    Ok(state_response(&data).await)
}

pub async fn activate_image(
    path: web::Path<usize>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    data.orchestrator
        .editor()
        .lock()
        .await
        .set_active(path.into_inner())?;
    Ok(state_response(&data).await)
}

pub async fn display_image(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let editor = data.orchestrator.editor().lock().await;
    let image = editor.active()?.display_image().clone();
    Ok(HttpResponse::Ok()
        .content_type(image.mime_type.as_str())
        .body(image.data))
}

pub async fn put_selection(
    body: web::Json<Selection>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    data.orchestrator
        .editor()
        .lock()
        .await
        .set_selection(body.into_inner());
    Ok(state_response(&data).await)
}

pub async fn compose(data: web::Data<AppState>) -> HttpResponse {
    let editor = data.orchestrator.editor().lock().await;
    let composed = build_instruction(editor.selection());
    HttpResponse::Ok().json(serde_json::json!({
        "instruction": composed.as_ref().map(|c| c.instruction.as_str()),
        "history_label": composed.as_ref().map(|c| c.history_label.as_str()),
        "can_submit": editor.can_submit()
    }))
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub instruction: String,
    pub history_label: Option<String>,
}

/// Without a body the current selection is composed and submitted.
pub async fn generate(
    body: Option<web::Json<GenerateBody>>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    match body {
        Some(body) => {
            let label = body
                .history_label
                .clone()
                .unwrap_or_else(|| body.instruction.clone());
            data.orchestrator.generate(&body.instruction, &label).await?
        }
        None => data.orchestrator.submit().await?,
    }
    Ok(state_response(&data).await)
}

pub async fn variations(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let mut rng = StdRng::from_entropy();
    match path.as_str() {
        "styles" => data.orchestrator.style_variations(&mut rng).await?,
        "angles" => data.orchestrator.angle_variations(&mut rng).await?,
        "plan-views" => data.orchestrator.plan_views().await?,
        other => {
            return Err(
                EditorError::InvalidValue(format!("unknown variation kind \"{}\"", other)).into(),
            );
        }
    }
    Ok(state_response(&data).await)
}

pub async fn random_preset(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let mut rng = StdRng::from_entropy();
    data.orchestrator.random_preset(&mut rng).await?;
    Ok(state_response(&data).await)
}

pub async fn upscale(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    data.orchestrator.upscale().await?;
    Ok(state_response(&data).await)
}

pub async fn transform(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let transform = match path.as_str() {
        "rotate-left" => Transform::RotateLeft,
        "rotate-right" => Transform::RotateRight,
        "flip-horizontal" => Transform::FlipHorizontal,
        "flip-vertical" => Transform::FlipVertical,
        other => {
            return Err(
                EditorError::InvalidValue(format!("unknown transform \"{}\"", other)).into(),
            );
        }
    };
    data.orchestrator.transform(transform).await?;
    Ok(state_response(&data).await)
}

pub async fn undo(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    data.orchestrator.undo().await?;
    Ok(state_response(&data).await)
}

pub async fn redo(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    data.orchestrator.redo().await?;
    Ok(state_response(&data).await)
}

pub async fn reset(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    data.orchestrator.reset_all().await?;
    Ok(state_response(&data).await)
}

pub async fn select_variant(
    path: web::Path<usize>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    data.orchestrator.select_variant(path.into_inner()).await?;
    Ok(state_response(&data).await)
}

#[derive(Debug, Deserialize)]
pub struct MaskSize {
    pub width: u32,
    pub height: u32,
}

pub async fn resize_mask(
    body: web::Json<MaskSize>,
    data: web::Data<AppState>,
) -> HttpResponse {
    data.orchestrator
        .editor()
        .lock()
        .await
        .resize_mask(body.width, body.height);
    state_response(&data).await
}

pub async fn paint_mask(
    body: web::Json<Vec<Stroke>>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    data.orchestrator.editor().lock().await.paint_mask(&body)?;
    Ok(state_response(&data).await)
}

pub async fn clear_mask(data: web::Data<AppState>) -> HttpResponse {
    data.orchestrator.editor().lock().await.clear_mask();
    state_response(&data).await
}

pub async fn analyze(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    data.orchestrator.analyze().await?;
    Ok(state_response(&data).await)
}

pub async fn suggest_angles(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    data.orchestrator.suggest_angles().await?;
    Ok(state_response(&data).await)
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub quality: Option<f32>,
}

pub async fn export(
    query: web::Query<ExportQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let quality = query.quality.unwrap_or(0.92);
    let exported = data.orchestrator.export_selected(quality).await?;

    Ok(HttpResponse::Ok()
        .content_type(exported.image.mime_type.as_str())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(exported.file_name)],
        })
        .body(exported.image.data))
}
