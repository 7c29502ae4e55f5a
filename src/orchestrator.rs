// src/orchestrator.rs
//! Runs generation flows against the backend and commits their results.
//!
//! Every flow has the same shape: validate and snapshot its inputs under the
//! editor lock, release the lock while the backend works, then take the lock
//! again to commit. A flow whose session disappeared in the meantime, or that
//! finishes after [`Orchestrator::shutdown`], is dropped without touching state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use log::{debug, error, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::editor::Editor;
use crate::errors::{EditorError, Result};
use crate::models::{
    EditingMode, ExportQuality, ExportedImage, ImageBlob, ImageUpload, SamplingParams, SceneKind,
    StepKind, Transform,
};
use crate::prompts::catalog::{ART_STYLE_KEYS, CAMERA_ANGLE_KEYS, quick_actions_for};
use crate::prompts::composer::{UPSCALE_INSTRUCTION, angle_variation_prompt, style_variation_prompt};
use crate::prompts::dictionary::QUICK_ACTIONS;
use crate::prompts::{build_instruction, frame_instruction, plan};
use crate::services::ImageProcessor;
use crate::services::backend::{GenerationBackend, GenerationRequest};
use crate::session::ImageSession;

pub const BATCH_SIZE: usize = 4;

/// One backend call of a flow and the label its variant gets.
#[derive(Debug, Clone)]
struct Call {
    instruction: String,
    label: String,
}

#[derive(Debug, Clone)]
enum CommitMode {
    NewStep { kind: StepKind, prompt: String },
    ReplaceSelected { prompt: String },
}

/// Inputs of a flow, captured while the editor was locked.
#[derive(Debug, Clone)]
struct Job {
    session_id: Uuid,
    source: ImageBlob,
    calls: Vec<Call>,
    mask: Option<Bytes>,
    sampling: Option<SamplingParams>,
    commit: CommitMode,
    reset_selection: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    pub added: Vec<Uuid>,
    pub failures: Vec<String>,
}

pub struct Orchestrator {
    editor: Arc<Mutex<Editor>>,
    backend: Arc<dyn GenerationBackend>,
    processor: ImageProcessor,
    alive: AtomicBool,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self::with_editor(Arc::new(Mutex::new(Editor::new())), backend)
    }

    pub fn with_editor(editor: Arc<Mutex<Editor>>, backend: Arc<dyn GenerationBackend>) -> Self {
        info!("orchestrator using {} backend", backend.name());
        Self {
            editor,
            backend,
            processor: ImageProcessor::new(),
            alive: AtomicBool::new(true),
        }
    }

    pub fn editor(&self) -> &Arc<Mutex<Editor>> {
        &self.editor
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Results arriving after this are discarded.
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);
        info!("orchestrator shut down, in-flight results will be dropped");
    }

    /// Decodes each upload and appends the readable ones as new sessions.
    /// An unreadable file is reported and skipped; its siblings still load.
    pub async fn add_images(&self, uploads: Vec<ImageUpload>) -> UploadReport {
        let mut sessions = Vec::new();
        let mut failures = Vec::new();

        for upload in uploads {
            let processor = self.processor;
            let filename = upload.filename.clone();
            let data = upload.data.clone();
            let decoded =
                tokio::task::spawn_blocking(move || processor.decode_dimensions(&filename, &data))
                    .await
                    .unwrap_or_else(|e| Err(EditorError::ImageProcessing(e.to_string())));

            match decoded {
                Ok((width, height, mime_type)) => {
                    info!("loaded {} ({}x{}, {})", upload.filename, width, height, mime_type);
                    sessions.push(ImageSession::new(
                        upload.filename,
                        ImageBlob::new(upload.data, mime_type),
                        width,
                        height,
                    ));
                }
                Err(e) => failures.push((upload.filename, e)),
            }
        }

        let mut editor = self.editor.lock().await;
        let added = editor.add_sessions(sessions);
        if let Some((_, last)) = failures.last() {
            editor.report_error(last);
        }
        UploadReport {
            added,
            failures: failures.into_iter().map(|(name, _)| name).collect(),
        }
    }

    /// Composes the current selection and generates from it.
    pub async fn submit(&self) -> Result<()> {
        let job = self.start(submit_job).await?;
        self.run(job).await
    }

    /// Edits the displayed image with a given instruction and history label.
    pub async fn generate(&self, instruction: &str, history_label: &str) -> Result<()> {
        let job = self
            .start(|editor| {
                let instruction = instruction.trim();
                if instruction.is_empty() {
                    return Err(EditorError::NothingToSubmit);
                }
                single_edit_job(editor, instruction.to_string(), history_label.to_string())
            })
            .await?;
        self.run(job).await
    }

    pub async fn style_variations<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<()> {
        let job = self.start(|editor| style_job(editor, rng)).await?;
        self.run(job).await
    }

    pub async fn angle_variations<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<()> {
        let job = self.start(|editor| angle_job(editor, rng)).await?;
        self.run(job).await
    }

    /// Renders the floor plan from all four fixed viewpoints.
    pub async fn plan_views(&self) -> Result<()> {
        let job = self.start(plan_views_job).await?;
        self.run(job).await
    }

    /// Picks one of the scene's quick actions at random and runs it alone.
    pub async fn random_preset<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<()> {
        let job = self.start(|editor| random_preset_job(editor, rng)).await?;
        self.run(job).await
    }

    /// Re-renders the selected variant at higher detail in place.
    pub async fn upscale(&self) -> Result<()> {
        let job = self
            .start(|editor| {
                let (session_id, source) = editor.selected_result()?;
                Ok(Job {
                    session_id,
                    source,
                    calls: vec![Call {
                        instruction: UPSCALE_INSTRUCTION.to_string(),
                        label: StepKind::Upscale.default_label().to_string(),
                    }],
                    mask: None,
                    sampling: None,
                    commit: CommitMode::ReplaceSelected {
                        prompt: "Upscale".to_string(),
                    },
                    reset_selection: false,
                })
            })
            .await?;
        self.run(job).await
    }

    /// Rotates or flips the selected variant locally.
    pub async fn transform(&self, transform: Transform) -> Result<()> {
        let (session_id, source) = self.start(|editor| editor.selected_result()).await?;

        let processor = self.processor;
        let outcome =
            tokio::task::spawn_blocking(move || processor.apply_transform(&source, transform))
                .await
                .unwrap_or_else(|e| Err(EditorError::ImageProcessing(e.to_string())));

        let mut editor = self.editor.lock().await;
        if !self.is_alive() {
            debug!("dropping transform result after shutdown");
            editor.finish();
            return Ok(());
        }
        let committed = outcome.and_then(|image| match editor.session_mut(session_id) {
            Some(session) => session.history.commit_with_labels(
                vec![image],
                transform.label(),
                StepKind::Transform,
                vec![StepKind::Transform.default_label().to_string()],
            ),
            None => {
                debug!("session {} removed before transform finished", session_id);
                Ok(())
            }
        });

        match committed {
            Ok(()) => {
                info!("applied {:?}", transform);
                editor.finish();
                Ok(())
            }
            Err(e) => {
                error!("transform {:?} failed: {}", transform, e);
                editor.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn analyze(&self) -> Result<()> {
        let (session_id, source) = self.start(displayed_image).await?;
        let outcome = match self.prepare(source).await {
            Ok(image) => self.backend.analyze_image(&image).await,
            Err(e) => Err(e),
        };

        let mut editor = self.editor.lock().await;
        if !self.is_alive() {
            editor.finish();
            return Ok(());
        }
        match outcome {
            Ok(analysis) => {
                if editor.sessions().active_id() == Some(session_id) {
                    editor.set_analysis(analysis);
                }
                editor.finish();
                Ok(())
            }
            Err(e) => {
                editor.fail(&e);
                Err(e)
            }
        }
    }

    pub async fn suggest_angles(&self) -> Result<()> {
        let (session_id, source) = self.start(displayed_image).await?;
        let outcome = match self.prepare(source).await {
            Ok(image) => self.backend.suggest_camera_angles(&image).await,
            Err(e) => Err(e),
        };

        let mut editor = self.editor.lock().await;
        if !self.is_alive() {
            editor.finish();
            return Ok(());
        }
        match outcome {
            Ok(angles) => {
                if editor.sessions().active_id() == Some(session_id) {
                    editor.set_suggested_angles(angles);
                }
                editor.finish();
                Ok(())
            }
            Err(e) => {
                editor.fail(&e);
                Err(e)
            }
        }
    }

    /// Re-encodes the selected result as JPEG at one of the offered qualities.
    pub async fn export_selected(&self, quality: f32) -> Result<ExportedImage> {
        let quality = ExportQuality::from_fraction(quality).ok_or_else(|| {
            EditorError::InvalidValue(format!("export quality {} is not offered", quality))
        })?;
        let (_, image) = self.editor.lock().await.selected_result()?;

        let processor = self.processor;
        let image = tokio::task::spawn_blocking(move || {
            processor.encode_jpeg(&image, quality.jpeg_quality())
        })
        .await
        .unwrap_or_else(|e| Err(EditorError::ImageProcessing(e.to_string())))?;

        let file_name = format!("edited-image-{}.jpeg", chrono::Utc::now().timestamp_millis());
        info!("exported {} ({} bytes)", file_name, image.len());
        Ok(ExportedImage { file_name, image })
    }

    pub async fn undo(&self) -> Result<()> {
        self.editor.lock().await.with_active_history(|history| {
            history.undo();
            Ok(())
        })
    }

    pub async fn redo(&self) -> Result<()> {
        self.editor.lock().await.with_active_history(|history| {
            history.redo();
            Ok(())
        })
    }

    pub async fn reset_all(&self) -> Result<()> {
        self.editor.lock().await.with_active_history(|history| {
            history.reset_all();
            Ok(())
        })
    }

    pub async fn select_variant(&self, index: usize) -> Result<()> {
        self.editor
            .lock()
            .await
            .with_active_history(|history| history.select_variant(index))
    }

    /// Claims the busy gate and captures a flow's inputs. A rejected flow
    /// leaves a visible error and releases the gate again.
    async fn start<T, F>(&self, capture: F) -> Result<T>
    where
        F: FnOnce(&mut Editor) -> Result<T>,
    {
        let mut editor = self.editor.lock().await;
        editor.begin()?;
        let captured = capture(&mut *editor);
        if let Err(e) = &captured {
            editor.fail(e);
        }
        captured
    }

    async fn prepare(&self, source: ImageBlob) -> Result<ImageBlob> {
        let processor = self.processor;
        tokio::task::spawn_blocking(move || processor.prepare_for_backend(&source))
            .await
            .unwrap_or_else(|e| Err(EditorError::ImageProcessing(e.to_string())))
    }

    /// Issues the job's calls one after another, then commits all variants
    /// as one step. The first failure abandons the whole job.
    async fn run(&self, job: Job) -> Result<()> {
        let outcome = self.call_backend(&job).await;

        let mut editor = self.editor.lock().await;
        if !self.is_alive() {
            debug!("dropping result for session {} after shutdown", job.session_id);
            editor.finish();
            return Ok(());
        }

        let variants = match outcome {
            Ok(Some(variants)) => variants,
            Ok(None) => {
                editor.finish();
                return Ok(());
            }
            Err(e) => {
                error!("generation for session {} failed: {}", job.session_id, e);
                editor.fail(&e);
                return Err(e);
            }
        };

        let labels: Vec<String> = job.calls.iter().map(|call| call.label.clone()).collect();
        let committed = match editor.session_mut(job.session_id) {
            None => None,
            Some(session) => Some(match job.commit {
                CommitMode::NewStep { kind, prompt } => {
                    session.history.commit_with_labels(variants, prompt, kind, labels)
                }
                CommitMode::ReplaceSelected { prompt } => match variants.into_iter().next() {
                    Some(image) => session.history.replace_selected_variant(image, prompt),
                    None => Err(EditorError::EmptyResponse),
                },
            }),
        };

        match committed {
            None => {
                debug!("session {} removed before its result arrived", job.session_id);
                editor.finish();
                Ok(())
            }
            Some(Ok(())) => {
                if job.reset_selection {
                    editor.reset_after_commit();
                }
                editor.finish();
                Ok(())
            }
            Some(Err(e)) => {
                editor.fail(&e);
                Err(e)
            }
        }
    }

    /// `Ok(None)` when the orchestrator was shut down between calls.
    async fn call_backend(&self, job: &Job) -> Result<Option<Vec<ImageBlob>>> {
        let source = self.prepare(job.source.clone()).await?;
        let mut variants = Vec::with_capacity(job.calls.len());

        for (index, call) in job.calls.iter().enumerate() {
            if !self.is_alive() {
                return Ok(None);
            }
            let mut request = GenerationRequest::new(source.clone(), call.instruction.clone())
                .with_mask(job.mask.clone());
            if let Some(sampling) = job.sampling {
                request = request.with_sampling(sampling);
            }
            match self.backend.edit_image(request).await {
                Ok(image) => variants.push(image),
                Err(e) => {
                    warn!(
                        "call {}/{} ({}) failed, abandoning {} variant(s)",
                        index + 1,
                        job.calls.len(),
                        call.label,
                        variants.len()
                    );
                    return Err(e);
                }
            }
        }
        Ok(Some(variants))
    }
}

fn displayed_image(editor: &mut Editor) -> Result<(Uuid, ImageBlob)> {
    let session = editor.active()?;
    Ok((session.id, session.display_image().clone()))
}

fn masked_export(editor: &Editor) -> Result<Option<Bytes>> {
    if editor.selection().mode == EditingMode::Masked {
        editor.export_mask_png().map(Some)
    } else {
        Ok(None)
    }
}

fn submit_job(editor: &mut Editor) -> Result<Job> {
    if !editor.selection().has_edit_instruction(editor.mask_is_empty()) {
        return Err(EditorError::NothingToSubmit);
    }
    let composed = build_instruction(editor.selection()).ok_or(EditorError::NothingToSubmit)?;
    single_edit_job(editor, composed.instruction, composed.history_label)
}

fn single_edit_job(editor: &Editor, instruction: String, history_label: String) -> Result<Job> {
    let session = editor.active()?;
    let mask = masked_export(editor)?;
    Ok(Job {
        session_id: session.id,
        source: session.display_image().clone(),
        calls: vec![Call {
            instruction: frame_instruction(&instruction),
            label: StepKind::Edit.default_label().to_string(),
        }],
        mask,
        sampling: Some(editor.selection().sampling),
        commit: CommitMode::NewStep {
            kind: StepKind::Edit,
            prompt: history_label,
        },
        reset_selection: true,
    })
}

fn batch_job(
    editor: &Editor,
    calls: Vec<Call>,
    mask: Option<Bytes>,
    kind: StepKind,
    prompt: String,
) -> Result<Job> {
    let session = editor.active()?;
    if calls.is_empty() {
        return Err(EditorError::NothingToSubmit);
    }
    Ok(Job {
        session_id: session.id,
        source: session.display_image().clone(),
        calls,
        mask,
        sampling: Some(editor.selection().sampling),
        commit: CommitMode::NewStep { kind, prompt },
        reset_selection: true,
    })
}

fn style_job<R: Rng + ?Sized>(editor: &mut Editor, rng: &mut R) -> Result<Job> {
    let mut styles: Vec<&str> = ART_STYLE_KEYS
        .choose_multiple(rng, BATCH_SIZE)
        .copied()
        .collect();
    styles.shuffle(rng);

    let calls = styles
        .iter()
        .map(|style| {
            let instruction = style_variation_prompt(style).ok_or_else(|| {
                EditorError::InvalidValue(format!("unknown art style \"{}\"", style))
            })?;
            Ok(Call {
                instruction,
                label: style.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let prompt = format!("Style variations: {}", styles.join(", "));
    batch_job(editor, calls, None, StepKind::StyleVariation, prompt)
}

fn angle_job<R: Rng + ?Sized>(editor: &mut Editor, rng: &mut R) -> Result<Job> {
    let mut calls: Vec<Call> = CAMERA_ANGLE_KEYS
        .iter()
        .filter_map(|angle| {
            angle_variation_prompt(angle).map(|instruction| Call {
                instruction,
                label: angle.to_string(),
            })
        })
        .collect::<Vec<_>>()
        .choose_multiple(rng, BATCH_SIZE)
        .cloned()
        .collect();
    calls.shuffle(rng);

    let prompt = format!(
        "Camera angle variations: {}",
        calls
            .iter()
            .map(|call| call.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    batch_job(editor, calls, None, StepKind::AngleVariation, prompt)
}

fn plan_views_job(editor: &mut Editor) -> Result<Job> {
    let masked = editor.selection().mode == EditingMode::Masked;
    let (views, prompt) = plan::all_views(editor.selection(), masked)?;
    let mask = masked_export(editor)?;
    let calls = views
        .into_iter()
        .map(|(view, instruction)| Call {
            instruction,
            label: view,
        })
        .collect();
    batch_job(editor, calls, mask, StepKind::GeometricVariation, prompt)
}

fn random_preset_job<R: Rng + ?Sized>(editor: &mut Editor, rng: &mut R) -> Result<Job> {
    let scene = match editor.selection().scene {
        Some(scene @ (SceneKind::Exterior | SceneKind::Interior)) => scene,
        _ => {
            return Err(EditorError::InvalidValue(
                "random presets need an exterior or interior scene".to_string(),
            ));
        }
    };
    let action = quick_actions_for(scene)
        .choose(rng)
        .copied()
        .ok_or(EditorError::NothingToSubmit)?;
    let fragment = QUICK_ACTIONS.get(action.id).ok_or_else(|| {
        EditorError::InvalidValue(format!("unknown quick action \"{}\"", action.id))
    })?;

    editor.update_selection(|selection| {
        selection.reset_structured();
        selection.quick_action = Some(action.id.to_string());
        Ok(())
    })?;
    single_edit_job(
        editor,
        fragment.to_string(),
        format!("Random preset: {}", action.label),
    )
}
