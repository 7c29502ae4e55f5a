// src/editor.rs
//! In-memory state of one editing surface: the image sessions, the option
//! selection, the mask and the transient view state around a generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{EditorError, Result};
use crate::mask::{MaskCanvas, MaskCapture, Stroke};
use crate::models::{AnalysisResult, EditingMode, ImageBlob};
use crate::prompts::build_instruction;
use crate::selection::Selection;
use crate::session::{ImageSession, SessionManager, SessionSummary};

pub struct Editor {
    sessions: SessionManager,
    selection: Selection,
    mask: MaskCanvas,
    mask_empty: Arc<AtomicBool>,
    is_loading: bool,
    error: Option<String>,
    analysis: Option<AnalysisResult>,
    suggested_angles: Vec<String>,
}

/// Everything a front end needs to render, without image bytes.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot {
    pub sessions: Vec<SessionSummary>,
    pub active_index: Option<usize>,
    pub selection: Selection,
    pub mask_empty: bool,
    pub mask_size: (u32, u32),
    pub is_loading: bool,
    pub error: Option<String>,
    pub analysis: Option<AnalysisResult>,
    pub suggested_angles: Vec<String>,
    pub can_submit: bool,
    pub preview: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        let mask_empty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&mask_empty);
        Self {
            sessions: SessionManager::new(),
            selection: Selection::default(),
            mask: MaskCanvas::with_observer(Box::new(move |empty| {
                flag.store(empty, Ordering::SeqCst);
            })),
            mask_empty,
            is_loading: false,
            error: None,
            analysis: None,
            suggested_angles: Vec::new(),
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn active(&self) -> Result<&ImageSession> {
        self.sessions.active().ok_or(EditorError::NoActiveImage)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn suggested_angles(&self) -> &[String] {
        &self.suggested_angles
    }

    pub fn mask_is_empty(&self) -> bool {
        self.mask_empty.load(Ordering::SeqCst)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading
            && self.sessions.active().is_some()
            && self.selection.has_edit_instruction(self.mask_is_empty())
    }

    /// Replaces the whole selection. Leaving masked mode wipes the mask.
    pub fn set_selection(&mut self, selection: Selection) {
        let leaving_masked =
            self.selection.mode == EditingMode::Masked && selection.mode != EditingMode::Masked;
        self.selection = selection;
        if leaving_masked {
            self.mask.clear();
        }
    }

    pub fn update_selection<F>(&mut self, update: F) -> Result<()>
    where
        F: FnOnce(&mut Selection) -> Result<()>,
    {
        let mut next = self.selection.clone();
        update(&mut next)?;
        self.set_selection(next);
        Ok(())
    }

    pub fn add_sessions(&mut self, sessions: Vec<ImageSession>) -> Vec<Uuid> {
        let before = self.sessions.active_id();
        let ids = self.sessions.add(sessions);
        self.after_session_change(before);
        ids
    }

    pub fn remove_session(&mut self, index: usize) -> Result<ImageSession> {
        let before = self.sessions.active_id();
        let removed = self.sessions.remove(index)?;
        info!("removed image {} ({})", index, removed.file_name);
        self.after_session_change(before);
        Ok(removed)
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        let before = self.sessions.active_id();
        self.sessions.set_active(index)?;
        self.after_session_change(before);
        Ok(())
    }

    fn after_session_change(&mut self, before: Option<Uuid>) {
        if self.sessions.active_id() == before {
            return;
        }
        self.selection = Selection::default();
        self.analysis = None;
        self.suggested_angles.clear();
        let (width, height) = self
            .sessions
            .active()
            .map_or((0, 0), |session| (session.width, session.height));
        self.mask.resize(width, height);
    }

    pub fn resize_mask(&mut self, width: u32, height: u32) {
        self.mask.resize(width, height);
    }

    pub fn paint_mask(&mut self, strokes: &[Stroke]) -> Result<()> {
        if self.selection.mode != EditingMode::Masked {
            return Err(EditorError::InvalidValue(
                "switch to masked mode before painting".to_string(),
            ));
        }
        self.active()?;
        strokes.iter().for_each(|stroke| self.mask.stroke(stroke));
        Ok(())
    }

    pub fn clear_mask(&mut self) {
        self.mask.clear();
    }

    pub fn mask_size(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    /// The mask PNG for a masked edit. Errors when nothing can be exported.
    pub fn export_mask_png(&self) -> Result<Bytes> {
        match self.mask.export_mask() {
            Some(mask) => mask.to_png(),
            None => Err(EditorError::MaskExport),
        }
    }

    /// The selected variant of the active session, required by upscale,
    /// transforms and export.
    pub fn selected_result(&self) -> Result<(Uuid, ImageBlob)> {
        let session = self.active()?;
        let image = session
            .history
            .selected_image()
            .ok_or(EditorError::NoSelectedResult)?;
        Ok((session.id, image.clone()))
    }

    /// Marks a generation as started. Fails with `Busy` if one is running.
    pub fn begin(&mut self) -> Result<()> {
        if self.is_loading {
            return Err(EditorError::Busy);
        }
        self.is_loading = true;
        self.error = None;
        Ok(())
    }

    /// Ends a generation successfully.
    pub fn finish(&mut self) {
        self.is_loading = false;
    }

    /// Ends a generation, or rejects a request, with a visible error.
    /// `Busy` leaves the running generation's state alone.
    pub fn fail(&mut self, error: &EditorError) {
        if *error == EditorError::Busy {
            return;
        }
        self.is_loading = false;
        if error.is_backend_failure() {
            warn!("generation failed: {}", error);
        } else {
            warn!("request rejected: {}", error);
        }
        self.error = Some(error.user_message());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn report_error(&mut self, error: &EditorError) {
        warn!("{}", error);
        self.error = Some(error.user_message());
    }

    pub fn session_mut(&mut self, id: Uuid) -> Option<&mut ImageSession> {
        self.sessions.find_mut(id)
    }

    /// Runs a history action on the active session.
    pub fn with_active_history<T, F>(&mut self, action: F) -> Result<T>
    where
        F: FnOnce(&mut crate::history::EditHistory) -> Result<T>,
    {
        if self.is_loading {
            return Err(EditorError::Busy);
        }
        let session = self.sessions.active_mut().ok_or(EditorError::NoActiveImage)?;
        action(&mut session.history)
    }

    /// Clears the option picks and the mask after a committed generation.
    pub fn reset_after_commit(&mut self) {
        self.selection.reset_transient();
        self.mask.clear();
    }

    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    pub fn set_suggested_angles(&mut self, angles: Vec<String>) {
        self.suggested_angles = angles;
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            sessions: self.sessions.iter().map(ImageSession::summary).collect(),
            active_index: self.sessions.active_index(),
            selection: self.selection.clone(),
            mask_empty: self.mask_is_empty(),
            mask_size: self.mask.dimensions(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            analysis: self.analysis.clone(),
            suggested_angles: self.suggested_angles.clone(),
            can_submit: self.can_submit(),
            preview: build_instruction(&self.selection).map(|composed| composed.history_label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{BrushColor, Point};
    use crate::models::{SceneKind, StepKind};

    fn session(name: &str) -> ImageSession {
        ImageSession::new(name, ImageBlob::new(name.as_bytes().to_vec(), "image/png"), 16, 8)
    }

    fn dab() -> Stroke {
        Stroke {
            points: vec![Point { x: 4.0, y: 4.0 }],
            brush_size: 4.0,
            color: BrushColor::Red,
        }
    }

    #[test]
    fn first_upload_sizes_the_mask() {
        let mut editor = Editor::new();
        editor.add_sessions(vec![session("a"), session("b")]);
        assert_eq!(editor.sessions().active_index(), Some(0));
        assert_eq!(editor.mask_size(), (16, 8));
        assert!(editor.mask_is_empty());
    }

    #[test]
    fn switching_sessions_resets_selection_and_view_state() {
        let mut editor = Editor::new();
        editor.add_sessions(vec![session("a"), session("b")]);
        editor
            .update_selection(|selection| {
                selection.set_scene(SceneKind::Exterior);
                selection.prompt = "add a pool".into();
                selection.mode = EditingMode::Masked;
                Ok(())
            })
            .unwrap();
        editor.paint_mask(&[dab()]).unwrap();
        editor.set_suggested_angles(vec!["low angle".into()]);
        assert!(!editor.mask_is_empty());

        editor.set_active(1).unwrap();

        assert_eq!(editor.selection(), &Selection::default());
        assert!(editor.mask_is_empty());
        assert!(editor.suggested_angles().is_empty());
    }

    #[test]
    fn leaving_masked_mode_clears_paint() {
        let mut editor = Editor::new();
        editor.add_sessions(vec![session("a")]);
        editor
            .update_selection(|selection| {
                selection.mode = EditingMode::Masked;
                Ok(())
            })
            .unwrap();
        editor.paint_mask(&[dab()]).unwrap();
        assert!(editor.export_mask_png().is_ok());

        editor
            .update_selection(|selection| {
                selection.mode = EditingMode::Default;
                Ok(())
            })
            .unwrap();
        assert!(editor.mask_is_empty());
        assert_eq!(editor.export_mask_png(), Err(EditorError::MaskExport));
        assert!(editor.paint_mask(&[dab()]).is_err());
    }

    #[test]
    fn busy_gate_rejects_second_begin_and_history_actions() {
        let mut editor = Editor::new();
        editor.add_sessions(vec![session("a")]);
        editor.begin().unwrap();
        assert_eq!(editor.begin(), Err(EditorError::Busy));
        assert_eq!(
            editor.with_active_history(|history| {
                history.undo();
                Ok(())
            }),
            Err(EditorError::Busy)
        );

        editor.fail(&EditorError::Busy);
        assert!(editor.is_loading());
        assert!(editor.error().is_none());
        editor.fail(&EditorError::QuotaExceeded);
        assert!(!editor.is_loading());
        assert_eq!(editor.error(), Some(EditorError::QuotaExceeded.user_message().as_str()));
    }

    #[test]
    fn selected_result_needs_a_committed_step() {
        let mut editor = Editor::new();
        assert_eq!(editor.selected_result(), Err(EditorError::NoActiveImage));
        editor.add_sessions(vec![session("a")]);
        assert_eq!(editor.selected_result(), Err(EditorError::NoSelectedResult));

        let edited = ImageBlob::new(vec![1u8], "image/png");
        editor
            .with_active_history(|history| history.commit(vec![edited.clone()], "p", StepKind::Edit))
            .unwrap();
        assert_eq!(editor.selected_result().unwrap().1, edited);
    }

    #[test]
    fn snapshot_reports_gate_and_preview() {
        let mut editor = Editor::new();
        editor.add_sessions(vec![session("a")]);
        assert!(!editor.snapshot().can_submit);
        editor
            .update_selection(|selection| {
                selection.prompt = "add a pool".into();
                Ok(())
            })
            .unwrap();
        let snapshot = editor.snapshot();
        assert!(snapshot.can_submit);
        assert_eq!(snapshot.preview.as_deref(), Some("add a pool"));
        assert_eq!(snapshot.sessions.len(), 1);
    }
}
