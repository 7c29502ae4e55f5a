// src/history.rs
//! Per-image undo/redo over generated result sets.
//!
//! Every step keeps its variants, prompt log entry, kind and result labels
//! together, so the three parallel logs can never disagree in length.

use log::debug;
use serde::Serialize;

use crate::errors::{EditorError, Result};
use crate::models::{ImageBlob, StepKind};

#[derive(Debug, Clone)]
pub struct GenerationStep {
    pub variants: Vec<ImageBlob>,
    pub prompt: String,
    pub kind: StepKind,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    steps: Vec<GenerationStep>,
    cursor: Option<usize>,
    selected: Option<usize>,
}

/// Serializable view of the history, without image data.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySummary {
    pub len: usize,
    pub cursor: Option<usize>,
    pub selected_variant: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub variant_count: usize,
    pub labels: Vec<String>,
    pub prompt_log: Vec<String>,
    pub step_kinds: Vec<StepKind>,
    pub title: &'static str,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected_variant(&self) -> Option<usize> {
        self.selected
    }

    pub fn prompt_log(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.prompt.as_str()).collect()
    }

    pub fn step_kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|step| step.kind).collect()
    }

    pub fn current(&self) -> Option<&GenerationStep> {
        self.cursor.and_then(|cursor| self.steps.get(cursor))
    }

    pub fn selected_image(&self) -> Option<&ImageBlob> {
        let step = self.current()?;
        step.variants.get(self.selected?)
    }

    pub fn current_labels(&self) -> &[String] {
        self.current().map(|step| step.labels.as_slice()).unwrap_or(&[])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(cursor) => cursor + 1 < self.steps.len(),
            None => !self.steps.is_empty(),
        }
    }

    pub fn commit(&mut self, variants: Vec<ImageBlob>, prompt: impl Into<String>, kind: StepKind) -> Result<()> {
        let labels = vec![kind.default_label().to_string(); variants.len()];
        self.commit_with_labels(variants, prompt, kind, labels)
    }

    /// Drops every step after the cursor, appends, and selects the first variant.
    pub fn commit_with_labels(
        &mut self,
        variants: Vec<ImageBlob>,
        prompt: impl Into<String>,
        kind: StepKind,
        labels: Vec<String>,
    ) -> Result<()> {
        if variants.is_empty() {
            return Err(EditorError::EmptyResponse);
        }
        self.push_step(GenerationStep {
            variants,
            prompt: prompt.into(),
            kind,
            labels,
        });
        self.selected = Some(0);
        Ok(())
    }

    fn push_step(&mut self, step: GenerationStep) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.steps.truncate(keep);
        let kind = step.kind;
        self.steps.push(step);
        self.cursor = Some(self.steps.len() - 1);
        debug!("committed {:?} step, cursor now {}", kind, self.steps.len() - 1);
    }

    pub fn undo(&mut self) {
        match self.cursor {
            None => {}
            Some(0) => {
                self.cursor = None;
                self.selected = None;
            }
            Some(cursor) => {
                self.cursor = Some(cursor - 1);
                self.selected = Some(0);
            }
        }
    }

    pub fn redo(&mut self) {
        if !self.can_redo() {
            return;
        }
        self.cursor = Some(self.cursor.map_or(0, |cursor| cursor + 1));
        self.selected = Some(0);
    }

    pub fn reset_all(&mut self) {
        self.steps.clear();
        self.cursor = None;
        self.selected = None;
    }

    /// View-only change of the displayed variant.
    pub fn select_variant(&mut self, index: usize) -> Result<()> {
        let step = self.current().ok_or(EditorError::NoSelectedResult)?;
        if index >= step.variants.len() {
            return Err(EditorError::InvalidIndex(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Commits a copy of the current set with the selected variant swapped
    /// for `image`. The selection stays on the replaced variant.
    pub fn replace_selected_variant(&mut self, image: ImageBlob, prompt: impl Into<String>) -> Result<()> {
        let selected = self.selected.ok_or(EditorError::NoSelectedResult)?;
        let current = self.current().ok_or(EditorError::NoSelectedResult)?;
        if selected >= current.variants.len() {
            return Err(EditorError::InvalidIndex(selected));
        }

        let mut variants = current.variants.clone();
        variants[selected] = image;
        let labels = current.labels.clone();

        self.push_step(GenerationStep {
            variants,
            prompt: prompt.into(),
            kind: StepKind::Upscale,
            labels,
        });
        self.selected = Some(selected);
        Ok(())
    }

    pub fn results_title(&self) -> &'static str {
        let Some(step) = self.current() else {
            return "Results";
        };
        match step.kind {
            StepKind::StyleVariation => "Style variations",
            StepKind::AngleVariation => "Camera angle variations",
            StepKind::GeometricVariation if step.prompt.starts_with("3D views") => {
                "3D results from four viewpoints"
            }
            StepKind::GeometricVariation => "Variations",
            StepKind::Edit => "Edit result",
            StepKind::Upscale => "Upscale result",
            StepKind::Transform => "Transform result",
        }
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            len: self.len(),
            cursor: self.cursor,
            selected_variant: self.selected,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            variant_count: self.current().map_or(0, |step| step.variants.len()),
            labels: self.current_labels().to_vec(),
            prompt_log: self.steps.iter().map(|step| step.prompt.clone()).collect(),
            step_kinds: self.step_kinds(),
            title: self.results_title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn image(tag: u8) -> ImageBlob {
        ImageBlob::new(vec![tag], "image/jpeg")
    }

    fn assert_consistent(history: &EditHistory) {
        if let Some(cursor) = history.cursor() {
            assert!(cursor < history.len());
        }
        assert_eq!(history.prompt_log().len(), history.len());
        assert_eq!(history.step_kinds().len(), history.len());
        assert_eq!(history.selected_variant().is_some(), history.cursor().is_some());
    }

    #[test]
    fn random_operation_sequences_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut history = EditHistory::new();
        for step in 0..2_000u32 {
            match rng.gen_range(0..4) {
                0 => history
                    .commit(vec![image(step as u8)], format!("step {}", step), StepKind::Edit)
                    .unwrap(),
                1 => history.undo(),
                2 => history.redo(),
                _ => {
                    if rng.gen_range(0..10) == 0 {
                        history.reset_all();
                    }
                }
            }
            assert_consistent(&history);
        }
    }

    #[test]
    fn commit_after_undo_truncates_only_later_steps() {
        let mut history = EditHistory::new();
        for tag in 0..4 {
            history.commit(vec![image(tag)], format!("p{}", tag), StepKind::Edit).unwrap();
        }
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), Some(1));

        history.commit(vec![image(9)], "p9", StepKind::Transform).unwrap();

        assert_eq!(history.prompt_log(), vec!["p0", "p1", "p9"]);
        assert_eq!(history.cursor(), Some(2));
        assert!(!history.can_redo());
        assert_eq!(history.selected_image(), Some(&image(9)));
    }

    #[test]
    fn undo_to_source_clears_selection() {
        let mut history = EditHistory::new();
        history.commit(vec![image(1)], "p", StepKind::Edit).unwrap();
        history.undo();
        assert_eq!(history.cursor(), None);
        assert_eq!(history.selected_variant(), None);
        assert!(history.can_redo());
        history.undo();
        assert_eq!(history.cursor(), None);
        history.redo();
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.selected_variant(), Some(0));
        history.redo();
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn reset_all_disables_undo_and_redo() {
        let mut history = EditHistory::new();
        history.commit(vec![image(1)], "a", StepKind::Edit).unwrap();
        history.commit(vec![image(2)], "b", StepKind::Edit).unwrap();
        history.undo();
        history.reset_all();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.prompt_log().is_empty());
    }

    #[test]
    fn upscale_replaces_only_selected_variant() {
        let mut history = EditHistory::new();
        let labels: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        history
            .commit_with_labels(
                (1..=4).map(image).collect(),
                "styles",
                StepKind::StyleVariation,
                labels.clone(),
            )
            .unwrap();
        history.select_variant(2).unwrap();

        history.replace_selected_variant(image(42), "upscale").unwrap();

        let previous = &history.steps[0].variants;
        let current = &history.current().unwrap().variants;
        assert_eq!(history.len(), 2);
        for (index, (before, after)) in previous.iter().zip(current).enumerate() {
            if index == 2 {
                assert_eq!(after, &image(42));
            } else {
                assert_eq!(before, after);
            }
        }
        assert_eq!(history.current_labels(), labels.as_slice());
        assert_eq!(history.selected_variant(), Some(2));
        assert_eq!(history.step_kinds(), vec![StepKind::StyleVariation, StepKind::Upscale]);

        history.undo();
        assert_eq!(history.current().unwrap().variants[2], image(3));
    }

    #[test]
    fn empty_commit_and_bad_selection_are_rejected() {
        let mut history = EditHistory::new();
        assert_eq!(
            history.commit(Vec::new(), "x", StepKind::Edit),
            Err(EditorError::EmptyResponse)
        );
        assert_eq!(history.select_variant(0), Err(EditorError::NoSelectedResult));
        assert_eq!(
            history.replace_selected_variant(image(1), "u"),
            Err(EditorError::NoSelectedResult)
        );
        history.commit(vec![image(1)], "x", StepKind::Edit).unwrap();
        assert_eq!(history.select_variant(3), Err(EditorError::InvalidIndex(3)));
    }

    #[test]
    fn titles_follow_step_kind() {
        let mut history = EditHistory::new();
        assert_eq!(history.results_title(), "Results");
        history
            .commit(vec![image(1)], "3D views (4) for ห้องนอน, style ไทย", StepKind::GeometricVariation)
            .unwrap();
        assert_eq!(history.results_title(), "3D results from four viewpoints");
        history.commit(vec![image(2)], "Edited", StepKind::Edit).unwrap();
        assert_eq!(history.results_title(), "Edit result");
    }
}
