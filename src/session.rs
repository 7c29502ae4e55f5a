// src/session.rs
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{EditorError, Result};
use crate::history::{EditHistory, HistorySummary};
use crate::models::ImageBlob;

/// One uploaded image and its own edit history.
#[derive(Debug, Clone)]
pub struct ImageSession {
    pub id: Uuid,
    pub file_name: String,
    pub source: ImageBlob,
    pub width: u32,
    pub height: u32,
    pub history: EditHistory,
}

impl ImageSession {
    pub fn new(file_name: impl Into<String>, source: ImageBlob, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            source,
            width,
            height,
            history: EditHistory::new(),
        }
    }

    /// Selected variant at the cursor, or the original upload.
    pub fn display_image(&self) -> &ImageBlob {
        self.history.selected_image().unwrap_or(&self.source)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            file_name: self.file_name.clone(),
            mime_type: self.source.mime_type.clone(),
            width: self.width,
            height: self.height,
            history: self.history.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub history: HistorySummary,
}

#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: Vec<ImageSession>,
    active: Option<usize>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageSession> {
        self.sessions.iter()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&ImageSession> {
        self.sessions.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut ImageSession> {
        self.sessions.get_mut(self.active?)
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.active().map(|session| session.id)
    }

    pub fn get(&self, index: usize) -> Option<&ImageSession> {
        self.sessions.get(index)
    }

    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut ImageSession> {
        self.sessions.iter_mut().find(|session| session.id == id)
    }

    /// Appends sessions. The first of them becomes active if nothing was.
    pub fn add(&mut self, sessions: Vec<ImageSession>) -> Vec<Uuid> {
        let first_new = self.sessions.len();
        let ids = sessions.iter().map(|session| session.id).collect::<Vec<_>>();
        self.sessions.extend(sessions);
        if self.active.is_none() && !ids.is_empty() {
            self.active = Some(first_new);
        }
        ids
    }

    pub fn remove(&mut self, index: usize) -> Result<ImageSession> {
        if index >= self.sessions.len() {
            return Err(EditorError::InvalidIndex(index));
        }
        let removed = self.sessions.remove(index);
        self.active = match self.active {
            None => None,
            Some(_) if self.sessions.is_empty() => None,
            Some(active) if active == index => Some(index.min(self.sessions.len() - 1)),
            Some(active) if active > index => Some(active - 1),
            Some(active) => Some(active),
        };
        Ok(removed)
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.sessions.len() {
            return Err(EditorError::InvalidIndex(index));
        }
        self.active = Some(index);
        Ok(())
    }
}
