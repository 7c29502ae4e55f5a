// src/prompts/plan.rs
//! Floor plan to 3D visualisation instructions.

use crate::errors::{EditorError, Result};
use crate::selection::Selection;

use super::catalog::PLAN_VIEW_KEYS;
use super::composer::{ComposedInstruction, collapse_whitespace};
use super::dictionary::{
    FragmentTable, INTERIOR_STYLE_NAMES, PLAN_LIGHTING, PLAN_MATERIALS, PLAN_VIEWS, ROOM_TYPES,
};

/// Resolved template inputs for one plan selection.
#[derive(Debug, Clone)]
pub struct PlanBrief {
    room: &'static str,
    style: &'static str,
    lighting: Option<&'static str>,
    materials: Option<&'static str>,
    furniture: String,
}

fn resolve(table: &FragmentTable, key: &str) -> Result<&'static str> {
    table
        .get(key)
        .ok_or_else(|| EditorError::InvalidValue(format!("unknown {} option \"{}\"", table.name(), key)))
}

fn resolve_optional(table: &FragmentTable, key: Option<&str>) -> Result<Option<&'static str>> {
    key.map(|key| resolve(table, key)).transpose()
}

impl PlanBrief {
    pub fn from_selection(selection: &Selection) -> Result<Self> {
        if !selection.is_plan_ready() {
            return Err(EditorError::NothingToSubmit);
        }
        let (Some(room), Some(style)) = (
            selection.room_type.as_deref(),
            selection.interior_style.as_deref(),
        ) else {
            return Err(EditorError::NothingToSubmit);
        };

        Ok(Self {
            room: resolve(&ROOM_TYPES, room)?,
            style: resolve(&INTERIOR_STYLE_NAMES, style)?,
            lighting: resolve_optional(&PLAN_LIGHTING, selection.plan.lighting.as_deref())?,
            materials: resolve_optional(&PLAN_MATERIALS, selection.plan.materials.as_deref())?,
            furniture: selection.plan.furniture.trim().to_string(),
        })
    }

    pub fn instruction(&self, view_key: &str, masked: bool) -> Result<String> {
        let view = resolve(&PLAN_VIEWS, view_key)?;
        let area = if masked { " (specifically the masked area)" } else { "" };
        let furniture = if self.furniture.is_empty() {
            String::new()
        } else {
            format!(
                "Crucially, follow this specific furniture layout: \"{}\".",
                self.furniture
            )
        };
        let lighting = self
            .lighting
            .map(|lighting| format!("Set the lighting to be as follows: {}", lighting))
            .unwrap_or_default();
        let materials = self
            .materials
            .map(|materials| format!("Use a material palette of {}", materials))
            .unwrap_or_default();

        Ok(collapse_whitespace(&format!(
            "Critically interpret this 2D floor plan{} and transform it into a high-quality, photorealistic 3D architectural visualization. The view should be {}. The space is {}, designed in a {} style. Furnish the room with appropriate and modern furniture. {} {} {} Pay close attention to materials, textures, and realistic lighting to create a cohesive and inviting atmosphere. Ensure the final image is 8k resolution and hyper-detailed.",
            area, view, self.room, self.style, furniture, lighting, materials
        )))
    }
}

/// The single-view plan instruction for the selected view.
pub fn single_view(selection: &Selection) -> Result<ComposedInstruction> {
    let brief = PlanBrief::from_selection(selection)?;
    let instruction = brief.instruction(&selection.plan.view, false)?;
    Ok(ComposedInstruction {
        instruction,
        history_label: format!(
            "3D view: {}, {}, style {}",
            selection.plan.view,
            selection.room_type.as_deref().unwrap_or_default(),
            selection.interior_style.as_deref().unwrap_or_default()
        ),
    })
}

/// One instruction per fixed viewpoint, in display order, labelled by view.
pub fn all_views(selection: &Selection, masked: bool) -> Result<(Vec<(String, String)>, String)> {
    let brief = PlanBrief::from_selection(selection)?;
    let jobs = PLAN_VIEW_KEYS
        .iter()
        .map(|view| Ok((view.to_string(), brief.instruction(view, masked)?)))
        .collect::<Result<Vec<_>>>()?;
    let label = format!(
        "3D views (4) for {}, style {}",
        selection.room_type.as_deref().unwrap_or_default(),
        selection.interior_style.as_deref().unwrap_or_default()
    );
    Ok((jobs, label))
}
