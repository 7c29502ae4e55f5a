// src/selection.rs
//! The transient option picks the composer reads. Reset through `Default`.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::errors::{EditorError, Result};
use crate::models::{EditingMode, MAX_RANDOM_SEED, SamplingParams, SceneKind};
use crate::prompts::dictionary::{
    ADJUSTABLE_OPTIONS, AspectRatio, DEFAULT_PLAN_VIEW, FILTER_NONE, MATERIALS, adjustable_option,
};

pub const NEUTRAL_COLOR: u8 = 100;
pub const NEUTRAL_SLIDER: u8 = 50;
pub const FALLBACK_INTENSITY: u8 = 50;

const RANDOM_ARCHITECTURAL_STYLES: [&str; 4] = ["โมเดิร์น", "คลาสสิค", "มินิมอล", "ร่วมสมัย"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustments {
    pub brightness: u8,
    pub contrast: u8,
    pub saturation: u8,
    pub sharpness: u8,
}

impl Default for ColorAdjustments {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL_COLOR,
            contrast: NEUTRAL_COLOR,
            saturation: NEUTRAL_COLOR,
            sharpness: NEUTRAL_COLOR,
        }
    }
}

impl ColorAdjustments {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    pub fn named(&self) -> [(&'static str, u8); 4] {
        [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("sharpness", self.sharpness),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightInjection {
    pub enabled: bool,
    pub brightness: u8,
    pub temperature: u8,
}

impl Default for LightInjection {
    fn default() -> Self {
        Self {
            enabled: false,
            brightness: 50,
            temperature: 50,
        }
    }
}

/// A switchable coloured light (cove strip or spotlight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentLight {
    pub enabled: bool,
    pub brightness: u8,
    pub color: String,
}

impl AccentLight {
    fn off(brightness: u8, color: &str) -> Self {
        Self {
            enabled: false,
            brightness,
            color: color.to_string(),
        }
    }

    pub fn cove() -> Self {
        Self::off(70, "#FFDAB9")
    }

    pub fn spotlight() -> Self {
        Self::off(60, "#FFFFE0")
    }
}

impl Default for AccentLight {
    fn default() -> Self {
        Self::cove()
    }
}

/// Inputs of the floor-plan to 3D visualisation template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSelection {
    pub view: String,
    pub lighting: Option<String>,
    pub materials: Option<String>,
    pub furniture: String,
}

impl Default for PlanSelection {
    fn default() -> Self {
        Self {
            view: DEFAULT_PLAN_VIEW.to_string(),
            lighting: None,
            materials: None,
            furniture: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub scene: Option<SceneKind>,
    pub mode: EditingMode,
    pub prompt: String,
    pub negative_prompt: String,
    pub quick_action: Option<String>,
    pub garden_style: Option<String>,
    pub architectural_style: Option<String>,
    pub interior_style: Option<String>,
    pub interior_lighting: Option<String>,
    pub room_type: Option<String>,
    pub decorative_items: Vec<String>,
    pub backgrounds: Vec<String>,
    pub foregrounds: Vec<String>,
    pub time_of_day: Option<String>,
    pub weather: Option<String>,
    pub tree_age: u8,
    pub season: u8,
    pub camera_angle: Option<String>,
    pub filter: String,
    pub art_style: Option<String>,
    pub art_style_intensity: u8,
    pub color: ColorAdjustments,
    pub light_injection: LightInjection,
    pub cove_light: AccentLight,
    pub spotlight: AccentLight,
    pub aspect_ratio: AspectRatio,
    pub intensities: BTreeMap<String, u8>,
    pub plan: PlanSelection,
    pub sampling: SamplingParams,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            scene: None,
            mode: EditingMode::Default,
            prompt: String::new(),
            negative_prompt: String::new(),
            quick_action: None,
            garden_style: None,
            architectural_style: None,
            interior_style: None,
            interior_lighting: None,
            room_type: None,
            decorative_items: Vec::new(),
            backgrounds: Vec::new(),
            foregrounds: Vec::new(),
            time_of_day: None,
            weather: None,
            tree_age: NEUTRAL_SLIDER,
            season: NEUTRAL_SLIDER,
            camera_angle: None,
            filter: FILTER_NONE.to_string(),
            art_style: None,
            art_style_intensity: 100,
            color: ColorAdjustments::default(),
            light_injection: LightInjection::default(),
            cove_light: AccentLight::cove(),
            spotlight: AccentLight::spotlight(),
            aspect_ratio: AspectRatio::Original,
            intensities: default_intensities(),
            plan: PlanSelection::default(),
            sampling: SamplingParams::default(),
        }
    }
}

fn default_intensities() -> BTreeMap<String, u8> {
    ADJUSTABLE_OPTIONS
        .iter()
        .map(|option| (option.key.to_string(), option.default_intensity))
        .collect()
}

fn toggle_single(slot: &mut Option<String>, key: &str) {
    if slot.as_deref() == Some(key) {
        *slot = None;
    } else {
        *slot = Some(key.to_string());
    }
}

fn toggle_member(items: &mut Vec<String>, key: &str) {
    if let Some(pos) = items.iter().position(|item| item == key) {
        items.remove(pos);
    } else {
        items.push(key.to_string());
    }
}

impl Selection {
    pub fn intensity(&self, key: &str) -> u8 {
        self.intensities
            .get(key)
            .copied()
            .unwrap_or(FALLBACK_INTENSITY)
    }

    pub fn set_intensity(&mut self, key: &str, value: u8) -> Result<()> {
        if adjustable_option(key).is_none() {
            return Err(EditorError::InvalidValue(format!(
                "\"{}\" has no intensity slider",
                key
            )));
        }
        self.intensities.insert(key.to_string(), value.min(100));
        Ok(())
    }

    pub fn set_scene(&mut self, scene: SceneKind) {
        self.scene = Some(scene);
        self.mode = EditingMode::Default;
        if scene == SceneKind::Plan {
            self.prompt.clear();
        }
    }

    pub fn toggle_quick_action(&mut self, id: &str) {
        toggle_single(&mut self.quick_action, id);
        if self.quick_action.is_some() {
            self.camera_angle = None;
        }
    }

    pub fn toggle_camera_angle(&mut self, angle: &str) {
        toggle_single(&mut self.camera_angle, angle);
        if self.camera_angle.is_some() {
            self.quick_action = None;
        }
    }

    pub fn toggle_filter(&mut self, filter: &str) {
        if self.filter == filter {
            self.filter = FILTER_NONE.to_string();
        } else {
            self.filter = filter.to_string();
        }
    }

    pub fn toggle_art_style(&mut self, style: &str) {
        toggle_single(&mut self.art_style, style);
    }

    pub fn toggle_garden_style(&mut self, style: &str) {
        toggle_single(&mut self.garden_style, style);
    }

    pub fn toggle_architectural_style(&mut self, style: &str) {
        toggle_single(&mut self.architectural_style, style);
    }

    pub fn toggle_interior_style(&mut self, style: &str) {
        toggle_single(&mut self.interior_style, style);
    }

    pub fn toggle_interior_lighting(&mut self, lighting: &str) {
        toggle_single(&mut self.interior_lighting, lighting);
    }

    pub fn toggle_time_of_day(&mut self, time: &str) {
        toggle_single(&mut self.time_of_day, time);
    }

    pub fn toggle_weather(&mut self, weather: &str) {
        toggle_single(&mut self.weather, weather);
    }

    pub fn toggle_background(&mut self, key: &str) {
        toggle_member(&mut self.backgrounds, key);
    }

    pub fn toggle_foreground(&mut self, key: &str) {
        toggle_member(&mut self.foregrounds, key);
    }

    pub fn toggle_decorative_item(&mut self, key: &str) {
        toggle_member(&mut self.decorative_items, key);
    }

    pub fn pick_random_architectural_style<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(style) = RANDOM_ARCHITECTURAL_STYLES.choose(rng) {
            self.architectural_style = Some(style.to_string());
        }
    }

    /// Writes a material change into the free-text prompt.
    pub fn apply_material(&mut self, key: &str) -> Result<()> {
        let material = MATERIALS
            .get(key)
            .ok_or_else(|| EditorError::InvalidValue(format!("unknown material \"{}\"", key)))?;
        self.prompt = format!("change the material to {}", material);
        Ok(())
    }

    pub fn randomize_seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.sampling.seed = rng.gen_range(1..MAX_RANDOM_SEED);
    }

    pub fn has_text_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }

    pub fn has_color_adjustments(&self) -> bool {
        !self.color.is_neutral()
    }

    pub fn has_structured_options(&self) -> bool {
        self.art_style.is_some()
            || !self.backgrounds.is_empty()
            || !self.foregrounds.is_empty()
            || !self.decorative_items.is_empty()
            || self.time_of_day.is_some()
            || self.weather.is_some()
            || self.tree_age != NEUTRAL_SLIDER
            || self.season != NEUTRAL_SLIDER
            || self.quick_action.is_some()
            || self.filter != FILTER_NONE
            || self.garden_style.is_some()
            || self.architectural_style.is_some()
            || self.light_injection.enabled
            || self.interior_style.is_some()
            || self.interior_lighting.is_some()
            || self.camera_angle.is_some()
            || (self.scene == Some(SceneKind::Interior) && self.room_type.is_some())
            || self.cove_light.enabled
            || self.spotlight.enabled
    }

    pub fn is_plan_ready(&self) -> bool {
        self.scene == Some(SceneKind::Plan)
            && self.room_type.is_some()
            && self.interior_style.is_some()
    }

    pub fn has_aspect_ratio_change(&self) -> bool {
        self.aspect_ratio != AspectRatio::Original && self.mode != EditingMode::Masked
    }

    /// Submit gate. Painting a mask narrows it to free text only.
    pub fn has_edit_instruction(&self, mask_empty: bool) -> bool {
        if self.mode == EditingMode::Masked && !mask_empty {
            return self.has_text_prompt();
        }
        self.has_text_prompt()
            || self.has_structured_options()
            || self.has_color_adjustments()
            || self.is_plan_ready()
            || self.has_aspect_ratio_change()
    }

    /// Clears the option picks after a successful edit. Scene, room, plan
    /// inputs and sampling settings survive.
    pub fn reset_transient(&mut self) {
        let kept = Selection {
            scene: self.scene,
            room_type: self.room_type.take(),
            plan: std::mem::take(&mut self.plan),
            sampling: self.sampling,
            ..Selection::default()
        };
        *self = kept;
    }

    pub fn reset_structured(&mut self) {
        let kept = Selection {
            scene: self.scene,
            mode: self.mode,
            room_type: self.room_type.take(),
            plan: std::mem::take(&mut self.plan),
            sampling: self.sampling,
            ..Selection::default()
        };
        *self = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn defaults_are_neutral() {
        let selection = Selection::default();
        assert!(!selection.has_structured_options());
        assert!(!selection.has_color_adjustments());
        assert!(!selection.has_edit_instruction(true));
        assert_eq!(selection.intensity("สวนไทย"), 50);
        assert_eq!(selection.intensity("ป่า"), 70);
        assert_eq!(selection.intensity("not-adjustable"), FALLBACK_INTENSITY);
    }

    #[test]
    fn quick_action_and_camera_angle_exclude_each_other() {
        let mut selection = Selection::default();
        selection.toggle_camera_angle("มุมสูง");
        selection.toggle_quick_action("proPhotoFinish");
        assert_eq!(selection.camera_angle, None);
        selection.toggle_camera_angle("มุมต่ำ");
        assert_eq!(selection.quick_action, None);
        assert_eq!(selection.camera_angle.as_deref(), Some("มุมต่ำ"));
        selection.toggle_camera_angle("มุมต่ำ");
        assert_eq!(selection.camera_angle, None);
    }

    #[test]
    fn filter_deselect_returns_to_none() {
        let mut selection = Selection::default();
        selection.toggle_filter("HDR");
        assert!(selection.has_structured_options());
        selection.toggle_filter("HDR");
        assert_eq!(selection.filter, FILTER_NONE);
    }

    #[test]
    fn multi_choice_keeps_selection_order() {
        let mut selection = Selection::default();
        selection.toggle_background("ป่า");
        selection.toggle_background("ชายหาด");
        selection.toggle_background("อวกาศ");
        selection.toggle_background("ชายหาด");
        assert_eq!(selection.backgrounds, vec!["ป่า", "อวกาศ"]);
    }

    #[test]
    fn masked_gate_requires_text_once_painted() {
        let mut selection = Selection::default();
        selection.mode = EditingMode::Masked;
        selection.toggle_garden_style("สวนไทย");
        assert!(!selection.has_edit_instruction(false));
        selection.prompt = "  remove the car ".into();
        assert!(selection.has_edit_instruction(false));
    }

    #[test]
    fn aspect_ratio_alone_is_an_instruction_outside_masked_mode() {
        let mut selection = Selection::default();
        selection.aspect_ratio = AspectRatio::Square;
        assert!(selection.has_edit_instruction(true));
        selection.mode = EditingMode::Masked;
        assert!(!selection.has_aspect_ratio_change());
    }

    #[test]
    fn transient_reset_keeps_scene_room_and_sampling() {
        let mut selection = Selection::default();
        selection.set_scene(SceneKind::Interior);
        selection.room_type = Some("ห้องนอน".into());
        selection.sampling.seed = 42;
        selection.prompt = "add a plant".into();
        selection.mode = EditingMode::Masked;
        selection.toggle_decorative_item("พรมบนพื้น");

        selection.reset_transient();

        assert_eq!(selection.scene, Some(SceneKind::Interior));
        assert_eq!(selection.room_type.as_deref(), Some("ห้องนอน"));
        assert_eq!(selection.sampling.seed, 42);
        assert_eq!(selection.mode, EditingMode::Default);
        assert!(selection.prompt.is_empty());
        assert!(selection.decorative_items.is_empty());
    }

    #[test]
    fn random_picks_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut selection = Selection::default();
        for _ in 0..20 {
            selection.pick_random_architectural_style(&mut rng);
            let style = selection.architectural_style.clone().unwrap();
            assert!(RANDOM_ARCHITECTURAL_STYLES.contains(&style.as_str()));
            selection.randomize_seed(&mut rng);
            assert!((1..MAX_RANDOM_SEED).contains(&selection.sampling.seed));
        }
    }

    #[test]
    fn material_fills_prompt_and_intensity_is_validated() {
        let mut selection = Selection::default();
        selection.apply_material("หินอ่อน").unwrap();
        assert_eq!(selection.prompt, "change the material to marble texture");
        assert!(selection.apply_material("gold").is_err());
        assert!(selection.set_intensity("สวนไทย", 250).is_ok());
        assert_eq!(selection.intensity("สวนไทย"), 100);
        assert!(selection.set_intensity("ไม่มี", 10).is_err());
    }
}
