// src/prompts/composer.rs
//! Turns a [`Selection`] into the single instruction sent to the backend.
//!
//! Fragments are gathered in a fixed order, joined with `". "` and cleaned.
//! Masked mode keeps only the free text and the negative prompt. An aspect
//! ratio change wraps the composed body afterwards.

use crate::models::{EditingMode, SceneKind};
use crate::selection::{NEUTRAL_COLOR, Selection};

use super::dictionary::{
    ARCHITECTURAL_STYLES, ART_STYLES, AspectRatio, BACKGROUNDS, DECORATIVE_ITEMS, FILTER_NONE,
    FILTERS, FOREGROUNDS, FragmentTable, GARDEN_STYLES, INTERIOR_LIGHTING, INTERIOR_STYLES,
    QUICK_ACTIONS, ROOM_TYPES, TIMES_OF_DAY, WEATHER, adjustable_option, camera_angle_fragment,
};
use super::intensity::{
    Band, COVE_LIGHT_DESCRIPTORS, SPOTLIGHT_DESCRIPTORS, intensity_descriptor,
    light_brightness_descriptor, light_temperature_descriptor, season_fragment, three_band,
    vegetation_age_fragment,
};
use super::plan;

pub const UPSCALE_INSTRUCTION: &str = "Upscale this image to a higher resolution, enhance details, and make it sharper without adding new elements.";

/// An instruction ready for the backend plus the text recorded in the prompt log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedInstruction {
    pub instruction: String,
    pub history_label: String,
}

pub fn compose(selection: &Selection, scene: Option<SceneKind>, mode: EditingMode) -> String {
    let masked = mode == EditingMode::Masked;
    let mut parts: Vec<String> = Vec::new();

    let text = selection.prompt.trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }

    if !masked {
        structured_fragments(selection, &mut parts);
    }

    let negative = selection.negative_prompt.trim();
    if !negative.is_empty() {
        parts.push(format!("Avoid: {}", negative));
    }

    let body = parts.join(". ");
    let room = match scene {
        Some(SceneKind::Interior) if !masked => lookup(&ROOM_TYPES, selection.room_type.as_deref()),
        _ => None,
    };
    match room {
        // The room clause leads the first fragment as one sentence.
        Some(room) => clean_prompt(&format!("For this photo of {}, {}", room, body)),
        None => clean_prompt(&body),
    }
}

fn lookup(table: &FragmentTable, key: Option<&str>) -> Option<&'static str> {
    key.and_then(|key| table.get(key))
        .filter(|fragment| !fragment.is_empty())
}

/// Intensity generator when the option has one, otherwise the static fragment.
fn adjustable_or_static(selection: &Selection, table: &FragmentTable, key: &str) -> Option<String> {
    match adjustable_option(key) {
        Some(option) => Some(option.fragment(selection.intensity(key))),
        None => lookup(table, Some(key)).map(str::to_string),
    }
}

fn structured_fragments(selection: &Selection, parts: &mut Vec<String>) {
    if let Some(action) = lookup(&QUICK_ACTIONS, selection.quick_action.as_deref()) {
        parts.push(action.to_string());
    }

    if let Some(garden) = selection.garden_style.as_deref() {
        parts.extend(adjustable_or_static(selection, &GARDEN_STYLES, garden));
    }

    if let Some(style) = lookup(&ARCHITECTURAL_STYLES, selection.architectural_style.as_deref()) {
        parts.push(style.to_string());
    }
    if let Some(style) = lookup(&INTERIOR_STYLES, selection.interior_style.as_deref()) {
        parts.push(style.to_string());
    }
    if let Some(lighting) = lookup(&INTERIOR_LIGHTING, selection.interior_lighting.as_deref()) {
        parts.push(lighting.to_string());
    }

    for item in &selection.decorative_items {
        parts.extend(lookup(&DECORATIVE_ITEMS, Some(item.as_str())).map(str::to_string));
    }
    for background in &selection.backgrounds {
        parts.extend(adjustable_or_static(selection, &BACKGROUNDS, background));
    }
    for foreground in &selection.foregrounds {
        parts.extend(adjustable_or_static(selection, &FOREGROUNDS, foreground));
    }

    if let Some(time) = lookup(&TIMES_OF_DAY, selection.time_of_day.as_deref()) {
        parts.push(time.to_string());
    }
    if let Some(weather) = lookup(&WEATHER, selection.weather.as_deref()) {
        parts.push(weather.to_string());
    }

    parts.extend(vegetation_age_fragment(selection.tree_age).map(str::to_string));
    parts.extend(season_fragment(selection.season).map(str::to_string));

    if let Some(angle) = selection.camera_angle.as_deref() {
        match camera_angle_fragment(angle) {
            Some(fragment) if fragment.is_empty() => {}
            Some(fragment) => parts.push(fragment),
            None => parts.push(format!("Re-render the image as a {}.", angle)),
        }
    }

    if selection.filter != FILTER_NONE {
        parts.extend(lookup(&FILTERS, Some(selection.filter.as_str())).map(str::to_string));
    }

    if let Some(style) = lookup(&ART_STYLES, selection.art_style.as_deref()) {
        let suffix = match three_band(selection.art_style_intensity) {
            Band::Low => " with a subtle intensity.",
            Band::Mid => "",
            Band::High => " with a very strong and exaggerated intensity.",
        };
        parts.push(format!("transform the image to be {}{}", style, suffix));
    }

    parts.extend(color_adjustment_fragment(selection));

    if selection.light_injection.enabled {
        parts.push(format!(
            "Add realistic interior lighting coming from within the windows and open doorways of the building, making it look as though the lights are on inside at dusk or night. The light should have {} and have {} brightness.",
            light_temperature_descriptor(selection.light_injection.temperature),
            light_brightness_descriptor(selection.light_injection.brightness)
        ));
    }

    if selection.cove_light.enabled {
        parts.push(format!(
            "Add decorative indirect LED cove lighting with a color of {}. The light should be {} and concealed along ceiling edges or under furniture to create a soft, ambient glow.",
            selection.cove_light.color,
            intensity_descriptor(selection.cove_light.brightness, &COVE_LIGHT_DESCRIPTORS)
        ));
    }

    if selection.spotlight.enabled {
        parts.push(format!(
            "Incorporate {} halogen-style spotlights. The spotlights should be {} and strategically placed to highlight specific features like artwork, plants, or architectural details, creating focused pools of light and adding depth to the scene.",
            selection.spotlight.color,
            intensity_descriptor(selection.spotlight.brightness, &SPOTLIGHT_DESCRIPTORS)
        ));
    }
}

fn color_adjustment_fragment(selection: &Selection) -> Option<String> {
    let clauses: Vec<String> = selection
        .color
        .named()
        .into_iter()
        .filter(|(_, value)| *value != NEUTRAL_COLOR)
        .map(|(name, value)| {
            let delta = i16::from(value) - i16::from(NEUTRAL_COLOR);
            let verb = if delta > 0 { "increase" } else { "decrease" };
            format!("{} {} by {}%", verb, name, delta.abs())
        })
        .collect();

    if clauses.is_empty() {
        None
    } else {
        Some(format!("Apply color adjustments: {}.", clauses.join(", ")))
    }
}

/// Collapses whitespace and repeated periods, then trims periods and spaces from both ends.
pub fn clean_prompt(raw: &str) -> String {
    let mut text = collapse_whitespace(raw);
    loop {
        let next = text.replace(". .", ".").replace("..", ".");
        if next == text {
            break;
        }
        text = next;
    }
    text.trim_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wraps a composed body with an aspect ratio change. Returns `None` when
/// there is neither a body nor a ratio change.
pub fn wrap_aspect_ratio(
    body: String,
    ratio: AspectRatio,
    mode: EditingMode,
) -> Option<ComposedInstruction> {
    let ratio_text = if mode == EditingMode::Masked {
        None
    } else {
        ratio.instruction_text()
    };

    match (ratio_text, body.is_empty()) {
        (None, true) => None,
        (None, false) => Some(ComposedInstruction {
            instruction: body.clone(),
            history_label: body,
        }),
        (Some(text), true) => Some(ComposedInstruction {
            instruction: aspect_ratio_instruction(text),
            history_label: format!("Change ratio to {}", ratio.short_label()),
        }),
        (Some(text), false) => Some(ComposedInstruction {
            instruction: format!(
                "{} After adjusting the aspect ratio, also apply the following changes: {}",
                aspect_ratio_instruction(text),
                body
            ),
            history_label: format!("Ratio: {} + {}", ratio.short_label(), body),
        }),
    }
}

fn aspect_ratio_instruction(ratio_text: &str) -> String {
    format!(
        "Change the aspect ratio to {}. Intelligently fill any new areas by extending the existing scene naturally and cohesively. This instruction is a top priority.",
        ratio_text
    )
}

/// The instruction for a single edit, or `None` when nothing would be sent.
pub fn build_instruction(selection: &Selection) -> Option<ComposedInstruction> {
    if selection.scene == Some(SceneKind::Plan) {
        return plan::single_view(selection).ok();
    }
    let body = compose(selection, selection.scene, selection.mode);
    wrap_aspect_ratio(body, selection.aspect_ratio, selection.mode)
}

/// Framing sent around every single-edit instruction.
pub fn frame_instruction(instruction: &str) -> String {
    format!(
        "As an expert photo editor, meticulously analyze the provided image and edit it based on the following instruction: \"{}\". Strictly adhere to the user's request and generate the resulting image.",
        instruction
    )
}

pub fn style_variation_prompt(style_key: &str) -> Option<String> {
    ART_STYLES
        .get(style_key)
        .map(|style| format!("Transform the entire image to be {}.", style))
}

pub fn angle_variation_prompt(angle_key: &str) -> Option<String> {
    camera_angle_fragment(angle_key).filter(|fragment| !fragment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exterior() -> Selection {
        Selection {
            scene: Some(SceneKind::Exterior),
            ..Selection::default()
        }
    }

    #[test]
    fn empty_selection_composes_to_nothing() {
        let selection = Selection::default();
        assert_eq!(compose(&selection, None, EditingMode::Default), "");
        assert_eq!(build_instruction(&selection), None);
    }

    #[test]
    fn no_change_angle_alone_is_silent() {
        let mut selection = exterior();
        selection.toggle_camera_angle("มุมกล้องเดิม (ไม่แก้ไข)");
        assert_eq!(compose(&selection, selection.scene, selection.mode), "");
        assert_eq!(build_instruction(&selection), None);
    }

    #[test]
    fn suggested_angle_is_synthesised() {
        let mut selection = exterior();
        selection.toggle_camera_angle("dramatic worm's-eye view");
        assert_eq!(
            compose(&selection, selection.scene, selection.mode),
            "Re-render the image as a dramatic worm's-eye view"
        );
    }

    #[test]
    fn sliders_at_midpoint_are_silent_and_extremes_emit() {
        let mut selection = exterior();
        selection.tree_age = 50;
        selection.season = 50;
        assert_eq!(compose(&selection, selection.scene, selection.mode), "");

        selection.tree_age = 10;
        selection.season = 90;
        let text = compose(&selection, selection.scene, selection.mode);
        assert!(text.contains("young, newly planted"));
        assert!(text.contains("autumn"));
    }

    #[test]
    fn masked_mode_ignores_structured_options() {
        let mut selection = exterior();
        selection.toggle_garden_style("สวนไทย");
        selection.toggle_background("ป่า");
        selection.toggle_filter("HDR");
        selection.toggle_art_style("สีน้ำ");
        selection.toggle_time_of_day("กลางคืน");
        selection.prompt = "  x  ".into();

        assert_eq!(compose(&selection, selection.scene, EditingMode::Masked), "x");

        selection.negative_prompt = "people".into();
        assert_eq!(
            compose(&selection, selection.scene, EditingMode::Masked),
            "x. Avoid: people"
        );
    }

    #[test]
    fn fragments_follow_fixed_order() {
        let mut selection = exterior();
        selection.toggle_art_style("3D");
        selection.toggle_time_of_day("กลางวัน");
        selection.toggle_quick_action("proPhotoFinish");
        selection.prompt = "paint the door red".into();

        let text = compose(&selection, selection.scene, selection.mode);
        let prompt = text.find("paint the door red").unwrap();
        let action = text.find("8k resolution").unwrap();
        let midday = text.find("midday").unwrap();
        let style = text.find("3D Render style").unwrap();
        assert!(prompt < action && action < midday && midday < style);
    }

    #[test]
    fn thai_garden_uses_intensity_generator() {
        let mut selection = exterior();
        selection.toggle_garden_style("สวนไทย");
        selection.set_intensity("สวนไทย", 80).unwrap();
        let text = compose(&selection, selection.scene, selection.mode);
        assert!(text.contains("with many trees"));
        assert!(!text.ends_with('.'));
    }

    #[test]
    fn art_style_intensity_suffix() {
        let mut selection = exterior();
        selection.toggle_art_style("วินเทจ");
        selection.art_style_intensity = 20;
        assert!(compose(&selection, None, EditingMode::Default).ends_with("with a subtle intensity"));
        selection.art_style_intensity = 50;
        assert_eq!(
            compose(&selection, None, EditingMode::Default),
            "transform the image to be in a Vintage style"
        );
        selection.art_style_intensity = 90;
        assert!(compose(&selection, None, EditingMode::Default).contains("exaggerated"));
    }

    #[test]
    fn color_adjustments_form_one_sentence() {
        let mut selection = exterior();
        selection.color.brightness = 120;
        selection.color.sharpness = 70;
        assert_eq!(
            compose(&selection, None, EditingMode::Default),
            "Apply color adjustments: increase brightness by 20%, decrease sharpness by 30%"
        );
    }

    #[test]
    fn lights_use_their_descriptors() {
        let mut selection = Selection {
            scene: Some(SceneKind::Interior),
            ..Selection::default()
        };
        selection.light_injection.enabled = true;
        selection.cove_light.enabled = true;
        selection.spotlight.enabled = true;
        selection.spotlight.brightness = 95;
        let text = compose(&selection, selection.scene, selection.mode);
        assert!(text.contains("a neutral white light and have a natural medium brightness"));
        assert!(text.contains("cove lighting with a color of #FFDAB9. The light should be bright"));
        assert!(text.contains("Incorporate #FFFFE0 halogen-style spotlights. The spotlights should be very bright, dramatic"));
    }

    #[test]
    fn interior_room_clause_leads() {
        let mut selection = Selection {
            scene: Some(SceneKind::Interior),
            room_type: Some("ห้องครัว".into()),
            ..Selection::default()
        };
        selection.prompt = "add pendant lamps".into();
        assert_eq!(
            compose(&selection, selection.scene, selection.mode),
            "For this photo of a kitchen, add pendant lamps"
        );
        assert_eq!(
            compose(&selection, selection.scene, EditingMode::Masked),
            "add pendant lamps"
        );
    }

    #[test]
    fn clean_prompt_normalises_punctuation() {
        assert_eq!(clean_prompt("  . a   b.. c. . d . "), "a b. c. d");
        assert_eq!(clean_prompt("..."), "");
        assert_eq!(clean_prompt("one.\n\ntwo"), "one. two");
    }

    #[test]
    fn aspect_ratio_wraps_body() {
        let wrapped = wrap_aspect_ratio("add snow".into(), AspectRatio::Square, EditingMode::Default)
            .unwrap();
        assert!(wrapped.instruction.starts_with("Change the aspect ratio to 1:1 square."));
        assert!(wrapped
            .instruction
            .ends_with("also apply the following changes: add snow"));
        assert_eq!(wrapped.history_label, "Ratio: 1:1 + add snow");

        let alone = wrap_aspect_ratio(String::new(), AspectRatio::Portrait, EditingMode::Default)
            .unwrap();
        assert!(alone.instruction.ends_with("This instruction is a top priority."));
        assert_eq!(alone.history_label, "Change ratio to 3:4");

        assert_eq!(
            wrap_aspect_ratio(String::new(), AspectRatio::Portrait, EditingMode::Masked),
            None
        );
    }

    #[test]
    fn batch_prompts() {
        assert_eq!(
            style_variation_prompt("สเก็ตช์").as_deref(),
            Some("Transform the entire image to be in a Sketch style.")
        );
        assert_eq!(angle_variation_prompt("มุมกล้องเดิม (ไม่แก้ไข)"), None);
        assert_eq!(
            angle_variation_prompt("มุมต่ำ").as_deref(),
            Some("Re-render the image from a low angle.")
        );
        assert!(frame_instruction("x").contains("instruction: \"x\"."));
    }
}
