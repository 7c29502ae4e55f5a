// src/prompts/intensity.rs
//! Bucketing of 0..=100 sliders into descriptive phrases.

/// Five-way bucket: `<=20`, `<=40`, `<=60`, `<=80`, `>80`.
pub fn intensity_descriptor<'a>(intensity: u8, descriptors: &[&'a str; 5]) -> &'a str {
    match intensity {
        0..=20 => descriptors[0],
        21..=40 => descriptors[1],
        41..=60 => descriptors[2],
        61..=80 => descriptors[3],
        _ => descriptors[4],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

/// Legacy three-way bucket: `<=33`, `<=66`, `>66`.
pub fn three_band(intensity: u8) -> Band {
    match intensity {
        0..=33 => Band::Low,
        34..=66 => Band::Mid,
        _ => Band::High,
    }
}

/// Colour temperature of injected interior light. 41..=60 is neutral white.
pub fn light_temperature_descriptor(temperature: u8) -> &'static str {
    intensity_descriptor(
        temperature,
        &[
            "a very cool, almost blue light",
            "a cool white light",
            "a neutral white light",
            "a warm yellow light",
            "a very warm, orange-toned light",
        ],
    )
}

pub fn light_brightness_descriptor(brightness: u8) -> &'static str {
    match three_band(brightness) {
        Band::Low => "subtle and dim",
        Band::Mid => "a natural medium",
        Band::High => "bright and strong",
    }
}

pub const COVE_LIGHT_DESCRIPTORS: [&str; 5] = ["very dim", "soft", "medium", "bright", "very bright"];

pub const SPOTLIGHT_DESCRIPTORS: [&str; 5] = [
    "subtle accent",
    "softly focused",
    "moderately bright",
    "strong, focused",
    "very bright, dramatic",
];

const YOUNG_VEGETATION: &str = "Make the vegetation consist of young, newly planted trees and shrubs.";
const MATURE_VEGETATION: &str =
    "Make the vegetation feature mature, large, and well-established trees.";
const SPRING: &str =
    "Change the season to spring, with fresh green leaves and some flowering plants.";
const AUTUMN: &str =
    "Change the season to autumn, with leaves showing shades of red, orange, and yellow.";

/// Silent unless the slider is below 25 or above 75.
pub fn vegetation_age_fragment(age: u8) -> Option<&'static str> {
    match age {
        0..=24 => Some(YOUNG_VEGETATION),
        76..=u8::MAX => Some(MATURE_VEGETATION),
        _ => None,
    }
}

pub fn season_fragment(season: u8) -> Option<&'static str> {
    match season {
        0..=24 => Some(SPRING),
        76..=u8::MAX => Some(AUTUMN),
        _ => None,
    }
}
