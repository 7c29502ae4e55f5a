// src/prompts/catalog.rs
//! The option keys each selector exposes, in display order.

use serde::Serialize;

use crate::models::SceneKind;

use super::dictionary::AspectRatio;

pub const ART_STYLE_KEYS: &[&str] = &[
    "ภาพยนตร์",
    "วินเทจ",
    "สีน้ำ",
    "3D",
    "พิกเซลอาร์ต",
    "นีออนพังก์",
    "สเก็ตช์",
    "ป๊อปอาร์ต",
];

pub const CAMERA_ANGLE_KEYS: &[&str] = &[
    "มุมกล้องเดิม (ไม่แก้ไข)",
    "มุมระดับสายตา",
    "มุมสูง",
    "มุมต่ำ",
    "ระยะใกล้",
    "ภาพมุมกว้าง",
    "ไอโซเมตริก",
    "มุมมองนก",
    "มุมดัตช์",
    "ภาพระยะไกล",
    "ข้ามไหล่",
];

pub const GARDEN_STYLE_KEYS: &[&str] = &[
    "สวนไทย",
    "สวนญี่ปุ่น",
    "สวนอังกฤษ",
    "สวนไม้ทรอปิคอล",
    "สวนดอกไม้",
    "สวนมหัศจรรย์",
    "สวนโมเดิร์นทรอปิคัล",
    "สวนสไตล์ฟอร์มัล",
    "สวนโมเดิร์นผสมธรรมชาติ",
    "สวนทางเดินทรอปิคอล",
    "สวนไทย ลำธาร น้ำตก",
];

pub const ARCHITECTURAL_STYLE_KEYS: &[&str] =
    &["โมเดิร์น", "ลอฟท์", "คลาสสิค", "มินิมอล", "ร่วมสมัย", "ไทยประยุกต์"];

pub const INTERIOR_STYLE_KEYS: &[&str] = &[
    "คอนเทมโพราลี",
    "สแกนดิเนเวีย",
    "ญี่ปุ่น",
    "ไทย",
    "จีน",
    "โมรอคโค",
    "คลาสสิค",
    "โมเดิร์น",
];

pub const INTERIOR_LIGHTING_KEYS: &[&str] =
    &["แสงธรรมชาติกลางวัน", "แสงเย็นอบอุ่น", "แสงสตูดิโอ", "แสงแบบภาพยนตร์"];

pub const BACKGROUND_KEYS: &[&str] = &[
    "วิวตึกสูงกรุงเทพ",
    "วิวภูเขา",
    "วิวถนนการจราจรกรุงเทพ",
    "วิวท้องนาสวนเกษตร",
    "วิวโครงการหมู่บ้านจัดสรร",
    "วิว แม่น้ำเจ้าพระยา",
    "ป่า",
    "ชายหาด",
    "วิวเมือง",
    "อวกาศ",
];

pub const FOREGROUND_KEYS: &[&str] = &[
    "ถนนระยะหน้า",
    "ต้นไม้ใหญ่ระยะหน้า",
    "แม่น้ำระยะหน้า",
    "ใบไม้ที่มุมจอบน",
    "พุ่มไม้ดอกมุมล่างจอ",
];

pub const FILTER_KEYS: &[&str] = &[
    "ไม่มี", "ขาว-ดำ", "ซีเปีย", "กลับสี", "สีเทา", "วินเทจ", "โทนเย็น", "โทนอุ่น", "HDR",
];

pub const TIME_OF_DAY_KEYS: &[&str] = &["รุ่งเช้า", "กลางวัน", "บ่ายคล้อย", "พลบค่ำ", "กลางคืน"];

pub const WEATHER_KEYS: &[&str] = &["แดดจัด", "มีเมฆมาก", "ฝนตก (พื้นเปียก)", "มีหมอก"];

pub const DECORATIVE_ITEM_KEYS: &[&str] = &[
    "ภาพวาดบนผนัง",
    "แจกันดอกไม้",
    "พรมบนพื้น",
    "โคมไฟตั้งพื้น",
    "ต้นไม้ในกระถาง",
    "กองหนังสือ",
];

pub const ROOM_TYPE_KEYS: &[&str] = &[
    "ห้องนั่งเล่น",
    "ห้องนอน",
    "ห้องครัว",
    "ห้องน้ำ",
    "ออฟฟิศ",
    "ห้องทานอาหาร",
];

pub const PLAN_VIEW_KEYS: &[&str] = &["มุมมองบุคคล", "ไอโซเมตริก", "มุมบน", "มุมกว้าง"];

pub const PLAN_LIGHTING_KEYS: &[&str] = INTERIOR_LIGHTING_KEYS;

pub const PLAN_MATERIAL_KEYS: &[&str] = &[
    "ไม้และคอนกรีตโมเดิร์น",
    "หินอ่อนและทองคลาสสิค",
    "สีขาวและเทามินิมอล",
    "เส้นใยธรรมชาติอบอุ่น",
];

pub const MATERIAL_KEYS: &[&str] = &["อิฐขาว", "คอนกรีตขัดมัน", "ไม้สีเข้ม", "หินอ่อน", "โลหะดำ"];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickActionInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub scene: SceneKind,
}

pub const QUICK_ACTION_INFO: &[QuickActionInfo] = &[
    QuickActionInfo {
        id: "proPhotoFinish",
        label: "Photoreal",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "luxuryHomeDusk",
        label: "Luxury home",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "morningHousingEstate",
        label: "Morning estate",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "highriseNaturalView",
        label: "High-rise natural view",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "urbanSketch",
        label: "Urban sketch",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "sketchToPhoto",
        label: "Sketch to photo",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "architecturalSketch",
        label: "Architectural sketch",
        scene: SceneKind::Exterior,
    },
    QuickActionInfo {
        id: "sketchupToPhotoreal",
        label: "SketchUp to photoreal",
        scene: SceneKind::Interior,
    },
];

pub fn quick_actions_for(scene: SceneKind) -> Vec<&'static QuickActionInfo> {
    QUICK_ACTION_INFO
        .iter()
        .filter(|action| action.scene == scene)
        .collect()
}

/// Everything a front end needs to render the selectors.
#[derive(Debug, Serialize)]
pub struct OptionCatalog {
    pub art_styles: &'static [&'static str],
    pub camera_angles: &'static [&'static str],
    pub garden_styles: &'static [&'static str],
    pub architectural_styles: &'static [&'static str],
    pub interior_styles: &'static [&'static str],
    pub interior_lighting: &'static [&'static str],
    pub backgrounds: &'static [&'static str],
    pub foregrounds: &'static [&'static str],
    pub filters: &'static [&'static str],
    pub times_of_day: &'static [&'static str],
    pub weather: &'static [&'static str],
    pub decorative_items: &'static [&'static str],
    pub room_types: &'static [&'static str],
    pub plan_views: &'static [&'static str],
    pub plan_lighting: &'static [&'static str],
    pub plan_materials: &'static [&'static str],
    pub materials: &'static [&'static str],
    pub quick_actions: &'static [QuickActionInfo],
    pub aspect_ratios: [AspectRatio; 6],
}

pub fn catalog() -> OptionCatalog {
    OptionCatalog {
        art_styles: ART_STYLE_KEYS,
        camera_angles: CAMERA_ANGLE_KEYS,
        garden_styles: GARDEN_STYLE_KEYS,
        architectural_styles: ARCHITECTURAL_STYLE_KEYS,
        interior_styles: INTERIOR_STYLE_KEYS,
        interior_lighting: INTERIOR_LIGHTING_KEYS,
        backgrounds: BACKGROUND_KEYS,
        foregrounds: FOREGROUND_KEYS,
        filters: FILTER_KEYS,
        times_of_day: TIME_OF_DAY_KEYS,
        weather: WEATHER_KEYS,
        decorative_items: DECORATIVE_ITEM_KEYS,
        room_types: ROOM_TYPE_KEYS,
        plan_views: PLAN_VIEW_KEYS,
        plan_lighting: PLAN_LIGHTING_KEYS,
        plan_materials: PLAN_MATERIAL_KEYS,
        materials: MATERIAL_KEYS,
        quick_actions: QUICK_ACTION_INFO,
        aspect_ratios: AspectRatio::ALL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::dictionary::*;

    fn assert_covered(keys: &[&str], tables: &[&FragmentTable]) {
        for key in keys {
            assert!(
                tables.iter().any(|table| table.contains(key)),
                "\"{}\" missing from {:?}",
                key,
                tables.iter().map(|t| t.name()).collect::<Vec<_>>()
            );
        }
    }

    fn assert_covered_or_adjustable(keys: &[&str], table: &FragmentTable) {
        for key in keys {
            assert!(
                table.contains(key) || adjustable_option(key).is_some(),
                "\"{}\" has neither a {} fragment nor an intensity generator",
                key,
                table.name()
            );
        }
    }

    #[test]
    fn every_selectable_key_resolves() {
        assert_covered(ART_STYLE_KEYS, &[&ART_STYLES]);
        assert_covered(CAMERA_ANGLE_KEYS, &[&CAMERA_ANGLES]);
        assert_covered(ARCHITECTURAL_STYLE_KEYS, &[&ARCHITECTURAL_STYLES]);
        assert_covered(INTERIOR_STYLE_KEYS, &[&INTERIOR_STYLES]);
        assert_covered(INTERIOR_STYLE_KEYS, &[&INTERIOR_STYLE_NAMES]);
        assert_covered(INTERIOR_LIGHTING_KEYS, &[&INTERIOR_LIGHTING]);
        assert_covered(FILTER_KEYS, &[&FILTERS]);
        assert_covered(TIME_OF_DAY_KEYS, &[&TIMES_OF_DAY]);
        assert_covered(WEATHER_KEYS, &[&WEATHER]);
        assert_covered(DECORATIVE_ITEM_KEYS, &[&DECORATIVE_ITEMS]);
        assert_covered(ROOM_TYPE_KEYS, &[&ROOM_TYPES]);
        assert_covered(PLAN_VIEW_KEYS, &[&PLAN_VIEWS]);
        assert_covered(PLAN_LIGHTING_KEYS, &[&PLAN_LIGHTING]);
        assert_covered(PLAN_MATERIAL_KEYS, &[&PLAN_MATERIALS]);
        assert_covered(MATERIAL_KEYS, &[&MATERIALS]);
        assert_covered_or_adjustable(GARDEN_STYLE_KEYS, &GARDEN_STYLES);
        assert_covered_or_adjustable(BACKGROUND_KEYS, &BACKGROUNDS);
        assert_covered_or_adjustable(FOREGROUND_KEYS, &FOREGROUNDS);
    }

    #[test]
    fn every_quick_action_has_a_fragment() {
        for action in QUICK_ACTION_INFO {
            assert!(
                QUICK_ACTIONS.get(action.id).is_some_and(|f| !f.is_empty()),
                "quick action {} has no fragment",
                action.id
            );
        }
        assert_eq!(quick_actions_for(SceneKind::Exterior).len(), 7);
        assert_eq!(quick_actions_for(SceneKind::Interior).len(), 1);
        assert!(quick_actions_for(SceneKind::Plan).is_empty());
    }

    #[test]
    fn filters_only_none_is_silent() {
        for key in FILTER_KEYS {
            let fragment = FILTERS.get(key).unwrap();
            assert_eq!(fragment.is_empty(), *key == FILTER_NONE);
        }
    }
}
