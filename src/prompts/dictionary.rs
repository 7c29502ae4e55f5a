// src/prompts/dictionary.rs
//! Option name → instruction fragment tables.
//!
//! Keys are the identifiers the selector UI sends. Every key a selector exposes
//! must resolve to a fragment in the table(s) it is looked up in; an empty
//! fragment is valid and means "recorded, no textual effect".

use serde::{Deserialize, Serialize};

use super::intensity::intensity_descriptor;

/// A static, string-keyed fragment table.
#[derive(Debug)]
pub struct FragmentTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl FragmentTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, fragment)| *fragment)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(k, _)| *k)
    }
}

/// An option whose fragment depends on a 0..=100 intensity slider.
pub struct AdjustableOption {
    pub key: &'static str,
    pub label: &'static str,
    pub default_intensity: u8,
    descriptors: [&'static str; 5],
    render: fn(&str) -> String,
}

impl AdjustableOption {
    pub fn fragment(&self, intensity: u8) -> String {
        (self.render)(intensity_descriptor(intensity, &self.descriptors))
    }
}

impl std::fmt::Debug for AdjustableOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjustableOption")
            .field("key", &self.key)
            .field("default_intensity", &self.default_intensity)
            .finish()
    }
}

pub fn adjustable_option(key: &str) -> Option<&'static AdjustableOption> {
    ADJUSTABLE_OPTIONS.iter().find(|option| option.key == key)
}

pub static ADJUSTABLE_OPTIONS: &[AdjustableOption] = &[
    // gardens
    AdjustableOption {
        key: "สวนไทย",
        label: "Tree amount",
        default_intensity: 50,
        descriptors: [
            "a very small amount of",
            "a few",
            "a moderate amount of",
            "many",
            "a very large amount of",
        ],
        render: |amount| {
            format!(
                "Transform the landscape into a traditional Thai garden, featuring elements like salas (pavilions), water features such as ponds with lotus flowers, intricate stone carvings, and lush tropical plants like banana trees and orchids, with {} trees. The atmosphere should be serene and elegant.",
                amount
            )
        },
    },
    AdjustableOption {
        key: "สวนดอกไม้",
        label: "Flower amount",
        default_intensity: 50,
        descriptors: [
            "with a few scattered flowers",
            "with patches of flowers",
            "filled with a moderate amount of flowers",
            "densely packed with many flowers",
            "completely overflowing with a vast amount of flowers",
        ],
        render: |density| {
            format!(
                "Transform the landscape into a magnificent and colorful flower garden. The scene should be {}, creating a stunning visual tapestry. It should look like a professional botanical garden in full bloom.",
                density
            )
        },
    },
    AdjustableOption {
        key: "สวนอังกฤษ",
        label: "Flower density",
        default_intensity: 50,
        descriptors: [
            "with sparse flowerbeds",
            "with neatly arranged flowers",
            "with overflowing flowerbeds",
            "with densely packed flowers",
            "with a charmingly chaotic and overgrown abundance of flowers",
        ],
        render: |density| {
            format!(
                "Transform the landscape into a classic English cottage garden, characterized by an informal, romantic design {}, climbing roses, and winding paths.",
                density
            )
        },
    },
    AdjustableOption {
        key: "สวนไม้ทรอปิคอล",
        label: "Jungle density",
        default_intensity: 60,
        descriptors: [
            "a sparse",
            "a moderately lush",
            "a dense",
            "a very dense and overgrown",
            "an impenetrable jungle-like",
        ],
        render: |density| {
            format!(
                "Transform the landscape into {} and vibrant tropical garden. Fill it with large-leafed plants, colorful exotic flowers, and towering palm trees.",
                density
            )
        },
    },
    // backgrounds
    AdjustableOption {
        key: "วิวตึกสูงกรุงเทพ",
        label: "Building density",
        default_intensity: 50,
        descriptors: ["very sparse", "sparse", "a standard density of", "dense", "very dense"],
        render: |density| {
            format!(
                "with a {}, modern Bangkok skyscraper cityscape in the background",
                density
            )
        },
    },
    AdjustableOption {
        key: "วิวภูเขา",
        label: "Grandeur",
        default_intensity: 50,
        descriptors: [
            "rolling hills",
            "medium-sized mountains",
            "a high mountain range",
            "a majestic, towering mountain range",
            "an epic, cinematic mountain landscape",
        ],
        render: |grandeur| format!("with {} in the background", grandeur),
    },
    AdjustableOption {
        key: "วิวถนนการจราจรกรุงเทพ",
        label: "Traffic density",
        default_intensity: 50,
        descriptors: [
            "light traffic",
            "moderate traffic",
            "heavy traffic",
            "a traffic jam",
            "a complete gridlock with bumper-to-bumper traffic",
        ],
        render: |traffic| {
            format!(
                "with a bustling Bangkok street with {} in the background",
                traffic
            )
        },
    },
    AdjustableOption {
        key: "วิวท้องนาสวนเกษตร",
        label: "Lushness",
        default_intensity: 60,
        descriptors: [
            "dry and sparse fields",
            "newly planted fields",
            "lush green fields",
            "fields ripe for harvest",
            "extremely abundant and verdant fields",
        ],
        render: |lushness| {
            format!(
                "with {} and agricultural fields in the background",
                lushness
            )
        },
    },
    AdjustableOption {
        key: "วิวโครงการหมู่บ้านจัดสรร",
        label: "Housing density",
        default_intensity: 40,
        descriptors: [
            "a few scattered houses",
            "a low-density",
            "a medium-density",
            "a high-density",
            "a very crowded",
        ],
        render: |density| {
            format!(
                "with {}, modern, landscaped housing estate project in the background",
                density
            )
        },
    },
    AdjustableOption {
        key: "วิว แม่น้ำเจ้าพระยา",
        label: "River width",
        default_intensity: 50,
        descriptors: [
            "a narrow canal-like view of",
            "a medium-width view of",
            "a wide view of",
            "a very wide, expansive view of",
            "a panoramic, almost sea-like view of",
        ],
        render: |width| {
            format!(
                "with {} the Chao Phraya River in Bangkok in the background",
                width
            )
        },
    },
    AdjustableOption {
        key: "ป่า",
        label: "Forest density",
        default_intensity: 70,
        descriptors: [
            "a sparse",
            "a moderately dense",
            "a dense",
            "a very dense",
            "an ancient, overgrown",
        ],
        render: |density| format!("with {} forest background", density),
    },
    AdjustableOption {
        key: "ชายหาด",
        label: "Beach width",
        default_intensity: 50,
        descriptors: [
            "a narrow strip of sand",
            "a medium-sized",
            "a wide",
            "a very wide, expansive",
            "an endless",
        ],
        render: |width| format!("with {} beach background", width),
    },
    AdjustableOption {
        key: "วิวเมือง",
        label: "Building density",
        default_intensity: 50,
        descriptors: [
            "a small town",
            "a sparse city skyline",
            "a standard city skyline",
            "a dense, sprawling metropolis",
            "a futuristic, hyper-dense megacity",
        ],
        render: |density| format!("with {} cityscape background", density),
    },
    AdjustableOption {
        key: "อวกาศ",
        label: "Star density",
        default_intensity: 50,
        descriptors: [
            "a few distant stars",
            "a clear night sky with constellations",
            "a sky full of stars and a faint milky way",
            "a vibrant, star-filled nebula",
            "an intensely colorful and complex galactic core",
        ],
        render: |density| format!("with {} background", density),
    },
    // foregrounds
    AdjustableOption {
        key: "ต้นไม้ใหญ่ระยะหน้า",
        label: "Tree amount",
        default_intensity: 30,
        descriptors: [
            "a single, small tree",
            "a single large tree",
            "a couple of trees",
            "a small grove of trees",
            "a dense cluster of trees",
        ],
        render: |amount| format!("with {} in the foreground", amount),
    },
    AdjustableOption {
        key: "ถนนระยะหน้า",
        label: "Road type",
        default_intensity: 50,
        descriptors: [
            "a simple dirt path",
            "a single-lane paved road",
            "a two-lane road",
            "a multi-lane highway",
            "a massive, complex freeway interchange",
        ],
        render: |road| format!("with {} in the foreground", road),
    },
    AdjustableOption {
        key: "แม่น้ำระยะหน้า",
        label: "River width",
        default_intensity: 50,
        descriptors: [
            "a small stream",
            "a medium-sized river",
            "a wide river",
            "a very wide, expansive river",
            "a massive, flowing river",
        ],
        render: |width| format!("with {} in the foreground", width),
    },
    AdjustableOption {
        key: "ใบไม้ที่มุมจอบน",
        label: "Leaf amount",
        default_intensity: 40,
        descriptors: [
            "a few scattered leaves",
            "a small branch with leaves",
            "several branches",
            "a thick canopy of leaves",
            "a view almost completely obscured by leaves",
        ],
        render: |amount| {
            format!(
                "with {} framing the top corner of the view, creating a natural foreground bokeh effect",
                amount
            )
        },
    },
    AdjustableOption {
        key: "พุ่มไม้ดอกมุมล่างจอ",
        label: "Bush size",
        default_intensity: 50,
        descriptors: [
            "a small flowering bush",
            "a medium-sized flowering bush",
            "a large, dense flowering bush",
            "multiple large bushes",
            "an entire foreground filled with flowering bushes",
        ],
        render: |size| {
            format!(
                "with {} in the bottom corner of the view, adding a touch of nature to the foreground",
                size
            )
        },
    },
];

pub const ART_STYLES: FragmentTable = FragmentTable::new(
    "art styles",
    &[
        ("ภาพยนตร์", "in a Cinematic style"),
        ("วินเทจ", "in a Vintage style"),
        ("สีน้ำ", "in a Watercolor style"),
        ("3D", "in a 3D Render style"),
        ("พิกเซลอาร์ต", "in a Pixel Art style"),
        ("นีออนพังก์", "in a Neon Punk style"),
        ("สเก็ตช์", "in a Sketch style"),
        ("ป๊อปอาร์ต", "in a Pop Art style"),
    ],
);

/// Raw camera phrases; the "no change" angle maps to the empty string.
pub const CAMERA_ANGLES: FragmentTable = FragmentTable::new(
    "camera angles",
    &[
        ("มุมกล้องเดิม (ไม่แก้ไข)", ""),
        ("มุมระดับสายตา", "from an eye-level angle"),
        ("มุมสูง", "from a high angle"),
        ("มุมต่ำ", "from a low angle"),
        ("ระยะใกล้", "as a close-up shot"),
        ("ภาพมุมกว้าง", "as a wide shot"),
        ("ไอโซเมตริก", "in an isometric view"),
        ("มุมมองนก", "from a bird's eye view"),
        ("มุมดัตช์", "with a Dutch angle tilt"),
        ("ภาพระยะไกล", "as a long shot"),
        ("ข้ามไหล่", "as an over-the-shoulder shot"),
    ],
);

/// `Some("")` for the "no change" angle, `None` when the key is not a fixed angle.
pub fn camera_angle_fragment(key: &str) -> Option<String> {
    CAMERA_ANGLES.get(key).map(|phrase| {
        if phrase.is_empty() {
            String::new()
        } else {
            format!("Re-render the image {}.", phrase)
        }
    })
}

pub const GARDEN_STYLES: FragmentTable = FragmentTable::new(
    "garden styles",
    &[
        (
            "สวนญี่ปุ่น",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged. Transform the garden into a traditional Japanese garden: a small koi pond with colorful carp at its heart, clear water running between carefully placed rocks, pines and neatly clipped shrubs around it, reflecting the simplicity, harmony and Zen respect for nature. The mood should be calm and warm, perfect for a quiet cup of tea.",
        ),
        (
            "สวนอังกฤษ",
            "Transform the landscape into a classic English cottage garden with an informal, romantic design: blooming flowerbeds, climbing roses, winding brick or gravel paths and a mix of perennials, annuals and shrubs creating a charming natural abundance.",
        ),
        (
            "สวนไม้ทรอปิคอล",
            "Transform the landscape into a dense, lively tropical garden filled with large-leafed plants such as monstera and philodendron, vivid exotic flowers like hibiscus and bird of paradise, towering palms and a humid, verdant atmosphere.",
        ),
        (
            "สวนดอกไม้",
            "Transform the landscape into a beautiful, colorful flower garden filled with many kinds of flowers blooming in different colors, shapes and sizes, like a professional botanical garden in full bloom.",
        ),
        (
            "สวนมหัศจรรย์",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged, with lights randomly switched on. Surround the house with an enchanted garden of large trees under a clear sky: a clear stream feeding a large pond with koi, dense shrubs and big frangipani trees, ferns and caladiums, a curving stone path through tropical greenery to a wooden deck with white chairs by the water, soft white mist drifting between the plants and sunbeams filtering through the canopy, calm and fresh just after rain.",
        ),
        (
            "สวนโมเดิร์นทรอปิคัล",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged. The house sits in a housing estate with a bright sky and few clouds, neighbouring houses and trees in the background. Turn the garden into a meticulously designed, luxurious modern tropical garden: large-leafed palms and philodendrons for lush density, large black stone pavers in an ordered grid for minimal contrast, sculptural free-form rocks, up-lights and hidden lighting accenting plants and architecture, and black slatted privacy walls behind the greenery, feeling calm, cool and private like a high-end resort.",
        ),
        (
            "สวนสไตล์ฟอร์มัล",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged, inside a housing estate under a bright sky with few clouds. Turn the garden into a formal garden: symmetrical and orderly, with geometrically clipped topiary, square and round shrubs, low clipped hedges, a classic multi-tier marble fountain as the centerpiece, curving brick or concrete paths across the lawn and large shade trees around the edges, feeling grand and elegant.",
        ),
        (
            "สวนโมเดิร์นผสมธรรมชาติ",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged, inside a housing estate under a bright sky with few clouds. Turn the garden into a modern natural garden: simple and clean, a checkerboard path of grey stone slabs set into green grass, large trees with timber supports, varied shrubs and a graceful weeping willow, a seating area with a wooden bench and assorted planters, soft sunlight and a relaxed, private mood.",
        ),
        (
            "สวนทางเดินทรอปิคอล",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged, inside a housing estate under a bright sky with few clouds. Add a brick pathway winding to the front door, densely surrounded by tropical plants such as large frangipani trees, giant caladium leaves, ferns, orchids and other lush foliage, shady and natural like walking into a tropical resort garden.",
        ),
        (
            "สวนไทย ลำธาร น้ำตก",
            "Make the image highly photorealistic, like a home-design magazine advertisement, keeping the design and camera angle unchanged, inside a housing estate under a bright sky with few clouds. Show a shady, tranquil natural garden with a clear stream flowing between well-placed natural rocks, large shade trees on both banks and ground cover of ferns and tropical greenery, cool, fresh and relaxing like a tropical rainforest.",
        ),
    ],
);

pub const ARCHITECTURAL_STYLES: FragmentTable = FragmentTable::new(
    "architectural styles",
    &[
        (
            "โมเดิร์น",
            "Change the building to modern architecture with clean lines, simple geometric forms without ornament, large glass windows and materials such as concrete, steel and glass.",
        ),
        (
            "ลอฟท์",
            "Change the building to industrial loft architecture with exposed brick walls, steel beams, large open spaces, high ceilings and factory-style windows.",
        ),
        (
            "คลาสสิค",
            "Change the building to classical architecture inspired by Greek and Roman principles, emphasising symmetry, order and formality with columns, pediments and decorative mouldings.",
        ),
        (
            "มินิมอล",
            "Change the building to minimalist architecture of utmost simplicity, removing every unnecessary element, using a monochrome palette, clean lines and pure geometric forms.",
        ),
        (
            "ร่วมสมัย",
            "Change the building to 21st-century contemporary architecture mixing styles, with curved lines, unconventional forms, an emphasis on sustainability and natural materials.",
        ),
        (
            "ไทยประยุกต์",
            "Change the building to applied Thai architecture, blending traditional Thai elements such as steep gabled roofs and refined details with modern construction techniques and materials, elegant and culturally rooted yet practical for modern living.",
        ),
    ],
);

pub const INTERIOR_STYLES: FragmentTable = FragmentTable::new(
    "interior styles",
    &[
        (
            "คอนเทมโพราลี",
            "Redesign the interior in a contemporary style with clean lines, a neutral palette with occasional bold accents, an uncluttered space full of natural light, metal, glass and stone, and simple unornamented furniture.",
        ),
        (
            "สแกนดิเนเวีย",
            "Redesign the interior in a Scandinavian style focused on simplicity and function: a light neutral palette (white, grey, pale blue), natural light woods such as birch and pine, cosy wool and linen textiles and abundant natural light.",
        ),
        (
            "ญี่ปุ่น",
            "Redesign the interior in a Japanese style following Zen principles of simplicity and harmony with nature: sliding shoji doors, tatami mats, low furniture, bamboo and light wood, and a calm neutral palette.",
        ),
        (
            "ไทย",
            "Redesign the interior in a traditional Thai style using warm, luxurious materials such as teak, finely carved furniture and wall panels, Thai silk textiles, low seating with triangular cushions, Thai motifs and touches of gold leaf.",
        ),
        (
            "จีน",
            "Redesign the interior in a classic Chinese style with dark lacquered wooden furniture, intricate screens and fretwork, symbolic red and gold, and traditional motifs such as dragons, peonies and bamboo.",
        ),
        (
            "โมรอคโค",
            "Redesign the interior in a vibrant Moroccan style with rich blues, reds and oranges, intricate geometric zellige tiles, arched doorways, pierced metal lanterns and layered rugs and floor cushions.",
        ),
        (
            "คลาสสิค",
            "Redesign the interior in a classic European style, elegant and formal, with symmetry, marble and fine woods, carved upholstered furniture, decorative mouldings and perhaps a crystal chandelier.",
        ),
        (
            "โมเดิร์น",
            "Redesign the interior with a modern aesthetic: crisp clean lines, simple geometric forms without ornament, a neutral palette, polished surfaces, metal, chrome and glass, and sleek furniture.",
        ),
    ],
);

/// English names for interior styles, used by the plan-to-3D template.
pub const INTERIOR_STYLE_NAMES: FragmentTable = FragmentTable::new(
    "interior style names",
    &[
        ("คอนเทมโพราลี", "Contemporary"),
        ("สแกนดิเนเวีย", "Scandinavian"),
        ("ญี่ปุ่น", "Japanese"),
        ("ไทย", "Thai"),
        ("จีน", "Chinese"),
        ("โมรอคโค", "Moroccan"),
        ("คลาสสิค", "Classic"),
        ("โมเดิร์น", "Modern"),
    ],
);

pub const INTERIOR_LIGHTING: FragmentTable = FragmentTable::new(
    "interior lighting",
    &[
        (
            "แสงธรรมชาติกลางวัน",
            "change the lighting to bright, natural daylight streaming through large windows, creating soft shadows and a fresh, airy atmosphere.",
        ),
        (
            "แสงเย็นอบอุ่น",
            "change the lighting to warm, inviting evening light from multiple sources like floor lamps, recessed ceiling lights, and accent lighting, creating a cozy and intimate mood.",
        ),
        (
            "แสงสตูดิโอ",
            "change the lighting to clean, bright, and even studio-style lighting that clearly illuminates the entire space, minimizing shadows and highlighting the design details.",
        ),
        (
            "แสงแบบภาพยนตร์",
            "change the lighting to dramatic and moody cinematic lighting, with high contrast between light and shadow, volumetric light rays, and a sophisticated, atmospheric feel.",
        ),
    ],
);

pub const BACKGROUNDS: FragmentTable = FragmentTable::new(
    "backgrounds",
    &[
        ("ป่า", "with a Forest background"),
        ("ชายหาด", "with a Beach background"),
        ("วิวเมือง", "with a Cityscape background"),
        ("อวกาศ", "with an Outer Space background"),
        ("วิวภูเขา", "with a majestic mountain range in the background"),
        (
            "วิวถนนการจราจรกรุงเทพ",
            "with a bustling Bangkok street with heavy traffic in the background",
        ),
        (
            "วิวท้องนาสวนเกษตร",
            "with a lush green farmland and agricultural fields in the background",
        ),
        (
            "วิวโครงการหมู่บ้านจัดสรร",
            "with a modern, landscaped housing estate project in the background",
        ),
        (
            "วิว แม่น้ำเจ้าพระยา",
            "with a scenic view of the Chao Phraya River in Bangkok in the background",
        ),
    ],
);

pub const FOREGROUNDS: FragmentTable = FragmentTable::new(
    "foregrounds",
    &[
        ("ถนนระยะหน้า", "with a road in the foreground"),
        ("แม่น้ำระยะหน้า", "with a river in the foreground"),
        (
            "ใบไม้ที่มุมจอบน",
            "with out-of-focus leaves framing the top corner of the view, creating a natural foreground bokeh effect",
        ),
        (
            "พุ่มไม้ดอกมุมล่างจอ",
            "with a flowering bush in the bottom corner of the view, adding a touch of nature to the foreground",
        ),
    ],
);

pub const FILTER_NONE: &str = "ไม่มี";

pub const FILTERS: FragmentTable = FragmentTable::new(
    "filters",
    &[
        (FILTER_NONE, ""),
        ("ขาว-ดำ", "apply a Black and White filter."),
        ("ซีเปีย", "apply a Sepia filter."),
        ("กลับสี", "apply an Inverted Color filter."),
        ("สีเทา", "apply a Grayscale filter."),
        ("วินเทจ", "apply a Vintage filter."),
        ("โทนเย็น", "apply a Cool Tone filter."),
        ("โทนอุ่น", "apply a Warm Tone filter."),
        (
            "HDR",
            "apply a High Dynamic Range (HDR) filter, enhancing details in both shadows and highlights, increasing local contrast, and making the colors more vibrant and saturated to create a dramatic and detailed look.",
        ),
    ],
);

pub const TIMES_OF_DAY: FragmentTable = FragmentTable::new(
    "time of day",
    &[
        (
            "รุ่งเช้า",
            "Change the time of day to early morning, with soft, warm, golden sunrise light and long gentle shadows.",
        ),
        (
            "กลางวัน",
            "Change the time of day to midday, with bright, clear, natural daylight.",
        ),
        (
            "บ่ายคล้อย",
            "Change the time of day to afternoon, with warm, slightly angled sunlight.",
        ),
        (
            "พลบค่ำ",
            "Change the atmosphere to dusk or sunset, with dramatic, colorful lighting and a mix of natural and artificial light.",
        ),
        (
            "กลางคืน",
            "Change the scene to nighttime, illuminated by moonlight and artificial light sources.",
        ),
    ],
);

pub const WEATHER: FragmentTable = FragmentTable::new(
    "weather",
    &[
        (
            "แดดจัด",
            "Change the weather to a clear, sunny day with sharp shadows.",
        ),
        (
            "มีเมฆมาก",
            "Change the weather to a bright but overcast day with soft, diffused lighting and minimal shadows.",
        ),
        (
            "ฝนตก (พื้นเปียก)",
            "Change the scene to be during or just after a light rain, with wet, reflective surfaces on the ground and building.",
        ),
        (
            "มีหมอก",
            "Change the weather to a misty or foggy day, creating a soft, atmospheric, and mysterious mood.",
        ),
    ],
);

pub const DECORATIVE_ITEMS: FragmentTable = FragmentTable::new(
    "decorative items",
    &[
        (
            "ภาพวาดบนผนัง",
            "Add a suitable piece of abstract or modern art in a frame on a prominent wall.",
        ),
        (
            "แจกันดอกไม้",
            "Place an elegant vase with fresh flowers on a table or surface.",
        ),
        (
            "พรมบนพื้น",
            "Add a stylish, textured rug on the floor that complements the room's design.",
        ),
        (
            "โคมไฟตั้งพื้น",
            "Incorporate a modern, stylish floor lamp in a corner or next to a sofa.",
        ),
        (
            "ต้นไม้ในกระถาง",
            "Add a large, healthy indoor plant in a beautiful pot to a corner of the room.",
        ),
        (
            "กองหนังสือ",
            "Place a small, artfully arranged stack of books on a coffee table or shelf.",
        ),
    ],
);

pub const QUICK_ACTIONS: FragmentTable = FragmentTable::new(
    "quick actions",
    &[
        (
            "proPhotoFinish",
            "Transform the image into a photorealistic, 8k resolution, hyper-detailed photograph with tack-sharp focus, intricate lifelike textures, and cinematic lighting, mimicking a professional DSLR camera shot with a prime lens (f/1.8 aperture, ISO 100).",
        ),
        (
            "luxuryHomeDusk",
            "Transform this architectural photo to have the atmosphere of a luxury modern home at dusk, shortly after a light rain. The ground and surfaces should be wet, creating beautiful reflections from the lighting. The lighting should be a mix of warm, inviting interior lights glowing from the windows and strategically placed exterior architectural up-lights. The overall mood should be sophisticated, warm, and serene, mimicking a high-end real estate photograph.",
        ),
        (
            "morningHousingEstate",
            "Transform this architectural photo to capture the serene atmosphere of an early morning in a modern housing estate. The lighting should be soft, warm, and golden, characteristic of the hour just after sunrise, casting long, gentle shadows. The air should feel fresh and clean, with a hint of morning dew on the manicured lawns. The overall mood should be peaceful, pristine, and inviting, typical of a high-end, well-maintained residential village.",
        ),
        (
            "urbanSketch",
            "Transform this image into a beautiful urban watercolor sketch. It should feature loose, expressive ink linework combined with soft, atmospheric watercolor washes. The style should capture the gritty yet vibrant energy of a bustling city street, similar to the work of a professional urban sketch artist. Retain the core composition but reinterpret it in this artistic, hand-drawn style.",
        ),
        (
            "architecturalSketch",
            "Transform the image into a sophisticated architectural concept sketch. The main subject should be rendered with a blend of clean linework and artistic, semi-realistic coloring, showcasing materials like wood, concrete, and glass. Superimpose this rendering over a background that resembles a technical blueprint or a working draft, complete with faint construction lines, dimensional annotations, and handwritten notes. The final result should look like a page from an architect's sketchbook, merging a polished design with the raw, creative process.",
        ),
        (
            "highriseNaturalView",
            "Transform the image into a photorealistic, high-resolution photograph of a modern high-rise building under clear natural daylight. The background should feature a distant city skyline. The surrounding area should be filled with other buildings, houses, trees, and roads, creating a dense suburban or city landscape. A clean road should encircle the building's base, and the foreground should show a typical bustling Bangkok street with traffic. The overall mood should be bright, vibrant, and showcase a bustling urban environment.",
        ),
        (
            "sketchToPhoto",
            "Turn this architectural sketch or line drawing into a sharp, realistic 8K photograph. Interpret the linework to build a detailed building with realistic textures and suitable materials, under soft natural daylight with gentle shadows. The result should look like a professional architectural photograph while keeping the sketch's original perspective and composition.",
        ),
        (
            "sketchupToPhotoreal",
            "Transform this SketchUp rendering into a high-quality, photorealistic architectural render, as if it was created using 3ds Max and V-Ray. Enhance all materials and textures to be hyper-realistic (e.g., wood grain, fabric textures, reflections on metal and glass). The lighting should be natural and cinematic, creating a believable and inviting atmosphere. Strictly maintain the original camera angle, composition, and design elements. It is absolutely crucial that the final image looks like a professional 3D render and has no outlines or sketch-like lines whatsoever.",
        ),
    ],
);

pub const ROOM_TYPES: FragmentTable = FragmentTable::new(
    "room types",
    &[
        ("ห้องนั่งเล่น", "a living room"),
        ("ห้องนอน", "a bedroom"),
        ("ห้องครัว", "a kitchen"),
        ("ห้องน้ำ", "a bathroom"),
        ("ออฟฟิศ", "an office space"),
        ("ห้องทานอาหาร", "a dining room"),
    ],
);

pub const PLAN_VIEWS: FragmentTable = FragmentTable::new(
    "plan views",
    &[
        ("มุมมองบุคคล", "a realistic eye-level interior photo"),
        ("ไอโซเมตริก", "a 3D isometric cutaway view"),
        ("มุมบน", "a 3D top-down view"),
        ("มุมกว้าง", "a realistic wide-angle interior photo"),
    ],
);

pub const DEFAULT_PLAN_VIEW: &str = "มุมมองบุคคล";

pub const PLAN_LIGHTING: FragmentTable = FragmentTable::new(
    "plan lighting",
    &[
        (
            "แสงธรรมชาติกลางวัน",
            "bright, natural daylight streaming through large windows, creating soft shadows and a fresh, airy atmosphere.",
        ),
        (
            "แสงเย็นอบอุ่น",
            "warm, inviting evening light from multiple sources like floor lamps, recessed ceiling lights, and accent lighting, creating a cozy and intimate mood.",
        ),
        (
            "แสงสตูดิโอ",
            "clean, bright, and even studio-style lighting that clearly illuminates the entire space, minimizing shadows and highlighting the design details.",
        ),
        (
            "แสงแบบภาพยนตร์",
            "dramatic and moody cinematic lighting, with high contrast between light and shadow, volumetric light rays, and a sophisticated, atmospheric feel.",
        ),
    ],
);

pub const PLAN_MATERIALS: FragmentTable = FragmentTable::new(
    "plan materials",
    &[
        (
            "ไม้และคอนกรีตโมเดิร์น",
            "a modern material palette dominated by light-toned wood, polished concrete floors, black metal accents, and large glass panes.",
        ),
        (
            "หินอ่อนและทองคลาสสิค",
            "a classic and luxurious material palette featuring white marble with grey veining, polished gold or brass fixtures, dark wood furniture, and rich textiles.",
        ),
        (
            "สีขาวและเทามินิมอล",
            "a minimalist material palette with a focus on shades of white and light gray, matte finishes, simple textures, and light wood accents for warmth.",
        ),
        (
            "เส้นใยธรรมชาติอบอุ่น",
            "a cozy and warm material palette that emphasizes natural fibers like linen and wool textiles, rattan or wicker furniture, light-colored woods, and numerous indoor plants.",
        ),
    ],
);

/// Material presets offered in masked mode; they fill the free-text prompt.
pub const MATERIALS: FragmentTable = FragmentTable::new(
    "materials",
    &[
        ("อิฐขาว", "white brick"),
        ("คอนกรีตขัดมัน", "polished concrete"),
        ("ไม้สีเข้ม", "dark wood paneling"),
        ("หินอ่อน", "marble texture"),
        ("โลหะดำ", "black matte metal"),
    ],
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectRatio {
    #[default]
    Original,
    Square,
    Widescreen,
    Vertical,
    Landscape,
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Original,
        AspectRatio::Square,
        AspectRatio::Widescreen,
        AspectRatio::Vertical,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
    ];

    /// Phrase used in the instruction; `None` for the original ratio.
    pub fn instruction_text(&self) -> Option<&'static str> {
        match self {
            AspectRatio::Original => None,
            AspectRatio::Square => Some("1:1 square"),
            AspectRatio::Widescreen => Some("16:9 widescreen"),
            AspectRatio::Vertical => Some("9:16 vertical"),
            AspectRatio::Landscape => Some("4:3 landscape"),
            AspectRatio::Portrait => Some("3:4 portrait"),
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            AspectRatio::Original => "original",
            AspectRatio::Square => "1:1",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Vertical => "9:16",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Portrait => "3:4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thai_garden_intensity_picks_tree_amount() {
        let garden = adjustable_option("สวนไทย").unwrap();
        assert!(garden.fragment(80).contains("with many trees"));
        assert!(garden.fragment(81).contains("a very large amount of trees"));
        assert!(garden.fragment(0).contains("a very small amount of trees"));
    }

    #[test]
    fn no_change_angle_is_empty_and_unknown_is_absent() {
        assert_eq!(
            camera_angle_fragment("มุมกล้องเดิม (ไม่แก้ไข)").as_deref(),
            Some("")
        );
        assert_eq!(
            camera_angle_fragment("มุมสูง").as_deref(),
            Some("Re-render the image from a high angle.")
        );
        assert_eq!(camera_angle_fragment("dramatic worm's-eye view"), None);
    }

    #[test]
    fn adjustable_keys_are_unique() {
        let mut keys: Vec<_> = ADJUSTABLE_OPTIONS.iter().map(|o| o.key).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn original_ratio_has_no_instruction() {
        assert_eq!(AspectRatio::Original.instruction_text(), None);
        assert_eq!(AspectRatio::Widescreen.instruction_text(), Some("16:9 widescreen"));
    }
}
