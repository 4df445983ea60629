/*
 * Barcode Creatures - Generation Tables
 * 名称池、描述词和调色板作为只读配置数据，进程启动时加载一次
 * 调色板键的顺序属于抽取契约的一部分，因此使用 IndexMap 保序
 */

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{CreatureError, Result};
use super::trait_system::{EYE_COUNTS, LIMB_COUNTS};

/// Number of temperament labels; index drawn with `next_int(0, 4)`.
pub const TEMPERAMENT_SCALE_LEN: usize = 5;
/// Minimum size of the genus and species pools.
pub const MIN_NAME_POOL: usize = 30;

/// Inclusive hue interval in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u16; 2]", into = "[u16; 2]")]
pub struct HueRange {
    pub min: u16,
    pub max: u16,
}

impl HueRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, hue: u16) -> bool {
        (self.min..=self.max).contains(&hue)
    }
}

impl From<[u16; 2]> for HueRange {
    fn from([min, max]: [u16; 2]) -> Self {
        Self { min, max }
    }
}

impl From<HueRange> for [u16; 2] {
    fn from(range: HueRange) -> Self {
        [range.min, range.max]
    }
}

/// One palette entry: three hue ranges plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSpec {
    pub name: String,
    pub primary: HueRange,
    pub secondary: HueRange,
    pub accent: HueRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationTables {
    pub genus_names: Vec<String>,
    pub species_names: Vec<String>,
    pub body_descriptors: Vec<String>,
    /// Aligned by position with `LIMB_COUNTS`.
    pub limb_descriptors: Vec<String>,
    /// Aligned by position with `EYE_COUNTS`.
    pub eye_descriptors: Vec<String>,
    /// Docile first, Aggressive last.
    pub temperaments: Vec<String>,
    pub palettes: IndexMap<String, PaletteSpec>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn palette(name: &str, primary: [u16; 2], secondary: [u16; 2], accent: [u16; 2]) -> PaletteSpec {
    PaletteSpec {
        name: name.to_string(),
        primary: primary.into(),
        secondary: secondary.into(),
        accent: accent.into(),
    }
}

impl Default for GenerationTables {
    fn default() -> Self {
        let genus_names = owned(&[
            "Globus", "Angulus", "Cylus", "Torius", "Prismus", "Tentaculus", "Alatus", "Spinax",
            "Cornus", "Cristus", "Maculatus", "Striatus", "Texturus", "Magnus", "Parvus", "Rapidus",
            "Fortis", "Sagax", "Polymorphus", "Proteus", "Oculus", "Appendix", "Dermatus", "Chitinus",
            "Mollus", "Radiatus", "Spiralus", "Fractus", "Symmetrus", "Asymmetrus",
        ]);

        let species_names = owned(&[
            "ocularis", "digitatus", "corniger", "spinatus", "alatus", "rubrus", "viridis", "caeruleus",
            "aureus", "argentus", "striatus", "maculatus", "variegatus", "cristatus", "armatus", "maximus",
            "minimus", "medius", "validus", "tenuis", "elegans", "robustus", "gracilis", "formosus",
            "mirabilis", "tentaculis", "appendicus", "dorsalis", "lateralis", "ventralis",
        ]);

        let mut palettes = IndexMap::new();
        palettes.insert("volcanic".to_string(), palette("Volcanic", [0, 20], [350, 360], [30, 45]));
        palettes.insert("oceanic".to_string(), palette("Oceanic", [190, 220], [240, 280], [160, 180]));
        palettes.insert("forest".to_string(), palette("Forest", [90, 140], [60, 80], [40, 50]));
        palettes.insert("arctic".to_string(), palette("Arctic", [180, 220], [200, 240], [0, 0]));
        palettes.insert("toxic".to_string(), palette("Toxic", [280, 320], [120, 140], [300, 330]));
        palettes.insert("desert".to_string(), palette("Desert", [30, 50], [15, 35], [40, 60]));
        palettes.insert("cosmic".to_string(), palette("Cosmic", [260, 290], [220, 250], [280, 310]));

        Self {
            genus_names,
            species_names,
            body_descriptors: owned(&[
                "Spheroid", "Cuboid", "Pyramidal", "Cylindrical", "Toroidal", "Prismatic", "Amorphous", "Segmented",
            ]),
            limb_descriptors: owned(&[
                "Limbless", "Twin-Limbed", "Tri-Limbed", "Quad-Limbed", "Hexa-Limbed", "Octo-Limbed",
            ]),
            eye_descriptors: owned(&[
                "Eyeless", "Monocular", "Binocular", "Tri-Ocular", "Quad-Ocular", "Multi-Ocular",
            ]),
            temperaments: owned(&["Docile", "Calm", "Neutral", "Wary", "Aggressive"]),
            palettes,
        }
    }
}

lazy_static! {
    /// Built-in data set, shared read-only by every generation call.
    pub static ref DEFAULT_TABLES: GenerationTables = {
        let tables = GenerationTables::default();
        debug!(
            "默认生成数据表初始化完成: {} genus, {} species, {} palettes",
            tables.genus_names.len(),
            tables.species_names.len(),
            tables.palettes.len()
        );
        tables
    };
}

impl GenerationTables {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let tables: GenerationTables = toml::from_str(content)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let tables = Self::from_toml_str(&content)?;
        info!("成功加载生成数据表: {:?} ({} palettes)", path, tables.palettes.len());
        Ok(tables)
    }

    pub fn palette_keys(&self) -> Vec<&str> {
        self.palettes.keys().map(String::as_str).collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.genus_names.len() < MIN_NAME_POOL {
            return Err(CreatureError::TableError(format!(
                "genus pool needs at least {} names, found {}",
                MIN_NAME_POOL,
                self.genus_names.len()
            )));
        }
        if self.species_names.len() < MIN_NAME_POOL {
            return Err(CreatureError::TableError(format!(
                "species pool needs at least {} names, found {}",
                MIN_NAME_POOL,
                self.species_names.len()
            )));
        }
        if self.body_descriptors.is_empty() {
            return Err(CreatureError::TableError("body descriptor list is empty".to_string()));
        }
        if self.limb_descriptors.len() != LIMB_COUNTS.len() {
            return Err(CreatureError::TableError(format!(
                "limb descriptors must align with {} limb counts, found {}",
                LIMB_COUNTS.len(),
                self.limb_descriptors.len()
            )));
        }
        if self.eye_descriptors.len() != EYE_COUNTS.len() {
            return Err(CreatureError::TableError(format!(
                "eye descriptors must align with {} eye counts, found {}",
                EYE_COUNTS.len(),
                self.eye_descriptors.len()
            )));
        }
        if self.temperaments.len() != TEMPERAMENT_SCALE_LEN {
            return Err(CreatureError::TableError(format!(
                "temperament scale must have {} labels, found {}",
                TEMPERAMENT_SCALE_LEN,
                self.temperaments.len()
            )));
        }
        if self.palettes.is_empty() {
            return Err(CreatureError::TableError("palette table is empty".to_string()));
        }
        for (key, spec) in &self.palettes {
            for (channel, range) in [("primary", spec.primary), ("secondary", spec.secondary), ("accent", spec.accent)] {
                if range.min > range.max || range.max > 360 {
                    return Err(CreatureError::TableError(format!(
                        "palette `{}` has invalid {} hue range [{}, {}]",
                        key, channel, range.min, range.max
                    )));
                }
            }
        }
        Ok(())
    }
}
