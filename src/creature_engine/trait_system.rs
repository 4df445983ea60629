/*
 * Barcode Creatures - Trait System
 * 分类特征（身体、肢体、眼睛、头部特征、表面花纹）从共享序列中按固定顺序抽取
 * 数值属性直接由条码数字对计算，不消耗序列
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::SeededSequence;
use super::barcode::Barcode;
use super::tables::GenerationTables;

/// Limb counts; descriptors are matched by position in this list.
pub const LIMB_COUNTS: [u8; 6] = [0, 2, 3, 4, 6, 8];
/// Eye counts; descriptors are matched by position in this list.
pub const EYE_COUNTS: [u8; 6] = [0, 1, 2, 3, 4, 5];
/// A cranial feature is present when its draw exceeds this.
pub const FEATURE_THRESHOLD: f64 = 0.7;

macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labelled_enum!(
    /// Silhouette key; selects body geometry in the renderer.
    BodyType {
        Circle => "circle",
        Square => "square",
        Triangle => "triangle",
        Pentagon => "pentagon",
        Hexagon => "hexagon",
        Octagon => "octagon",
        Ellipse => "ellipse",
    }
);

labelled_enum!(LimbType {
    Standard => "standard",
    Tentacle => "tentacle",
    Wing => "wing",
    Fin => "fin",
});

labelled_enum!(EyeStyle {
    Simple => "simple",
    Compound => "compound",
    Stalked => "stalked",
});

labelled_enum!(SurfacePattern {
    Smooth => "smooth",
    Spotted => "spotted",
    Striped => "striped",
    Geometric => "geometric",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTraits {
    pub body_type: BodyType,
    pub descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimbTraits {
    pub count: u8,
    pub limb_type: LimbType,
    pub descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeTraits {
    pub count: u8,
    pub style: EyeStyle,
    pub descriptor: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CranialFeatures {
    pub has_spikes: bool,
    pub has_horns: bool,
    pub has_antennae: bool,
    pub has_crest: bool,
}

impl CranialFeatures {
    pub const PLAIN: &'static str = "Plain";

    /// Single label, by precedence spikes > horns > antennae > crest.
    pub fn descriptor(&self) -> &'static str {
        if self.has_spikes {
            "Spiked"
        } else if self.has_horns {
            "Horned"
        } else if self.has_antennae {
            "Antennae"
        } else if self.has_crest {
            "Crested"
        } else {
            Self::PLAIN
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStats {
    pub vitality: u32,
    pub mobility: u32,
    pub awareness: u32,
    pub defense: u32,
    pub adaptability: u32,
    pub temperament: String,
}

/// Linear stat formula over one digit pair: `base + factor * (d[i] + d[i+1])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatFormula {
    pub base: u32,
    pub factor: u32,
    pub first_digit: usize,
}

impl StatFormula {
    pub fn apply(&self, digits: &[u8]) -> u32 {
        let pair = u32::from(digits[self.first_digit]) + u32::from(digits[self.first_digit + 1]);
        self.base + self.factor * pair
    }

    /// Inclusive bounds over all digit pairs.
    pub fn range(&self) -> (u32, u32) {
        (self.base, self.base + self.factor * 18)
    }
}

pub const VITALITY: StatFormula = StatFormula { base: 30, factor: 4, first_digit: 0 };
pub const MOBILITY: StatFormula = StatFormula { base: 25, factor: 4, first_digit: 2 };
pub const AWARENESS: StatFormula = StatFormula { base: 20, factor: 4, first_digit: 4 };
pub const DEFENSE: StatFormula = StatFormula { base: 35, factor: 3, first_digit: 6 };
pub const ADAPTABILITY: StatFormula = StatFormula { base: 30, factor: 3, first_digit: 8 };

// 抽取 1-2
pub(crate) fn draw_body(seq: &mut SeededSequence, tables: &GenerationTables) -> BodyTraits {
    let body_type = *seq.choice(BodyType::ALL);
    let descriptor = seq.choice(&tables.body_descriptors).clone();
    BodyTraits { body_type, descriptor }
}

// 抽取 3-4
pub(crate) fn draw_limbs(seq: &mut SeededSequence, tables: &GenerationTables) -> LimbTraits {
    let index = seq.choice_index(LIMB_COUNTS.len());
    let limb_type = *seq.choice(LimbType::ALL);
    LimbTraits {
        count: LIMB_COUNTS[index],
        limb_type,
        descriptor: tables.limb_descriptors[index].clone(),
    }
}

// 抽取 5-6
pub(crate) fn draw_eyes(seq: &mut SeededSequence, tables: &GenerationTables) -> EyeTraits {
    let index = seq.choice_index(EYE_COUNTS.len());
    let style = *seq.choice(EyeStyle::ALL);
    EyeTraits {
        count: EYE_COUNTS[index],
        style,
        descriptor: tables.eye_descriptors[index].clone(),
    }
}

// 抽取 7-10
pub(crate) fn draw_features(seq: &mut SeededSequence) -> CranialFeatures {
    let has_spikes = seq.chance_above(FEATURE_THRESHOLD);
    let has_horns = seq.chance_above(FEATURE_THRESHOLD);
    let has_antennae = seq.chance_above(FEATURE_THRESHOLD);
    let has_crest = seq.chance_above(FEATURE_THRESHOLD);
    CranialFeatures {
        has_spikes,
        has_horns,
        has_antennae,
        has_crest,
    }
}

// 抽取 11
pub(crate) fn draw_pattern(seq: &mut SeededSequence) -> SurfacePattern {
    *seq.choice(SurfacePattern::ALL)
}

// 抽取 18
pub(crate) fn draw_temperament(seq: &mut SeededSequence, tables: &GenerationTables) -> String {
    let last = tables.temperaments.len() as i64 - 1;
    tables.temperaments[seq.next_int(0, last) as usize].clone()
}

/// Stats from digit pairs 0-1 through 8-9.
pub fn compute_stats(barcode: &Barcode, temperament: String) -> CreatureStats {
    let digits = barcode.digits();
    CreatureStats {
        vitality: VITALITY.apply(digits),
        mobility: MOBILITY.apply(digits),
        awareness: AWARENESS.apply(digits),
        defense: DEFENSE.apply(digits),
        adaptability: ADAPTABILITY.apply(digits),
        temperament,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature_engine::tables::DEFAULT_TABLES;

    #[test]
    fn test_feature_precedence() {
        let mut features = CranialFeatures::default();
        assert_eq!(features.descriptor(), "Plain");

        features.has_crest = true;
        assert_eq!(features.descriptor(), "Crested");
        features.has_antennae = true;
        assert_eq!(features.descriptor(), "Antennae");
        features.has_horns = true;
        assert_eq!(features.descriptor(), "Horned");
        features.has_spikes = true;
        assert_eq!(features.descriptor(), "Spiked");
    }

    #[test]
    fn test_stats_formulas() {
        let barcode = Barcode::parse("123456789012").unwrap();
        let stats = compute_stats(&barcode, "Calm".to_string());
        assert_eq!(stats.vitality, 30 + 4 * (1 + 2));
        assert_eq!(stats.mobility, 25 + 4 * (3 + 4));
        assert_eq!(stats.awareness, 20 + 4 * (5 + 6));
        assert_eq!(stats.defense, 35 + 3 * (7 + 8));
        assert_eq!(stats.adaptability, 30 + 3 * (9 + 0));
    }

    #[test]
    fn test_stat_ranges() {
        assert_eq!(VITALITY.range(), (30, 102));
        assert_eq!(MOBILITY.range(), (25, 97));
        assert_eq!(AWARENESS.range(), (20, 92));
        assert_eq!(DEFENSE.range(), (35, 89));
        assert_eq!(ADAPTABILITY.range(), (30, 84));
    }

    #[test]
    fn test_descriptor_follows_count_position() {
        for seed in 0..200u64 {
            let mut seq = SeededSequence::new(seed * 7919);
            let limbs = draw_limbs(&mut seq, &DEFAULT_TABLES);
            let eyes = draw_eyes(&mut seq, &DEFAULT_TABLES);

            let limb_pos = LIMB_COUNTS.iter().position(|&c| c == limbs.count).unwrap();
            assert_eq!(DEFAULT_TABLES.limb_descriptors[limb_pos], limbs.descriptor);

            let eye_pos = EYE_COUNTS.iter().position(|&c| c == eyes.count).unwrap();
            assert_eq!(DEFAULT_TABLES.eye_descriptors[eye_pos], eyes.descriptor);
        }
    }

    #[test]
    fn test_each_group_consumes_fixed_draws() {
        let mut seq = SeededSequence::new(555);
        draw_body(&mut seq, &DEFAULT_TABLES);
        assert_eq!(seq.draws(), 2);
        draw_limbs(&mut seq, &DEFAULT_TABLES);
        draw_eyes(&mut seq, &DEFAULT_TABLES);
        assert_eq!(seq.draws(), 6);
        draw_features(&mut seq);
        assert_eq!(seq.draws(), 10);
        draw_pattern(&mut seq);
        draw_temperament(&mut seq, &DEFAULT_TABLES);
        assert_eq!(seq.draws(), 12);
    }

    #[test]
    fn test_labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&BodyType::Octagon).unwrap(), "\"octagon\"");
        assert_eq!(serde_json::to_string(&LimbType::Tentacle).unwrap(), "\"tentacle\"");
        assert_eq!(BodyType::ALL.len(), 7);
        assert_eq!(SurfacePattern::ALL.len(), 4);
    }
}
