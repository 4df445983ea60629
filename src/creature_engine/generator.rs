/*
 * Barcode Creatures - Creature Generator
 * 生成流程：种子 -> 稀有度 -> 特征抽取 -> 命名 -> 调色板
 * 序列生成器只存在于一次 generate 调用内部，记录类型中没有任何随机状态
 * 抽取顺序是兼容性契约，调整顺序会改变同一条码的全部后续特征
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::utils::SeededSequence;
use super::barcode::Barcode;
use super::naming::{compose_common_name, draw_binomial};
use super::palette::{draw_palette, CreatureColors};
use super::rarity_system::{classify, Rarity};
use super::tables::GenerationTables;
use super::trait_system::{
    compute_stats, draw_body, draw_eyes, draw_features, draw_limbs, draw_pattern, draw_temperament,
    BodyType, CranialFeatures, CreatureStats, EyeStyle, LimbType, SurfacePattern,
};

/// Total draws one generation consumes.
pub const DRAWS_PER_CREATURE: u64 = 18;

/// Immutable creature derived from an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub id: Barcode,
    pub scientific_name: String,
    pub common_name: String,
    pub rarity: Rarity,
    pub body_type: BodyType,
    pub body_descriptor: String,
    pub limb_count: u8,
    pub limb_type: LimbType,
    pub limb_descriptor: String,
    pub eye_count: u8,
    pub eye_style: EyeStyle,
    pub eye_descriptor: String,
    #[serde(flatten)]
    pub features: CranialFeatures,
    pub feature_descriptor: String,
    pub pattern: SurfacePattern,
    pub colors: CreatureColors,
    pub stats: CreatureStats,
}

/// Fresh sequence for an identifier; the renderer builds its own from the
/// same seed to replay spot positions.
pub fn sequence_for(barcode: &Barcode) -> SeededSequence {
    SeededSequence::new(barcode.seed())
}

#[derive(Debug, Clone, Copy)]
pub struct CreatureGenerator<'t> {
    tables: &'t GenerationTables,
}

impl<'t> CreatureGenerator<'t> {
    /// `tables` must already be validated; outside the crate generators come
    /// from `CreatureEngine`.
    pub(crate) fn new(tables: &'t GenerationTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t GenerationTables {
        self.tables
    }

    pub fn generate(&self, barcode: &Barcode) -> CreatureRecord {
        let rarity = classify(barcode);
        let mut seq = sequence_for(barcode);

        let body = draw_body(&mut seq, self.tables);
        let limbs = draw_limbs(&mut seq, self.tables);
        let eyes = draw_eyes(&mut seq, self.tables);
        let features = draw_features(&mut seq);
        let pattern = draw_pattern(&mut seq);
        let palette = draw_palette(&mut seq, self.tables);
        let binomial = draw_binomial(&mut seq, self.tables);
        let temperament = draw_temperament(&mut seq, self.tables);
        debug_assert_eq!(seq.draws(), DRAWS_PER_CREATURE);

        let common_name = compose_common_name(eyes.count, &eyes.descriptor, &features, &body.descriptor);
        let stats = compute_stats(barcode, temperament);

        debug!(
            "generated {} -> {} [{}] palette={}",
            barcode,
            binomial.scientific_name(),
            rarity,
            palette.key
        );

        CreatureRecord {
            id: barcode.clone(),
            scientific_name: binomial.scientific_name(),
            common_name,
            rarity,
            body_type: body.body_type,
            body_descriptor: body.descriptor,
            limb_count: limbs.count,
            limb_type: limbs.limb_type,
            limb_descriptor: limbs.descriptor,
            eye_count: eyes.count,
            eye_style: eyes.style,
            eye_descriptor: eyes.descriptor,
            feature_descriptor: features.descriptor().to_string(),
            features,
            pattern,
            colors: palette.colors,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature_engine::palette::HslColor;
    use crate::creature_engine::tables::DEFAULT_TABLES;
    use crate::creature_engine::trait_system::{
        ADAPTABILITY, AWARENESS, DEFENSE, EYE_COUNTS, LIMB_COUNTS, MOBILITY, VITALITY,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn generate(code: &str) -> CreatureRecord {
        CreatureGenerator::new(&DEFAULT_TABLES).generate(&Barcode::parse(code).unwrap())
    }

    fn random_barcodes(count: usize) -> Vec<Barcode> {
        let mut rng = ChaCha8Rng::seed_from_u64(0x00C0_FFEE);
        (0..count)
            .map(|_| {
                let code: String = (0..12).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
                Barcode::parse(&code).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = CreatureGenerator::new(&DEFAULT_TABLES);
        for barcode in random_barcodes(200) {
            assert_eq!(generator.generate(&barcode), generator.generate(&barcode));
        }
    }

    #[test]
    fn test_known_rarities() {
        assert_eq!(generate("000000000000").rarity, Rarity::Mythic);
        assert_eq!(generate("012345678901").rarity, Rarity::Epic);
    }

    #[test]
    fn test_reference_creature() {
        let record = generate("012345678901");
        assert_eq!(record.scientific_name, "Fractus striatus");
        assert_eq!(record.common_name, "Tri-Ocular Spiked Pyramidal");
        assert_eq!(record.body_type, BodyType::Square);
        assert_eq!(record.body_descriptor, "Pyramidal");
        assert_eq!(record.limb_count, 6);
        assert_eq!(record.limb_type, LimbType::Fin);
        assert_eq!(record.limb_descriptor, "Hexa-Limbed");
        assert_eq!(record.eye_count, 3);
        assert_eq!(record.eye_style, EyeStyle::Compound);
        assert_eq!(record.eye_descriptor, "Tri-Ocular");
        assert_eq!(
            record.features,
            CranialFeatures {
                has_spikes: true,
                has_horns: true,
                has_antennae: true,
                has_crest: false,
            }
        );
        assert_eq!(record.feature_descriptor, "Spiked");
        assert_eq!(record.pattern, SurfacePattern::Geometric);
        assert_eq!(record.colors.palette_name, "Oceanic");
        assert_eq!(record.colors.primary, HslColor::new(202, 70, 55));
        assert_eq!(record.colors.secondary, HslColor::new(278, 70, 65));
        assert_eq!(record.colors.accent, HslColor::new(163, 70, 50));
        assert_eq!(record.stats.vitality, 34);
        assert_eq!(record.stats.mobility, 45);
        assert_eq!(record.stats.awareness, 56);
        assert_eq!(record.stats.defense, 74);
        assert_eq!(record.stats.adaptability, 81);
        assert_eq!(record.stats.temperament, "Aggressive");
    }

    #[test]
    fn test_all_zero_creature() {
        let record = generate("000000000000");
        assert_eq!(record.scientific_name, "Torius medius");
        assert_eq!(record.common_name, "Quad-Ocular Horned Prismatic");
        assert_eq!(record.limb_type, LimbType::Wing);
        assert_eq!(record.colors.palette_name, "Toxic");
        assert_eq!(record.colors.primary.to_string(), "hsl(306, 70%, 55%)");
        assert_eq!(record.stats.vitality, 30);
        assert_eq!(record.stats.temperament, "Docile");
    }

    #[test]
    fn test_descriptor_alignment() {
        for barcode in random_barcodes(300) {
            let record = CreatureGenerator::new(&DEFAULT_TABLES).generate(&barcode);

            let limb_pos = LIMB_COUNTS.iter().position(|&c| c == record.limb_count).unwrap();
            let limb_desc_pos = DEFAULT_TABLES
                .limb_descriptors
                .iter()
                .position(|d| *d == record.limb_descriptor)
                .unwrap();
            assert_eq!(limb_pos, limb_desc_pos);

            let eye_pos = EYE_COUNTS.iter().position(|&c| c == record.eye_count).unwrap();
            let eye_desc_pos = DEFAULT_TABLES
                .eye_descriptors
                .iter()
                .position(|d| *d == record.eye_descriptor)
                .unwrap();
            assert_eq!(eye_pos, eye_desc_pos);
        }
    }

    #[test]
    fn test_stat_bounds() {
        for barcode in random_barcodes(300) {
            let stats = CreatureGenerator::new(&DEFAULT_TABLES).generate(&barcode).stats;
            for (value, formula) in [
                (stats.vitality, VITALITY),
                (stats.mobility, MOBILITY),
                (stats.awareness, AWARENESS),
                (stats.defense, DEFENSE),
                (stats.adaptability, ADAPTABILITY),
            ] {
                let (lo, hi) = formula.range();
                assert!((lo..=hi).contains(&value), "{} outside [{}, {}]", value, lo, hi);
            }
            assert!(DEFAULT_TABLES.temperaments.contains(&stats.temperament));
        }
    }

    #[test]
    fn test_rarity_ignores_sequence() {
        // 同样的前十位（同一序列），不同的后两位
        let a = generate("112233445566");
        let b = generate("112233445599");
        assert_eq!(a.scientific_name, b.scientific_name);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.rarity, Rarity::Epic);
        assert_eq!(b.rarity, Rarity::Rare);
    }

    #[test]
    fn test_json_round_trip_then_regenerate() {
        let generator = CreatureGenerator::new(&DEFAULT_TABLES);
        for barcode in random_barcodes(50) {
            let record = generator.generate(&barcode);
            let json = serde_json::to_string(&record).unwrap();
            let restored: CreatureRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, record);
            assert_eq!(generator.generate(&restored.id), record);
        }
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(generate("012345678901")).unwrap();
        assert_eq!(value["id"], "012345678901");
        assert_eq!(value["rarity"], "Epic");
        assert_eq!(value["bodyType"], "square");
        assert_eq!(value["hasSpikes"], true);
        assert_eq!(value["colors"]["paletteName"], "Oceanic");
        assert_eq!(value["stats"]["temperament"], "Aggressive");
        assert!(value.get("features").is_none());
        // 序列状态只在生成过程中存在
        assert!(value.get("seed").is_none());
        assert!(value.get("draws").is_none());
    }
}
