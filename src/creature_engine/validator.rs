/*
 * Barcode Creatures - Creature Validator
 * 外部存储的记录在导入时需要与条码重新推导的结果逐字段比对
 * 生成字段一旦被改动即视为契约违反
 */

use log::warn;

use crate::core::{CreatureError, Result};
use super::generator::{CreatureGenerator, CreatureRecord};
use super::trait_system::{EYE_COUNTS, LIMB_COUNTS};

#[derive(Debug, Clone, Copy)]
pub struct CreatureValidator<'t> {
    generator: CreatureGenerator<'t>,
}

impl<'t> CreatureValidator<'t> {
    pub fn new(generator: CreatureGenerator<'t>) -> Self {
        Self { generator }
    }

    /// Checks a record against a fresh derivation from its own `id`.
    pub fn verify(&self, record: &CreatureRecord) -> Result<()> {
        let expected = self.generator.generate(&record.id);
        if let Some(field) = first_difference(&expected, record) {
            warn!("record {} disagrees with its barcode on `{}`", record.id, field);
            return Err(CreatureError::RecordMismatch {
                barcode: record.id.to_string(),
                field: field.to_string(),
            });
        }
        Ok(())
    }

    /// Structural checks that hold for every generated record, without
    /// re-deriving it.
    pub fn check_invariants(&self, record: &CreatureRecord) -> Result<()> {
        let tables = self.generator.tables();
        let mismatch = |field: &str| CreatureError::RecordMismatch {
            barcode: record.id.to_string(),
            field: field.to_string(),
        };

        let limb_pos = LIMB_COUNTS
            .iter()
            .position(|&c| c == record.limb_count)
            .ok_or_else(|| mismatch("limbCount"))?;
        if tables.limb_descriptors.get(limb_pos) != Some(&record.limb_descriptor) {
            return Err(mismatch("limbDescriptor"));
        }

        let eye_pos = EYE_COUNTS
            .iter()
            .position(|&c| c == record.eye_count)
            .ok_or_else(|| mismatch("eyeCount"))?;
        if tables.eye_descriptors.get(eye_pos) != Some(&record.eye_descriptor) {
            return Err(mismatch("eyeDescriptor"));
        }

        if record.features.descriptor() != record.feature_descriptor {
            return Err(mismatch("featureDescriptor"));
        }

        Ok(())
    }
}

fn first_difference(expected: &CreatureRecord, actual: &CreatureRecord) -> Option<&'static str> {
    let checks: [(&'static str, bool); 16] = [
        ("scientificName", expected.scientific_name == actual.scientific_name),
        ("commonName", expected.common_name == actual.common_name),
        ("rarity", expected.rarity == actual.rarity),
        ("bodyType", expected.body_type == actual.body_type),
        ("bodyDescriptor", expected.body_descriptor == actual.body_descriptor),
        ("limbCount", expected.limb_count == actual.limb_count),
        ("limbType", expected.limb_type == actual.limb_type),
        ("limbDescriptor", expected.limb_descriptor == actual.limb_descriptor),
        ("eyeCount", expected.eye_count == actual.eye_count),
        ("eyeStyle", expected.eye_style == actual.eye_style),
        ("eyeDescriptor", expected.eye_descriptor == actual.eye_descriptor),
        ("features", expected.features == actual.features),
        ("featureDescriptor", expected.feature_descriptor == actual.feature_descriptor),
        ("pattern", expected.pattern == actual.pattern),
        ("colors", expected.colors == actual.colors),
        ("stats", expected.stats == actual.stats),
    ];
    checks.iter().find(|(_, same)| !same).map(|(field, _)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature_engine::barcode::Barcode;
    use crate::creature_engine::rarity_system::Rarity;
    use crate::creature_engine::tables::DEFAULT_TABLES;

    fn validator() -> CreatureValidator<'static> {
        CreatureValidator::new(CreatureGenerator::new(&DEFAULT_TABLES))
    }

    fn generated(code: &str) -> CreatureRecord {
        CreatureGenerator::new(&DEFAULT_TABLES).generate(&Barcode::parse(code).unwrap())
    }

    #[test]
    fn test_generated_record_verifies() {
        let record = generated("503918274605");
        assert!(validator().verify(&record).is_ok());
        assert!(validator().check_invariants(&record).is_ok());
    }

    #[test]
    fn test_tampered_rarity_is_reported() {
        let mut record = generated("503918274605");
        record.rarity = Rarity::Mythic;

        match validator().verify(&record) {
            Err(CreatureError::RecordMismatch { field, barcode }) => {
                assert_eq!(field, "rarity");
                assert_eq!(barcode, "503918274605");
            }
            other => panic!("Expected RecordMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_misaligned_descriptor_breaks_invariants() {
        let mut record = generated("012345678901");
        record.limb_descriptor = "Limbless".to_string();
        assert!(validator().check_invariants(&record).is_err());

        let mut record = generated("012345678901");
        record.feature_descriptor = "Plain".to_string();
        assert!(validator().check_invariants(&record).is_err());
    }
}
