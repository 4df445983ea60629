// Naming: binomial scientific name from two pool draws, common name from
// already-chosen descriptors.

use crate::utils::SeededSequence;
use super::tables::GenerationTables;
use super::trait_system::CranialFeatures;

/// Eye descriptors only appear in the common name above this count.
pub const COMMON_NAME_EYE_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binomial {
    pub genus: String,
    pub species: String,
}

impl Binomial {
    pub fn scientific_name(&self) -> String {
        format!("{} {}", self.genus, self.species)
    }
}

/// Draws 16-17.
pub(crate) fn draw_binomial(seq: &mut SeededSequence, tables: &GenerationTables) -> Binomial {
    let genus = seq.choice(&tables.genus_names).clone();
    let species = seq.choice(&tables.species_names).clone();
    Binomial { genus, species }
}

/// `[eye descriptor] [feature descriptor] body descriptor`, omitting the eye
/// part for two or fewer eyes and the feature part when plain.
pub fn compose_common_name(
    eye_count: u8,
    eye_descriptor: &str,
    features: &CranialFeatures,
    body_descriptor: &str,
) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if eye_count > COMMON_NAME_EYE_THRESHOLD {
        parts.push(eye_descriptor);
    }
    let feature = features.descriptor();
    if feature != CranialFeatures::PLAIN {
        parts.push(feature);
    }
    parts.push(body_descriptor);
    parts.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature_engine::tables::DEFAULT_TABLES;

    #[test]
    fn test_plain_two_eyed_creature_uses_body_only() {
        let name = compose_common_name(2, "Binocular", &CranialFeatures::default(), "Spheroid");
        assert_eq!(name, "Spheroid");
    }

    #[test]
    fn test_full_common_name() {
        let features = CranialFeatures {
            has_horns: true,
            has_crest: true,
            ..Default::default()
        };
        let name = compose_common_name(5, "Multi-Ocular", &features, "Segmented");
        assert_eq!(name, "Multi-Ocular Horned Segmented");
    }

    #[test]
    fn test_feature_without_eyes() {
        let features = CranialFeatures {
            has_antennae: true,
            ..Default::default()
        };
        assert_eq!(compose_common_name(0, "Eyeless", &features, "Cuboid"), "Antennae Cuboid");
    }

    #[test]
    fn test_binomial_draws_from_pools() {
        let mut seq = SeededSequence::new(31_337);
        let binomial = draw_binomial(&mut seq, &DEFAULT_TABLES);
        assert!(DEFAULT_TABLES.genus_names.contains(&binomial.genus));
        assert!(DEFAULT_TABLES.species_names.contains(&binomial.species));
        assert_eq!(
            binomial.scientific_name(),
            format!("{} {}", binomial.genus, binomial.species)
        );
        assert_eq!(seq.draws(), 2);
    }
}
