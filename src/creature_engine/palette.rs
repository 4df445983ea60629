/*
 * Barcode Creatures - Palette Resolver
 * 调色板键 + 三次色相抽取 -> 三个具体颜色
 * 饱和度和亮度按通道固定
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{CreatureError, Result};
use crate::utils::SeededSequence;
use super::tables::{GenerationTables, HueRange, PaletteSpec};

/// Fixed (saturation, lightness) per channel, in percent.
pub const PRIMARY_SL: (u8, u8) = (70, 55);
pub const SECONDARY_SL: (u8, u8) = (70, 65);
pub const ACCENT_SL: (u8, u8) = (70, 50);

/// CSS-style `hsl(h, s%, l%)` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HslColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl HslColor {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self { hue, saturation, lightness }
    }

    /// Converts to 8-bit sRGB.
    pub fn to_rgb(&self) -> [u8; 3] {
        let h = f64::from(self.hue % 360) / 360.0;
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return [v, v, v];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |mut t: f64| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round() as u8
        };

        [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl FromStr for HslColor {
    type Err = CreatureError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || CreatureError::Parse(format!("invalid hsl colour {:?}", s));
        let inner = s
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(bad)?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(bad());
        }

        let hue = parts[0].parse::<u16>().map_err(|_| bad())?;
        let percent = |p: &str| {
            p.strip_suffix('%')
                .and_then(|v| v.parse::<u8>().ok())
                .filter(|v| *v <= 100)
                .ok_or_else(bad)
        };

        Ok(Self {
            hue,
            saturation: percent(parts[1])?,
            lightness: percent(parts[2])?,
        })
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HslColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureColors {
    pub primary: HslColor,
    pub secondary: HslColor,
    pub accent: HslColor,
    pub palette_name: String,
}

/// Palette choice plus its resolved colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub key: String,
    pub colors: CreatureColors,
}

fn draw_hue(seq: &mut SeededSequence, range: HueRange) -> u16 {
    seq.next_int(i64::from(range.min), i64::from(range.max)) as u16
}

/// Draws 12-15: palette key, then primary, secondary and accent hues.
pub(crate) fn draw_palette(seq: &mut SeededSequence, tables: &GenerationTables) -> ResolvedPalette {
    let entries: Vec<(&String, &PaletteSpec)> = tables.palettes.iter().collect();
    let (key, spec) = *seq.choice(&entries);

    let primary_hue = draw_hue(seq, spec.primary);
    let secondary_hue = draw_hue(seq, spec.secondary);
    let accent_hue = draw_hue(seq, spec.accent);

    ResolvedPalette {
        key: key.clone(),
        colors: CreatureColors {
            primary: HslColor::new(primary_hue, PRIMARY_SL.0, PRIMARY_SL.1),
            secondary: HslColor::new(secondary_hue, SECONDARY_SL.0, SECONDARY_SL.1),
            accent: HslColor::new(accent_hue, ACCENT_SL.0, ACCENT_SL.1),
            palette_name: spec.name.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature_engine::tables::DEFAULT_TABLES;

    #[test]
    fn test_hsl_display_and_parse() {
        let color = HslColor::new(205, 70, 55);
        assert_eq!(color.to_string(), "hsl(205, 70%, 55%)");
        assert_eq!("hsl(205, 70%, 55%)".parse::<HslColor>().unwrap(), color);
        assert_eq!("hsl(205,70%,55%)".parse::<HslColor>().unwrap(), color);
        assert!("rgb(1, 2, 3)".parse::<HslColor>().is_err());
        assert!("hsl(10, 170%, 5%)".parse::<HslColor>().is_err());
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(HslColor::new(0, 100, 50).to_rgb(), [255, 0, 0]);
        assert_eq!(HslColor::new(120, 100, 50).to_rgb(), [0, 255, 0]);
        assert_eq!(HslColor::new(240, 100, 50).to_rgb(), [0, 0, 255]);
        assert_eq!(HslColor::new(0, 0, 100).to_rgb(), [255, 255, 255]);
    }

    #[test]
    fn test_resolved_hues_stay_in_palette_ranges() {
        for seed in 0..300u64 {
            let mut seq = SeededSequence::new(seed * 104_729);
            let resolved = draw_palette(&mut seq, &DEFAULT_TABLES);
            let spec = &DEFAULT_TABLES.palettes[&resolved.key];

            assert_eq!(resolved.colors.palette_name, spec.name);
            assert!(spec.primary.contains(resolved.colors.primary.hue));
            assert!(spec.secondary.contains(resolved.colors.secondary.hue));
            assert!(spec.accent.contains(resolved.colors.accent.hue));
            assert_eq!((resolved.colors.accent.saturation, resolved.colors.accent.lightness), ACCENT_SL);
            assert_eq!(seq.draws(), 4);
        }
    }

    #[test]
    fn test_colors_serialize_as_strings() {
        let colors = CreatureColors {
            primary: HslColor::new(10, 70, 55),
            secondary: HslColor::new(355, 70, 65),
            accent: HslColor::new(40, 70, 50),
            palette_name: "Volcanic".to_string(),
        };
        let json = serde_json::to_value(&colors).unwrap();
        assert_eq!(json["primary"], "hsl(10, 70%, 55%)");
        assert_eq!(json["paletteName"], "Volcanic");

        let back: CreatureColors = serde_json::from_value(json).unwrap();
        assert_eq!(back, colors);
    }
}
