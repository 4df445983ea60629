/*
 * Barcode Creatures - Rarity System
 * 稀有度只由条码数字的统计特征决定，不消耗随机序列
 * 规则自上而下，第一条命中即返回
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CreatureError, Result};
use super::barcode::Barcode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = CreatureError;

    fn from_str(s: &str) -> Result<Self> {
        Rarity::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CreatureError::Parse(format!("unknown rarity {:?}", s)))
    }
}

/// Digit statistics of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitStats {
    pub sum: u32,
    pub unique_count: usize,
    /// Adjacent positions with equal digits.
    pub pair_run: usize,
    /// Adjacent positions where `d[i] + 1 == d[i + 1]`.
    pub seq_run: usize,
}

impl DigitStats {
    pub fn from_digits(digits: &[u8]) -> Self {
        let sum = digits.iter().map(|&d| u32::from(d)).sum();

        let mut seen = [false; 10];
        for &d in digits {
            seen[usize::from(d)] = true;
        }
        let unique_count = seen.iter().filter(|&&s| s).count();

        let pair_run = digits.windows(2).filter(|w| w[0] == w[1]).count();
        let seq_run = digits.windows(2).filter(|w| w[0] + 1 == w[1]).count();

        Self {
            sum,
            unique_count,
            pair_run,
            seq_run,
        }
    }

    pub fn of(barcode: &Barcode) -> Self {
        Self::from_digits(barcode.digits())
    }

    pub fn rarity(&self) -> Rarity {
        if self.unique_count == 1 {
            Rarity::Mythic
        } else if self.sum > 100 || self.sum < 10 {
            Rarity::Legendary
        } else if self.seq_run >= 5 {
            Rarity::Epic
        } else if self.pair_run >= 4 {
            Rarity::Rare
        } else if self.unique_count <= 4 {
            Rarity::Uncommon
        } else {
            Rarity::Common
        }
    }
}

/// Classifies an identifier. Pure arithmetic on its digits.
pub fn classify(barcode: &Barcode) -> Rarity {
    DigitStats::of(barcode).rarity()
}
