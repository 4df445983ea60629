/*
 * Barcode Creatures - Identifier
 * 12位数字条码：唯一主键，也是全部生成内容的种子
 * 校验在调用方完成，生成流程只接受已经校验过的 Barcode
 */

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{CreatureError, Result};

/// Number of digits in an identifier.
pub const BARCODE_LEN: usize = 12;
/// Leading digits that form the sequence seed.
pub const SEED_DIGITS: usize = 10;

lazy_static! {
    static ref BARCODE_REGEX: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
    static ref SCAN_REGEX: Regex = Regex::new(r"^[0-9]{12,13}$").unwrap();
}

/// A validated 12-digit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode {
    code: String,
    digits: [u8; BARCODE_LEN],
}

impl Barcode {
    pub fn parse(input: &str) -> Result<Self> {
        if !BARCODE_REGEX.is_match(input) {
            return Err(CreatureError::InvalidBarcode(format!(
                "expected {} ASCII digits, got {:?}",
                BARCODE_LEN, input
            )));
        }

        let mut digits = [0u8; BARCODE_LEN];
        for (slot, byte) in digits.iter_mut().zip(input.bytes()) {
            *slot = byte - b'0';
        }

        Ok(Self {
            code: input.to_string(),
            digits,
        })
    }

    /// Accepts raw scanner output (UPC-A or EAN-13) and keeps the first
    /// twelve digits.
    pub fn from_scan(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !SCAN_REGEX.is_match(trimmed) {
            return Err(CreatureError::InvalidBarcode(format!(
                "scanner output {:?} is not 12 or 13 digits",
                raw
            )));
        }
        Self::parse(&trimmed[..BARCODE_LEN])
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn digits(&self) -> &[u8; BARCODE_LEN] {
        &self.digits
    }

    /// Integer value of the first ten digits.
    pub fn seed(&self) -> u64 {
        self.digits[..SEED_DIGITS]
            .iter()
            .fold(0u64, |acc, d| acc * 10 + u64::from(*d))
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for Barcode {
    type Err = CreatureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Barcode {
    type Error = CreatureError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Barcode> for String {
    fn from(barcode: Barcode) -> Self {
        barcode.code
    }
}
