/*
 * Barcode Creatures - Creature Engine Module
 * 1. 条码 -> 稀有度 / 特征 / 命名 / 调色板 -> 不可变的生物记录
 * 2. 数据表在引擎创建时校验一次，之后生成过程不会失败
 * 3. 引擎不保存任何跨调用状态，可以在线程间共享
 */

pub mod barcode;
pub mod generator;
pub mod naming;
pub mod palette;
pub mod rarity_system;
pub mod tables;
pub mod trait_system;
pub mod validator;

pub use barcode::*;
pub use generator::*;
pub use naming::*;
pub use palette::*;
pub use rarity_system::*;
pub use tables::*;
pub use trait_system::*;
pub use validator::*;

use std::path::Path;

use log::info;

use crate::core::Result;

/// Owns a validated set of generation tables and hands out generators.
#[derive(Debug, Clone)]
pub struct CreatureEngine {
    tables: GenerationTables,
}

impl CreatureEngine {
    pub fn new(tables: GenerationTables) -> Result<Self> {
        tables.validate()?;
        info!(
            "creature engine ready: {} palettes, {} genus x {} species names",
            tables.palettes.len(),
            tables.genus_names.len(),
            tables.species_names.len()
        );
        Ok(Self { tables })
    }

    pub fn from_tables_file(path: &Path) -> Result<Self> {
        Self::new(GenerationTables::load(path)?)
    }

    pub fn tables(&self) -> &GenerationTables {
        &self.tables
    }

    pub fn generator(&self) -> CreatureGenerator<'_> {
        CreatureGenerator::new(&self.tables)
    }

    pub fn validator(&self) -> CreatureValidator<'_> {
        CreatureValidator::new(self.generator())
    }

    pub fn generate(&self, barcode: &Barcode) -> CreatureRecord {
        self.generator().generate(barcode)
    }

    /// Parses and generates in one step, for callers holding raw input.
    pub fn generate_str(&self, input: &str) -> Result<CreatureRecord> {
        let barcode = Barcode::parse(input)?;
        Ok(self.generate(&barcode))
    }
}

impl Default for CreatureEngine {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES.clone(),
        }
    }
}

/// Generates with the built-in tables.
pub fn generate(barcode: &Barcode) -> CreatureRecord {
    CreatureGenerator::new(&DEFAULT_TABLES).generate(barcode)
}
