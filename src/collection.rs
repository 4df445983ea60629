/*
* 收藏管理：
* 1. 存储接口只追加来源物品和捕获时间，生成字段原样保存
* 2. 已收藏的条码直接返回已有记录，否则生成并保存
* 3. 导入外部数据时逐条与条码重新推导的结果比对
* 4. 浏览时支持按稀有度过滤，按稀有度、学名或捕获时间排序
*/

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{CreatureError, Result};
use crate::creature_engine::{Barcode, CreatureEngine, CreatureRecord, Rarity};

/// A generated record plus the fields a collection appends to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedCreature {
    #[serde(flatten)]
    pub record: CreatureRecord,
    #[serde(default)]
    pub source_item: String,
    pub captured_at: DateTime<Utc>,
}

impl CollectedCreature {
    pub fn new(record: CreatureRecord, source_item: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            record,
            source_item: source_item.into(),
            captured_at,
        }
    }

    pub fn barcode(&self) -> &Barcode {
        &self.record.id
    }
}

// 存储接口
pub trait CreatureStore {
    fn get(&self, barcode: &Barcode) -> Result<Option<CollectedCreature>>;
    /// Inserts or replaces the entry keyed by its barcode.
    fn put(&mut self, entry: CollectedCreature) -> Result<()>;
    fn update_source(&mut self, barcode: &Barcode, source_item: &str) -> Result<()>;
    fn list(&self) -> Result<Vec<CollectedCreature>>;
    fn count(&self) -> Result<usize>;
}

/// Insertion-ordered store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, CollectedCreature>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CreatureStore for MemoryStore {
    fn get(&self, barcode: &Barcode) -> Result<Option<CollectedCreature>> {
        Ok(self.entries.get(barcode.as_str()).cloned())
    }

    fn put(&mut self, entry: CollectedCreature) -> Result<()> {
        self.entries.insert(entry.barcode().to_string(), entry);
        Ok(())
    }

    fn update_source(&mut self, barcode: &Barcode, source_item: &str) -> Result<()> {
        let entry = self.entries.get_mut(barcode.as_str()).ok_or_else(|| {
            crate::creature_error!(StorageError, "{} is not in the collection", barcode)
        })?;
        entry.source_item = source_item.to_string();
        Ok(())
    }

    fn list(&self) -> Result<Vec<CollectedCreature>> {
        Ok(self.entries.values().cloned().collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.entries.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent capture first.
    #[default]
    Recent,
    /// Scientific name, ascending.
    Name,
    /// Mythic first.
    Rarity,
}

impl FromStr for SortOrder {
    type Err = CreatureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(SortOrder::Recent),
            "name" => Ok(SortOrder::Name),
            "rarity" => Ok(SortOrder::Rarity),
            other => Err(CreatureError::Parse(format!("unknown sort order {:?}", other))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Recent => "recent",
            SortOrder::Name => "name",
            SortOrder::Rarity => "rarity",
        };
        f.write_str(name)
    }
}

pub fn sort_entries(entries: &mut [CollectedCreature], order: SortOrder) {
    match order {
        SortOrder::Recent => entries.sort_by(|a, b| b.captured_at.cmp(&a.captured_at)),
        SortOrder::Name => entries.sort_by(|a, b| a.record.scientific_name.cmp(&b.record.scientific_name)),
        SortOrder::Rarity => entries.sort_by(|a, b| b.record.rarity.cmp(&a.record.rarity)),
    }
}

/// Outcome of a capture attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    New(CollectedCreature),
    AlreadyCollected(CollectedCreature),
}

impl Capture {
    pub fn entry(&self) -> &CollectedCreature {
        match self {
            Capture::New(entry) | Capture::AlreadyCollected(entry) => entry,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Capture::New(_))
    }
}

pub struct Collection<S: CreatureStore> {
    engine: CreatureEngine,
    store: S,
}

impl<S: CreatureStore> Collection<S> {
    pub fn new(engine: CreatureEngine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn capture(&mut self, barcode: &Barcode, source_item: &str) -> Result<Capture> {
        self.capture_at(barcode, source_item, Utc::now())
    }

    /// Returns the stored entry when present; otherwise generates, stores and
    /// returns a new one stamped with `at`.
    pub fn capture_at(&mut self, barcode: &Barcode, source_item: &str, at: DateTime<Utc>) -> Result<Capture> {
        if let Some(existing) = self.store.get(barcode)? {
            debug!("{} already collected as {}", barcode, existing.record.scientific_name);
            return Ok(Capture::AlreadyCollected(existing));
        }

        let record = self.engine.generate(barcode);
        let entry = CollectedCreature::new(record, source_item, at);
        self.store.put(entry.clone())?;
        info!(
            "captured {} {} [{}]",
            barcode, entry.record.scientific_name, entry.record.rarity
        );
        Ok(Capture::New(entry))
    }

    pub fn update_source(&mut self, barcode: &Barcode, source_item: &str) -> Result<()> {
        self.store.update_source(barcode, source_item)
    }

    pub fn count(&self) -> Result<usize> {
        self.store.count()
    }

    pub fn browse(&self, rarity: Option<Rarity>, order: SortOrder) -> Result<Vec<CollectedCreature>> {
        let mut entries: Vec<_> = self
            .store
            .list()?
            .into_iter()
            .filter(|entry| rarity.map_or(true, |r| entry.record.rarity == r))
            .collect();
        sort_entries(&mut entries, order);
        Ok(entries)
    }

    pub fn rarity_counts(&self) -> Result<BTreeMap<Rarity, usize>> {
        let mut counts = BTreeMap::new();
        for entry in self.store.list()? {
            *counts.entry(entry.record.rarity).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// JSON object keyed by barcode, in store order.
    pub fn export_json(&self) -> Result<String> {
        let entries: IndexMap<String, CollectedCreature> = self
            .store
            .list()?
            .into_iter()
            .map(|entry| (entry.barcode().to_string(), entry))
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Imports an exported collection. Every record must match a fresh
    /// derivation from its barcode; nothing is stored if any entry fails.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let entries: IndexMap<String, CollectedCreature> = serde_json::from_str(json)?;
        let validator = self.engine.validator();

        for (key, entry) in &entries {
            if key != entry.barcode().as_str() {
                return Err(CreatureError::RecordMismatch {
                    barcode: key.clone(),
                    field: "id".to_string(),
                });
            }
            validator.verify(&entry.record)?;
        }

        let imported = entries.len();
        for (_, entry) in entries {
            self.store.put(entry)?;
        }
        info!("imported {} creatures", imported);
        Ok(imported)
    }
}
