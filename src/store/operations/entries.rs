use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::W_MIN;
use crate::store::keys;
use crate::store::migrate;
use crate::store::{Store, StoreError};
use crate::validation::pair_key;

/// 一条词对记录：原生语言文本、目标语言文本与自适应复习状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub native: String,
    pub target: String,
    pub hard: bool,
    pub weight: f64,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl Entry {
    pub fn new(native: impl Into<String>, target: impl Into<String>, hard: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            native: native.into(),
            target: target.into(),
            hard,
            weight: W_MIN,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    pub fn dedup_key(&self) -> String {
        pair_key(&self.native, &self.target)
    }
}

impl Store {
    /// 读取全部词条，顺带完成历史格式自愈迁移。
    ///
    /// 底层文档不可解析时按空词表处理而不报错；归一化若改变了任何
    /// 记录（补 id、字段改名、夹紧权重、丢弃空记录），立即把干净的
    /// 词表写回，保证后续 load 幂等且无需再归一化。
    pub fn load_entries(&self) -> Result<Vec<Entry>, StoreError> {
        let Some(raw) = self.entries.get(keys::ENTRIES_KEY.as_bytes())? else {
            return Ok(Vec::new());
        };

        let parsed: Value = match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "Persisted entries are unparseable, treating as empty");
                return Ok(Vec::new());
            }
        };
        let Some(records) = parsed.as_array() else {
            tracing::warn!("Persisted entries are not an array, treating as empty");
            return Ok(Vec::new());
        };

        let entries: Vec<Entry> = records.iter().filter_map(migrate::normalize_record).collect();

        // 自迁移：只有形状真的变了才写回
        let clean = serde_json::to_value(&entries)?;
        if clean != parsed {
            tracing::info!(
                kept = entries.len(),
                raw = records.len(),
                "Self-migrating legacy entry records"
            );
            self.save_entries(&entries)?;
        }

        Ok(entries)
    }

    /// 整表覆盖写入。调用方约定：load → 改本地副本 → save 全量。
    pub fn save_entries(&self, entries: &[Entry]) -> Result<(), StoreError> {
        self.entries
            .insert(keys::ENTRIES_KEY.as_bytes(), Self::serialize(&entries)?)?;
        self.flush()?;
        Ok(())
    }

    /// 新增词对：空文本与重复对（大小写/空白/NFKC 不敏感）均被拒绝，
    /// 新词插入表头（列表最新优先）。
    pub fn add_entry(&self, native: &str, target: &str, hard: bool) -> Result<Entry, StoreError> {
        let native = native.trim();
        let target = target.trim();
        if native.is_empty() || target.is_empty() {
            return Err(StoreError::EmptyInput);
        }

        let mut entries = self.load_entries()?;
        let key = pair_key(native, target);
        if entries.iter().any(|e| e.dedup_key() == key) {
            return Err(StoreError::DuplicateEntry);
        }

        let entry = Entry::new(native, target, hard);
        entries.insert(0, entry.clone());
        self.save_entries(&entries)?;
        tracing::debug!(id = %entry.id, "Added entry");
        Ok(entry)
    }

    /// 删除词条；id 不存在时静默成功
    pub fn delete_entry(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.load_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() != before {
            self.save_entries(&entries)?;
        }
        Ok(())
    }

    /// 翻转 hard 标记；id 不存在时静默成功
    pub fn toggle_hard(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.load_entries()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.hard = !entry.hard;
            self.save_entries(&entries)?;
        }
        Ok(())
    }

    /// 重置优先级记忆：全部权重回到 W_MIN，计数清零
    pub fn reset_all_weights(&self) -> Result<(), StoreError> {
        let mut entries = self.load_entries()?;
        for entry in &mut entries {
            entry.weight = W_MIN;
            entry.correct_count = 0;
            entry.incorrect_count = 0;
        }
        self.save_entries(&entries)?;
        Ok(())
    }

    /// 记录一次作答结果并立即持久化（不攒批，中途放弃会话也不丢状态）
    pub fn record_outcome(&self, id: &str, correct: bool) -> Result<(), StoreError> {
        let mut entries = self.load_entries()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            if correct {
                crate::engine::weights::apply_correct(entry);
            } else {
                crate::engine::weights::apply_incorrect(entry);
            }
            self.save_entries(&entries)?;
        }
        Ok(())
    }

    pub fn count_entries(&self) -> Result<usize, StoreError> {
        Ok(self.load_entries()?.len())
    }
}
