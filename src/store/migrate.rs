//! 历史记录形状迁移：加载时将旧格式记录归一化为当前 Entry 形状。
//!
//! 旧版本用缩写字段名持久化（`ru`/`tr`/`w`/`ok`/`bad`，大小写不定），
//! 且可能缺少 id、hard 或计数字段。每个逻辑字段对应一张有序别名表，
//! 按表顺序做大小写不敏感匹配，命中即取值。归一化失败（两侧文本为空）
//! 的记录直接丢弃。

use serde_json::Value;
use uuid::Uuid;

use crate::constants::{W_MAX, W_MIN};
use crate::store::operations::entries::Entry;

/// 原生语言侧字段的有序别名表（覆盖 ru/Ru/RU/r/R 等历史写法）
pub const NATIVE_ALIASES: &[&str] = &["native", "ru", "r"];

/// 目标语言侧字段的有序别名表
pub const TARGET_ALIASES: &[&str] = &["target", "tr", "t"];

const ID_ALIASES: &[&str] = &["id"];
const HARD_ALIASES: &[&str] = &["hard"];
const WEIGHT_ALIASES: &[&str] = &["weight", "w"];
const CORRECT_ALIASES: &[&str] = &["correctCount", "ok"];
const INCORRECT_ALIASES: &[&str] = &["incorrectCount", "bad"];

/// 在对象中按别名表查字段，大小写不敏感，别名表顺序优先
fn lookup<'a>(record: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = record.as_object()?;
    for alias in aliases {
        for (key, value) in map {
            if key.eq_ignore_ascii_case(alias) {
                return Some(value);
            }
        }
    }
    None
}

fn text_field(record: &Value, aliases: &[&str]) -> String {
    match lookup(record, aliases) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// 布尔字段宽松解析：true、1、"1"、"true" 均视为真
fn bool_field(record: &Value, aliases: &[&str]) -> bool {
    match lookup(record, aliases) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

fn weight_field(record: &Value, aliases: &[&str]) -> f64 {
    let raw = match lookup(record, aliases) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(w) if w.is_finite() => w.clamp(W_MIN, W_MAX),
        _ => W_MIN,
    }
}

fn count_field(record: &Value, aliases: &[&str]) -> u32 {
    match lookup(record, aliases) {
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| v.min(u32::MAX as u64) as u32)
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

fn id_field(record: &Value) -> String {
    match lookup(record, ID_ALIASES) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        // 最早的版本用时间戳数字做 id
        Some(Value::Number(n)) => n.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// 将一条原始持久化记录归一化为 Entry。
/// 任一侧文本去空白后为空时返回 None（记录作废）。
pub fn normalize_record(record: &Value) -> Option<Entry> {
    let native = text_field(record, NATIVE_ALIASES);
    let target = text_field(record, TARGET_ALIASES);
    if native.is_empty() || target.is_empty() {
        return None;
    }

    Some(Entry {
        id: id_field(record),
        native,
        target,
        hard: bool_field(record, HARD_ALIASES),
        weight: weight_field(record, WEIGHT_ALIASES),
        correct_count: count_field(record, CORRECT_ALIASES),
        incorrect_count: count_field(record, INCORRECT_ALIASES),
    })
}
