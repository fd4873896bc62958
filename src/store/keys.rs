//! 固定存储键：整个词表作为一份 JSON 文档整存整取，方向设置单独一键。

/// entries 树下的词表文档键
pub const ENTRIES_KEY: &str = "entries";

/// settings 树下的练习方向键
pub const DIRECTION_KEY: &str = "direction";

pub mod trees {
    pub const ENTRIES: &str = "entries";
    pub const SETTINGS: &str = "settings";
}
