/// 词对输入规范化模块
/// 提供大小写/空白/Unicode 不敏感的比较键，供去重和导入合并共用。
use unicode_normalization::UnicodeNormalization;

/// 去重键分隔符：单元分隔控制符，正常输入中不会出现
const PAIR_KEY_DELIMITER: char = '\u{1F}';

/// 规范化单侧文本：去首尾空白、小写、NFKC 归一化
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase().nfkc().collect()
}

/// 计算词对的去重键（Дом/EV 与 дом/ev 同键）
pub fn pair_key(native: &str, target: &str) -> String {
    format!(
        "{}{}{}",
        normalize_text(native),
        PAIR_KEY_DELIMITER,
        normalize_text(target)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_text("  Дом  "), "дом");
        assert_eq!(normalize_text("EV"), "ev");
    }

    #[test]
    fn normalize_applies_nfkc() {
        // U+FB01 LATIN SMALL LIGATURE FI folds to "fi" under NFKC
        assert_eq!(normalize_text("ﬁre"), "fire");
    }

    #[test]
    fn pair_key_is_case_insensitive() {
        assert_eq!(pair_key("Дом", "EV"), pair_key("дом", "ev"));
    }

    #[test]
    fn pair_key_distinguishes_sides() {
        assert_ne!(pair_key("a", "b"), pair_key("b", "a"));
    }

    #[test]
    fn pair_key_delimiter_prevents_collisions() {
        assert_ne!(pair_key("ab", "c"), pair_key("a", "bc"));
    }
}
