//! 絞り込み述語
//!
//! 表示層専用の判定。リスト本体や永続化状態には一切影響しない

/// アイテムがクエリに一致するか（前方一致、大文字小文字無視）
///
/// 空クエリは常に一致
pub fn matches_query(item: &str, query: &str) -> bool {
    item.trim()
        .to_lowercase()
        .starts_with(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_ignores_case() {
        assert!(matches_query("Apple", "ap"));
        assert!(matches_query("Apricot", "AP"));
        assert!(!matches_query("Banana", "ap"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_query("Apple", ""));
        assert!(matches_query("", ""));
    }

    #[test]
    fn item_whitespace_is_ignored() {
        assert!(matches_query("  Apple ", "app"));
    }
}
