//! アイテムリスト
//!
//! 挿入順を保持する重複なしのテキスト列。重複判定は
//! 前後空白を除いた大文字小文字無視の等価比較

/// 重複判定用の正規化（前後空白除去 + 小文字化）
fn normalized(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 挿入順を保持するアイテム列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    items: Vec<String>,
}

impl ItemList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 永続化表現から復元
    pub fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    /// 末尾に追加
    ///
    /// 重複・空文字の検証は呼び出し側（コントローラ）の責務
    pub fn push(&mut self, item: String) {
        self.items.push(item);
    }

    /// 完全一致（大文字小文字区別）する最初のアイテムを削除
    pub fn remove_exact(&mut self, item: &str) -> bool {
        match self.items.iter().position(|current| current == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// 大文字小文字・前後空白を無視した存在判定
    pub fn contains_ignore_case(&self, text: &str) -> bool {
        let needle = normalized(text);
        self.items.iter().any(|item| normalized(item) == needle)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
