//! ビューモデル
//!
//! コントローラ状態から描画に必要な情報だけを借用する

use crate::error::NoticeLevel;
use crate::item::matches_query;

/// フォーカス対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// アイテム入力行
    Input,
    /// 絞り込み入力行
    Filter,
    /// アイテムリスト
    List,
}

/// クエリに一致する（= 表示される）アイテムのインデックス列
pub fn visible_indices(items: &[String], query: &str) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_query(item, query))
        .map(|(index, _)| index)
        .collect()
}

/// 1フレーム分の描画入力
#[derive(Debug)]
pub struct ViewSnapshot<'a> {
    /// ストア上の全アイテム
    pub items: &'a [String],
    /// 絞り込みクエリ
    pub query: &'a str,
    /// 入力行のテキスト
    pub input: &'a str,
    /// 入力行のカーソル位置（文字単位）
    pub input_cursor: usize,
    /// 絞り込み行のカーソル位置（文字単位）
    pub filter_cursor: usize,
    /// 編集モードかどうか
    pub editing: bool,
    /// 編集対象のアイテムテキスト
    pub selected: Option<&'a str>,
    /// 表示リスト上のハイライト位置
    pub highlight: usize,
    /// フォーカス対象
    pub focus: FocusTarget,
    /// 表示中の通知
    pub notice: Option<(&'a str, NoticeLevel)>,
}

impl ViewSnapshot<'_> {
    /// 表示されるアイテムのインデックス列
    pub fn visible_indices(&self) -> Vec<usize> {
        visible_indices(self.items, self.query)
    }

    /// 絞り込み行と全削除の操作を表示するか
    ///
    /// リストが空の間は両方とも非表示
    pub fn controls_visible(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        vec![
            "Apple".to_string(),
            "Banana".to_string(),
            "Apricot".to_string(),
        ]
    }

    fn snapshot<'a>(items: &'a [String], query: &'a str) -> ViewSnapshot<'a> {
        ViewSnapshot {
            items,
            query,
            input: "",
            input_cursor: 0,
            filter_cursor: 0,
            editing: false,
            selected: None,
            highlight: 0,
            focus: FocusTarget::Input,
            notice: None,
        }
    }

    #[test]
    fn filter_shows_prefix_matches_only() {
        let items = items();
        let view = snapshot(&items, "ap");
        assert_eq!(view.visible_indices(), vec![0, 2]);
    }

    #[test]
    fn empty_query_shows_everything() {
        let items = items();
        let view = snapshot(&items, "");
        assert_eq!(view.visible_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn controls_hidden_while_list_is_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(!snapshot(&empty, "").controls_visible());

        let items = items();
        assert!(snapshot(&items, "").controls_visible());
    }
}
