//! アイテムデータモジュール
//!
//! リストの1エントリは空でないテキスト。格納は大文字小文字を保持し、
//! 重複判定のみ前後空白を除いた大文字小文字無視の比較で行う

pub mod filter;
pub mod list;

// 基本公開API
pub use filter::matches_query;
pub use list::ItemList;
