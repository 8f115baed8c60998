//! 永続化バックエンドモジュール
//!
//! リスト本体からは get/set/delete を備えた文字列キーバリューストアとして
//! 扱う。本番はファイルベース、テストはインメモリ実装を使用する

pub mod file;
pub mod memory;
pub mod path;

// 基本公開API
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use path::resolve_data_dir;

use crate::error::storage::Result;

/// リスト全体を保持する名前空間キー
pub const ITEMS_KEY: &str = "items";

/// 文字列キーバリューストアの契約
///
/// 値の耐久性・容量制限はバックエンド実装側の責務
pub trait StorageBackend {
    /// キーに対応する値を取得。未登録なら None
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// キーに値を保存（上書き）
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// キーを削除。未登録でもエラーにしない
    fn delete(&mut self, key: &str) -> Result<()>;
}
