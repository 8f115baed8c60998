//! アイテムストア
//!
//! メモリ上のリストと永続化表現を常に一致させる状態ストア。
//! 変更のたびにリスト全体をJSONスナップショットとして書き出す。
//! コミット順序は「永続化してからメモリ反映」: 書き込みに失敗した操作は
//! メモリ上のリストを変更しないまま失敗する

use crate::error::{Result, StorageError};
use crate::item::ItemList;
use crate::storage::{StorageBackend, ITEMS_KEY};
use serde::{Deserialize, Serialize};

/// 永続化スナップショット（ワイヤ表現は素のJSON配列）
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
struct Snapshot(Vec<String>);

impl Snapshot {
    fn encode(items: &[String]) -> std::result::Result<String, StorageError> {
        serde_json::to_string(&Snapshot(items.to_vec())).map_err(|e| StorageError::Malformed {
            message: e.to_string(),
        })
    }

    fn decode(raw: &str) -> std::result::Result<Vec<String>, StorageError> {
        serde_json::from_str::<Snapshot>(raw)
            .map(|snapshot| snapshot.0)
            .map_err(|e| StorageError::Malformed {
                message: e.to_string(),
            })
    }
}

/// リスト状態と永続化の同期を担うストア
pub struct ItemStore {
    list: ItemList,
    backend: Box<dyn StorageBackend>,
}

impl ItemStore {
    /// 永続化表現を読み込んでストアを開く
    ///
    /// キー未登録なら空リスト。壊れたJSONは空リストへフォールバックせず
    /// エラーとして伝播する
    pub fn open(backend: Box<dyn StorageBackend>) -> Result<Self> {
        let list = match backend.get(ITEMS_KEY)? {
            None => ItemList::new(),
            Some(raw) => ItemList::from_items(Snapshot::decode(&raw)?),
        };
        log::debug!("item store opened with {} items", list.len());
        Ok(Self { list, backend })
    }

    /// 末尾に追加して永続化
    ///
    /// 事前条件: 呼び出し側で空文字・重複を検証済み
    pub fn add(&mut self, item: &str) -> Result<()> {
        let mut candidate = ItemList::from_items(self.list.items().to_vec());
        candidate.push(item.to_string());
        self.persist(candidate.items())?;
        self.list = candidate;
        Ok(())
    }

    /// 完全一致する最初のアイテムを削除して永続化
    ///
    /// 一致がなければ何もせず false を返す
    pub fn remove(&mut self, item: &str) -> Result<bool> {
        let mut candidate = ItemList::from_items(self.list.items().to_vec());
        if !candidate.remove_exact(item) {
            return Ok(false);
        }
        self.persist(candidate.items())?;
        self.list = candidate;
        Ok(true)
    }

    /// 全削除。永続化キーも削除する
    pub fn clear(&mut self) -> Result<()> {
        self.backend.delete(ITEMS_KEY)?;
        self.list = ItemList::new();
        Ok(())
    }

    /// 大文字小文字・前後空白を無視した存在判定
    pub fn contains_ignore_case(&self, text: &str) -> bool {
        self.list.contains_ignore_case(text)
    }

    pub fn items(&self) -> &[String] {
        self.list.items()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    fn persist(&mut self, items: &[String]) -> Result<()> {
        let payload = Snapshot::encode(items)?;
        self.backend.set(ITEMS_KEY, &payload)?;
        log::debug!("persisted {} items", items.len());
        Ok(())
    }
}
