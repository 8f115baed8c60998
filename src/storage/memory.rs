//! インメモリバックエンド
//!
//! テストおよび永続化なし運用向けの実装

use crate::error::storage::Result;
use crate::storage::StorageBackend;
use std::collections::HashMap;

/// HashMapに保持するキーバリューストア
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を投入した状態で構築（テスト向け）
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut backend = Self::new();
        backend.entries.insert(key.into(), value.into());
        backend
    }

    /// 保持している生の値を覗く（テスト向け）
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_and_delete() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("items").unwrap(), None);

        backend.set("items", "[]").unwrap();
        assert_eq!(backend.get("items").unwrap().as_deref(), Some("[]"));

        backend.delete("items").unwrap();
        assert_eq!(backend.get("items").unwrap(), None);
    }
}
