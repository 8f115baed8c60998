//! データディレクトリの解決
//!
//! 優先順位: LISTA_DATA_DIR 環境変数 → OS標準のデータディレクトリ →
//! カレントディレクトリ配下の `.lista`

use crate::error::storage::Result;
use crate::error::StorageError;
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "LISTA_DATA_DIR";
const APP_DIR_NAME: &str = "lista";

/// 既定のデータディレクトリを解決する
pub fn resolve_data_dir() -> Result<PathBuf> {
    resolve_from(std::env::var(DATA_DIR_ENV).ok().as_deref())
}

/// 環境変数値を引数に取る解決本体（テスト可能にするため分離）
pub fn resolve_from(override_dir: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        if dir.trim().is_empty() {
            return Err(StorageError::InvalidPath {
                path: dir.to_string(),
            });
        }
        // チルダ・環境変数を展開
        let expanded = shellexpand::full(dir).map_err(|e| StorageError::InvalidPath {
            path: format!("{}: {}", dir, e),
        })?;
        return Ok(PathBuf::from(expanded.as_ref()));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(APP_DIR_NAME));
    }

    Ok(PathBuf::from(format!(".{}", APP_DIR_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_takes_precedence() {
        let dir = resolve_from(Some("/tmp/lista-test")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/lista-test"));
    }

    #[test]
    fn override_expands_tilde() {
        let dir = resolve_from(Some("~/lista-data")).unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.to_string_lossy().ends_with("lista-data"));
    }

    #[test]
    fn blank_override_is_rejected() {
        assert!(matches!(
            resolve_from(Some("  ")),
            Err(StorageError::InvalidPath { .. })
        ));
    }

    #[test]
    fn default_resolution_yields_app_directory() {
        let dir = resolve_from(None).unwrap();
        let text = dir.to_string_lossy();
        assert!(text.contains(APP_DIR_NAME), "unexpected path: {}", text);
    }
}
