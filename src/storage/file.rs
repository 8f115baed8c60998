//! ファイルベースの永続化バックエンド
//!
//! キーごとに1ファイル（`<データディレクトリ>/<キー>.json`）を割り当てる。
//! 書き込みはミューテーションと同期して行われる前提のため、
//! バッファリングや遅延書き込みは行わない

use crate::error::storage::Result;
use crate::error::StorageError;
use crate::storage::{path::resolve_data_dir, StorageBackend};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// ファイルベースのキーバリューストア
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// 指定ディレクトリ配下にストアを開く（なければ作成）
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| StorageError::Io {
            message: format!("{}: {}", base_dir.display(), e),
        })?;
        Ok(Self { base_dir })
    }

    /// 既定のデータディレクトリでストアを開く
    pub fn open_default() -> Result<Self> {
        Self::new(resolve_data_dir()?)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                log::debug!("read {} bytes from {}", value.len(), path.display());
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                message: format!("{}: {}", path.display(), e),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| StorageError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io {
                message: format!("{}: {}", path.display(), e),
            }),
        }
    }
}
