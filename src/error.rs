//! エラーハンドリングシステム
//!
//! lista 全体で使用される統一されたエラー型とユーティリティを定義
//! 永続化エラーは呼び出し元へ伝播、入力検証エラーは通知として表示

use std::time::{Duration, Instant};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum ListaError {
    /// 永続化エラー
    #[error("Storage operation failed")]
    Storage(#[from] StorageError),

    /// 入力検証エラー
    #[error("Validation failed")]
    Validation(#[from] ValidationError),

    /// UI操作エラー
    #[error("UI operation failed")]
    Ui(#[from] UiError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// 永続化バックエンド固有のエラー
///
/// 保存データの破損は空リストへ黙ってフォールバックせず、
/// 読み込み操作のエラーとしてそのまま伝播させる
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Malformed stored data: {message}")]
    Malformed { message: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

/// 入力検証固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Empty input")]
    Empty,

    #[error("Duplicate item: {text}")]
    Duplicate { text: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Terminal operation failed: {context}: {message}")]
    Terminal { context: String, message: String },
}

/// 通知レベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// 画面下部に表示する通知
///
/// 表示は5秒で期限切れとなる
#[derive(Debug, Clone)]
pub struct Notice {
    /// 通知メッセージ
    pub message: String,
    /// 通知レベル
    pub level: NoticeLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl Notice {
    const DISPLAY_DURATION: Duration = Duration::from_secs(5);

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
            start_time: Instant::now(),
            duration: Self::DISPLAY_DURATION,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Warning,
            start_time: Instant::now(),
            duration: Self::DISPLAY_DURATION,
        }
    }

    /// エラーからユーザー向け通知を生成
    pub fn from_error(error: &ListaError) -> Self {
        let (message, level) = Self::format_error(error);
        Self {
            message,
            level,
            start_time: Instant::now(),
            duration: Self::DISPLAY_DURATION,
        }
    }

    fn format_error(error: &ListaError) -> (String, NoticeLevel) {
        match error {
            ListaError::Validation(ValidationError::Empty) => {
                ("アイテムを入力してください".to_string(), NoticeLevel::Warning)
            }
            ListaError::Validation(ValidationError::Duplicate { text }) => {
                (format!("既に登録されています: {}", text), NoticeLevel::Warning)
            }
            ListaError::Storage(StorageError::Io { message }) => {
                (format!("保存処理に失敗しました: {}", message), NoticeLevel::Error)
            }
            ListaError::Storage(StorageError::Malformed { message }) => {
                (format!("保存データを読み込めません: {}", message), NoticeLevel::Error)
            }
            ListaError::Storage(StorageError::InvalidPath { path }) => {
                (format!("無効なパスです: {}", path), NoticeLevel::Error)
            }
            ListaError::Ui(UiError::TerminalInit) => {
                ("ターミナル初期化に失敗しました".to_string(), NoticeLevel::Error)
            }
            _ => (format!("エラーが発生しました: {}", error), NoticeLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
///
/// raw mode 中のパニックでも読める形で出力してから終了する
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );

        let location = panic_info
            .location()
            .unwrap_or_else(|| std::panic::Location::caller());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
        std::process::exit(1);
    }));
}

// std::io::Error から ListaError への変換
impl From<std::io::Error> for ListaError {
    fn from(error: std::io::Error) -> Self {
        ListaError::Storage(StorageError::Io {
            message: error.to_string(),
        })
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, ListaError>;

/// 各モジュール固有のResult型
pub mod storage {
    pub type Result<T> = std::result::Result<T, super::StorageError>;
}
