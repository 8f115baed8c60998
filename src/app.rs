//! メインアプリケーション構造体
//!
//! コントローラ状態（追加/編集モード、フォーカス、ハイライト）と
//! メインループを実装。すべての操作は単一スレッドのイベントループ上で
//! 完結し、ストアの変更と再描画は同じイテレーション内で同期的に行う

use crate::error::{ListaError, Notice, Result, UiError, ValidationError};
use crate::input::{Command, Key, KeyMap};
use crate::logging::Logger;
use crate::storage::{FileBackend, StorageBackend};
use crate::store::ItemStore;
use crate::ui::{visible_indices, FocusTarget, Renderer, ViewSnapshot};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

/// 入力モード
///
/// 編集対象はDOM的なマーカーではなくデータとして保持する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// 新規アイテムの追加
    Adding,
    /// 既存アイテムの置き換え（対象のテキストを保持）
    Editing { original: String },
}

/// カーソル付きの1行テキスト入力
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// カーソル位置に1文字挿入
    pub fn insert_char(&mut self, ch: char) {
        let byte_index = self.byte_index();
        self.text.insert(byte_index, ch);
        self.cursor += 1;
    }

    /// カーソル直前の1文字を削除
    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_index = self.byte_index();
        self.text.remove(byte_index);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// テキストを置き換えてカーソルを末尾へ
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len())
    }
}

/// メインアプリケーション構造体
///
/// 全てのコンポーネントを統合し、アプリケーションのライフサイクルを管理
pub struct App {
    /// アプリケーション実行状態
    running: bool,
    /// アイテムストア
    store: ItemStore,
    /// 入力モード
    mode: InputMode,
    /// フォーカス対象
    focus: FocusTarget,
    /// アイテム入力行
    input: InputLine,
    /// 絞り込み入力行
    filter: InputLine,
    /// 表示リスト上のハイライト位置
    highlight: usize,
    /// 表示中の通知
    notice: Option<Notice>,
    /// キーマップ
    keymap: KeyMap,
    /// レンダラー
    renderer: Renderer,
    /// 開発者向けロガー
    logger: Logger,
}

impl App {
    /// 既定のファイルバックエンドでアプリケーションを作成
    pub fn new() -> Result<Self> {
        let backend = FileBackend::open_default()?;
        Self::with_backend(Box::new(backend))
    }

    /// 任意のバックエンドでアプリケーションを作成
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Result<Self> {
        let store = ItemStore::open(backend)?;
        Ok(Self {
            running: true,
            store,
            mode: InputMode::Adding,
            focus: FocusTarget::Input,
            input: InputLine::new(),
            filter: InputLine::new(),
            highlight: 0,
            notice: None,
            keymap: KeyMap::new(),
            renderer: Renderer::new(),
            logger: Logger::from_env(),
        })
    }

    /// メインイベントループを実行
    pub fn run(&mut self) -> Result<()> {
        self.enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|err| Self::terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        drop(terminal);
        let cleanup_result = self.leave_terminal();

        loop_result.and(cleanup_result)
    }

    /// アプリケーションが実行中かどうかを確認
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        self.running = false;
    }

    fn enter_terminal(&self) -> Result<()> {
        enable_raw_mode().map_err(|_| ListaError::Ui(UiError::TerminalInit))?;
        execute!(stdout(), EnterAlternateScreen)
            .map_err(|err| Self::terminal_error("enter alternate screen", err))?;
        Ok(())
    }

    fn leave_terminal(&self) -> Result<()> {
        execute!(stdout(), LeaveAlternateScreen)
            .map_err(|err| Self::terminal_error("leave alternate screen", err))?;
        disable_raw_mode().map_err(|err| Self::terminal_error("disable raw mode", err))?;
        Ok(())
    }

    fn terminal_error(context: &str, err: std::io::Error) -> ListaError {
        ListaError::Ui(UiError::Terminal {
            context: context.to_string(),
            message: err.to_string(),
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        while self.running {
            self.expire_notice();

            let view = self.view_snapshot();
            self.renderer
                .render(terminal, &view)
                .map_err(|err| Self::terminal_error("render", err))?;

            if event::poll(Duration::from_millis(16))
                .map_err(|err| Self::terminal_error("event poll", err))?
            {
                match event::read().map_err(|err| Self::terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(key_event)?,
                    Event::Resize(_, _) => {
                        // 次回描画で自動的に反映されるため処理不要
                    }
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
        }

        Ok(())
    }

    /// キーイベントを処理
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        let key = Key::from(key_event);
        match self.keymap.resolve(&key) {
            Some(command) => self.execute_command(command),
            None => Ok(()),
        }
    }

    /// コマンドを実行
    pub fn execute_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::InsertChar(ch) => {
                match self.focus {
                    FocusTarget::Input => self.input.insert_char(ch),
                    FocusTarget::Filter => {
                        self.filter.insert_char(ch);
                        self.clamp_highlight();
                    }
                    FocusTarget::List => {}
                }
                Ok(())
            }
            Command::DeleteBackwardChar => {
                match self.focus {
                    FocusTarget::Input => self.input.delete_backward(),
                    FocusTarget::Filter => {
                        self.filter.delete_backward();
                        self.clamp_highlight();
                    }
                    FocusTarget::List => {}
                }
                Ok(())
            }
            Command::Submit => match self.focus {
                FocusTarget::Input => self.submit(),
                FocusTarget::List => self.select_for_edit(self.highlight),
                FocusTarget::Filter => Ok(()),
            },
            Command::FocusNext => {
                self.cycle_focus();
                Ok(())
            }
            Command::MoveUp => {
                self.move_highlight(-1);
                Ok(())
            }
            Command::MoveDown => {
                self.move_highlight(1);
                Ok(())
            }
            Command::DeleteItem => self.remove_visible(self.highlight),
            Command::ClearList => self.clear_all(),
            Command::KeyboardQuit => {
                self.keyboard_quit();
                Ok(())
            }
            Command::Quit => {
                self.shutdown();
                Ok(())
            }
        }
    }

    /// 入力行の内容を確定する
    ///
    /// 空入力と重複は通知のみでストアを変更しない。
    /// 編集モードでの確定は「元アイテムの削除 + 新テキストの追加」で、
    /// 更新されたアイテムはリスト末尾へ移動する
    pub fn submit(&mut self) -> Result<()> {
        let raw = self.input.text().to_string();

        if raw.trim().is_empty() {
            self.show_validation_error(ValidationError::Empty);
            return Ok(());
        }

        if self.store.contains_ignore_case(&raw) {
            // 重複検出時は編集中でも選択を解除して追加モードへ戻す
            self.show_validation_error(ValidationError::Duplicate {
                text: raw.trim().to_string(),
            });
            self.input.clear();
            self.mode = InputMode::Adding;
            return Ok(());
        }

        let was_editing = matches!(self.mode, InputMode::Editing { .. });
        if let InputMode::Editing { original } =
            std::mem::replace(&mut self.mode, InputMode::Adding)
        {
            self.store.remove(&original)?;
        }
        self.store.add(&raw)?;

        self.input.clear();
        self.clamp_highlight();

        if was_editing {
            self.show_info(format!("アイテムを更新しました: {}", raw.trim()));
        } else {
            self.show_info(format!("アイテムを追加しました: {}", raw.trim()));
        }
        self.logger
            .log_debug(format!("submit done, {} items", self.store.len()));
        Ok(())
    }

    /// 表示リスト上の位置にあるアイテムを編集対象として選択
    ///
    /// 既に別のアイテムを編集中なら選択を移し替える
    pub fn select_for_edit(&mut self, position: usize) -> Result<()> {
        let visible = self.visible();
        let Some(&index) = visible.get(position) else {
            return Ok(());
        };

        let item = self.store.items()[index].clone();
        self.input.set_text(&item);
        self.mode = InputMode::Editing { original: item };
        self.highlight = position;
        self.focus = FocusTarget::Input;
        self.logger.log_debug("edit mode entered");
        Ok(())
    }

    /// 表示リスト上の位置にあるアイテムを削除
    pub fn remove_visible(&mut self, position: usize) -> Result<()> {
        let visible = self.visible();
        let Some(&index) = visible.get(position) else {
            return Ok(());
        };

        let item = self.store.items()[index].clone();
        self.store.remove(&item)?;

        // 編集対象を消した場合は追加モードへ戻す
        if matches!(&self.mode, InputMode::Editing { original } if *original == item) {
            self.mode = InputMode::Adding;
        }

        self.after_list_shrink();
        self.show_info(format!("アイテムを削除しました: {}", item));
        Ok(())
    }

    /// リスト全体をクリア
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.mode = InputMode::Adding;
        self.highlight = 0;
        self.after_list_shrink();
        self.show_info("リストを空にしました");
        Ok(())
    }

    /// 絞り込みクエリを設定（表示のみに作用）
    pub fn set_filter(&mut self, query: &str) {
        self.filter.set_text(query);
        self.clamp_highlight();
    }

    /// 編集状態のキャンセル（C-g）
    pub fn keyboard_quit(&mut self) {
        if matches!(self.mode, InputMode::Editing { .. }) {
            self.mode = InputMode::Adding;
            self.input.clear();
            self.show_info("編集をキャンセルしました");
        } else {
            self.show_info("キャンセルしました");
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusTarget::Input => {
                if self.controls_visible() {
                    FocusTarget::Filter
                } else {
                    FocusTarget::List
                }
            }
            FocusTarget::Filter => FocusTarget::List,
            FocusTarget::List => FocusTarget::Input,
        };
    }

    fn move_highlight(&mut self, delta: isize) {
        let count = self.visible().len();
        if count == 0 {
            return;
        }

        self.focus = FocusTarget::List;
        let position = self.highlight as isize + delta;
        self.highlight = position.clamp(0, count as isize - 1) as usize;
    }

    /// リスト縮小後の整合処理
    ///
    /// ハイライトを表示範囲に収め、絞り込み行が非表示になった場合は
    /// フォーカスを入力行へ戻す
    fn after_list_shrink(&mut self) {
        self.clamp_highlight();
        if self.store.is_empty() && self.focus == FocusTarget::Filter {
            self.focus = FocusTarget::Input;
        }
    }

    fn clamp_highlight(&mut self) {
        let count = self.visible().len();
        if count == 0 {
            self.highlight = 0;
        } else if self.highlight >= count {
            self.highlight = count - 1;
        }
    }

    fn visible(&self) -> Vec<usize> {
        visible_indices(self.store.items(), self.filter.text())
    }

    fn expire_notice(&mut self) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired()) {
            self.notice = None;
        }
    }

    fn show_validation_error(&mut self, error: ValidationError) {
        let error = ListaError::Validation(error);
        self.logger.log_warning(error.to_string());
        self.notice = Some(Notice::from_error(&error));
    }

    fn show_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::info(message));
    }

    fn view_snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            items: self.store.items(),
            query: self.filter.text(),
            input: self.input.text(),
            input_cursor: self.input.cursor(),
            filter_cursor: self.filter.cursor(),
            editing: matches!(self.mode, InputMode::Editing { .. }),
            selected: self.selected_item(),
            highlight: self.highlight,
            focus: self.focus,
            notice: self
                .notice
                .as_ref()
                .map(|notice| (notice.message.as_str(), notice.level)),
        }
    }

    // --- 読み取りアクセサ（UIとテストが使用） ---

    pub fn items(&self) -> &[String] {
        self.store.items()
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, InputMode::Editing { .. })
    }

    /// 編集対象のアイテムテキスト
    pub fn selected_item(&self) -> Option<&str> {
        match &self.mode {
            InputMode::Editing { original } => Some(original.as_str()),
            InputMode::Adding => None,
        }
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    pub fn filter_text(&self) -> &str {
        self.filter.text()
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 絞り込み行と全削除の操作が表示されているか
    pub fn controls_visible(&self) -> bool {
        !self.store.is_empty()
    }

    /// 現在表示されているアイテムのテキスト列
    pub fn visible_items(&self) -> Vec<&str> {
        let items = self.store.items();
        self.visible()
            .into_iter()
            .map(|index| items[index].as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn app() -> App {
        App::with_backend(Box::new(MemoryBackend::new())).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.execute_command(Command::InsertChar(ch)).unwrap();
        }
    }

    #[test]
    fn input_line_edits_at_char_boundaries() {
        let mut line = InputLine::new();
        line.insert_char('ミ');
        line.insert_char('ル');
        line.insert_char('ク');
        assert_eq!(line.text(), "ミルク");

        line.delete_backward();
        assert_eq!(line.text(), "ミル");
        assert_eq!(line.cursor(), 2);

        line.set_text("Bread");
        assert_eq!(line.cursor(), 5);

        line.clear();
        assert_eq!(line.text(), "");
    }

    #[test]
    fn typing_goes_to_focused_line() {
        let mut app = app();
        type_text(&mut app, "Milk");
        assert_eq!(app.input_text(), "Milk");
        app.submit().unwrap();

        // 絞り込み行へフォーカスを移して入力
        app.execute_command(Command::FocusNext).unwrap();
        assert_eq!(app.focus(), FocusTarget::Filter);
        type_text(&mut app, "mi");
        assert_eq!(app.filter_text(), "mi");
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn focus_cycle_skips_hidden_filter() {
        let mut app = app();
        assert!(!app.controls_visible());

        // 空リストでは入力行 → リスト → 入力行
        app.execute_command(Command::FocusNext).unwrap();
        assert_eq!(app.focus(), FocusTarget::List);
        app.execute_command(Command::FocusNext).unwrap();
        assert_eq!(app.focus(), FocusTarget::Input);

        type_text(&mut app, "Milk");
        app.submit().unwrap();

        // 非空なら絞り込み行も巡回に含まれる
        app.execute_command(Command::FocusNext).unwrap();
        assert_eq!(app.focus(), FocusTarget::Filter);
    }

    #[test]
    fn move_highlight_stays_within_visible_range() {
        let mut app = app();
        for name in ["Apple", "Banana", "Apricot"] {
            type_text(&mut app, name);
            app.submit().unwrap();
        }

        app.execute_command(Command::MoveDown).unwrap();
        app.execute_command(Command::MoveDown).unwrap();
        app.execute_command(Command::MoveDown).unwrap();
        assert_eq!(app.highlight(), 2);
        assert_eq!(app.focus(), FocusTarget::List);

        app.set_filter("ap");
        assert_eq!(app.visible_items(), ["Apple", "Apricot"]);
        assert_eq!(app.highlight(), 1);
    }

    #[test]
    fn keyboard_quit_cancels_edit() {
        let mut app = app();
        type_text(&mut app, "Milk");
        app.submit().unwrap();

        app.select_for_edit(0).unwrap();
        assert!(app.is_editing());
        assert_eq!(app.input_text(), "Milk");

        app.keyboard_quit();
        assert!(!app.is_editing());
        assert_eq!(app.input_text(), "");
        assert_eq!(app.items(), ["Milk"]);
    }

    #[test]
    fn quit_command_stops_the_app() {
        let mut app = app();
        assert!(app.is_running());
        app.execute_command(Command::Quit).unwrap();
        assert!(!app.is_running());
    }
}
