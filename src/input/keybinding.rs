//! キーバインドシステム
//!
//! crossterm のキーイベントを内部表現へ正規化し、コマンドへ解決する

use crate::input::commands::Command;
use crossterm::event::{
    KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers,
};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyModifiers {
    fn none() -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    fn ctrl() -> Self {
        Self {
            ctrl: true,
            alt: false,
            shift: false,
        }
    }
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Esc,
    Unknown,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::none(),
            code,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers::ctrl(),
            code: KeyCode::Char(ch),
        }
    }

    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_)) && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// 文字に変換
    pub fn to_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let code = match event.code {
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab | CrosstermKeyCode::BackTab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Self {
            modifiers: KeyModifiers {
                ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
                alt: event.modifiers.contains(CrosstermModifiers::ALT),
                shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
            },
            code,
        }
    }
}

/// キーマップ
///
/// 固定バインドをテーブルで解決し、それ以外の印字可能文字は
/// InsertChar へフォールバックする
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl KeyMap {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // テキスト行と確定
        bindings.insert(Key::plain(KeyCode::Enter), Command::Submit);
        bindings.insert(Key::plain(KeyCode::Backspace), Command::DeleteBackwardChar);
        bindings.insert(Key::plain(KeyCode::Tab), Command::FocusNext);

        // リスト操作
        bindings.insert(Key::plain(KeyCode::Up), Command::MoveUp);
        bindings.insert(Key::plain(KeyCode::Down), Command::MoveDown);
        bindings.insert(Key::ctrl('p'), Command::MoveUp);
        bindings.insert(Key::ctrl('n'), Command::MoveDown);
        bindings.insert(Key::plain(KeyCode::Delete), Command::DeleteItem);
        bindings.insert(Key::ctrl('d'), Command::DeleteItem);
        bindings.insert(Key::ctrl('l'), Command::ClearList);

        // アプリケーション制御
        bindings.insert(Key::ctrl('g'), Command::KeyboardQuit);
        bindings.insert(Key::plain(KeyCode::Esc), Command::Quit);
        bindings.insert(Key::ctrl('q'), Command::Quit);
        // 緊急終了のフォールバック
        bindings.insert(Key::ctrl('c'), Command::Quit);

        Self { bindings }
    }

    /// キーをコマンドへ解決
    pub fn resolve(&self, key: &Key) -> Option<Command> {
        if let Some(command) = self.bindings.get(key) {
            return Some(*command);
        }

        if key.is_insertable_char() {
            return key.to_char().map(Command::InsertChar);
        }

        None
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_resolve_to_commands() {
        let keymap = KeyMap::new();
        assert_eq!(keymap.resolve(&Key::plain(KeyCode::Enter)), Some(Command::Submit));
        assert_eq!(keymap.resolve(&Key::ctrl('g')), Some(Command::KeyboardQuit));
        assert_eq!(keymap.resolve(&Key::ctrl('l')), Some(Command::ClearList));
        assert_eq!(keymap.resolve(&Key::plain(KeyCode::Tab)), Some(Command::FocusNext));
    }

    #[test]
    fn plain_characters_fall_back_to_insertion() {
        let keymap = KeyMap::new();
        assert_eq!(keymap.resolve(&Key::char('a')), Some(Command::InsertChar('a')));
        assert_eq!(keymap.resolve(&Key::char('ミ')), Some(Command::InsertChar('ミ')));
    }

    #[test]
    fn unbound_control_keys_resolve_to_nothing() {
        let keymap = KeyMap::new();
        assert_eq!(keymap.resolve(&Key::ctrl('z')), None);
        assert_eq!(keymap.resolve(&Key::plain(KeyCode::Unknown)), None);
    }

    #[test]
    fn crossterm_events_are_normalized() {
        use crossterm::event::KeyEvent;

        let event = KeyEvent::new(CrosstermKeyCode::Char('x'), CrosstermModifiers::CONTROL);
        let key = Key::from(event);
        assert!(key.modifiers.ctrl);
        assert_eq!(key.code, KeyCode::Char('x'));
    }
}
