//! テーマシステム
//!
//! コンポーネント別のカラー設定を管理

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// UIコンポーネントの種類
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// タイトルバー
    Title,
    /// アイテム入力行
    InputLine,
    /// 編集モード中の入力行
    InputLineEditing,
    /// 絞り込み入力行
    FilterLine,
    /// リストのアイテム
    Item,
    /// 編集対象として選択中のアイテム
    ItemSelected,
    /// ナビゲーションハイライト
    ItemHighlight,
    /// 情報通知
    NoticeInfo,
    /// 警告通知
    NoticeWarning,
    /// エラー通知
    NoticeError,
    /// キー操作ヒント
    Hint,
    /// 非フォーカス枠
    Border,
    /// フォーカス中の枠
    BorderFocused,
}

/// カラー設定
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// 前景色
    pub foreground: Color,
    /// 背景色
    pub background: Color,
    /// 修飾子（太字、反転など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    /// コンポーネント別のカラー設定
    colors: HashMap<ComponentType, ColorScheme>,
}

impl Theme {
    /// ダークテーマ（既定）
    pub fn dark() -> Self {
        let mut colors = HashMap::new();

        colors.insert(
            ComponentType::Title,
            ColorScheme::new(Color::Cyan, Color::Reset).with_modifier(Modifier::BOLD),
        );
        colors.insert(
            ComponentType::InputLine,
            ColorScheme::new(Color::White, Color::Reset),
        );
        colors.insert(
            ComponentType::InputLineEditing,
            ColorScheme::new(Color::Green, Color::Reset).with_modifier(Modifier::BOLD),
        );
        colors.insert(
            ComponentType::FilterLine,
            ColorScheme::new(Color::White, Color::Reset),
        );
        colors.insert(
            ComponentType::Item,
            ColorScheme::new(Color::White, Color::Reset),
        );
        colors.insert(
            ComponentType::ItemSelected,
            ColorScheme::new(Color::Green, Color::Reset).with_modifier(Modifier::BOLD),
        );
        colors.insert(
            ComponentType::ItemHighlight,
            ColorScheme::new(Color::White, Color::Reset).with_modifier(Modifier::REVERSED),
        );
        colors.insert(
            ComponentType::NoticeInfo,
            ColorScheme::new(Color::Cyan, Color::Reset),
        );
        colors.insert(
            ComponentType::NoticeWarning,
            ColorScheme::new(Color::Yellow, Color::Reset).with_modifier(Modifier::BOLD),
        );
        colors.insert(
            ComponentType::NoticeError,
            ColorScheme::new(Color::Red, Color::Reset).with_modifier(Modifier::BOLD),
        );
        colors.insert(
            ComponentType::Hint,
            ColorScheme::new(Color::DarkGray, Color::Reset),
        );
        colors.insert(
            ComponentType::Border,
            ColorScheme::new(Color::DarkGray, Color::Reset),
        );
        colors.insert(
            ComponentType::BorderFocused,
            ColorScheme::new(Color::Cyan, Color::Reset),
        );

        Self { colors }
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: &ComponentType) -> Style {
        self.colors
            .get(component)
            .map(|scheme| scheme.to_style())
            .unwrap_or_default()
    }

    /// カラー設定を差し替え
    pub fn set_color(&mut self, component: ComponentType, scheme: ColorScheme) {
        self.colors.insert(component, scheme);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_defines_selected_item_style() {
        let theme = Theme::dark();
        let style = theme.style(&ComponentType::ItemSelected);
        assert_eq!(style.fg, Some(Color::Green));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn unknown_component_falls_back_to_default_style() {
        let mut theme = Theme::dark();
        theme.colors.clear();
        assert_eq!(theme.style(&ComponentType::Item), Style::default());
    }
}
