//! レンダラー
//!
//! 毎イベント後にフレーム全体を再構築する（差分更新なし）。
//! リスト規模が小さい前提の設計で、スクロールは持たない

use crate::error::NoticeLevel;
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::view::{FocusTarget, ViewSnapshot};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use unicode_width::UnicodeWidthChar;

/// カーソル位置（文字単位）までの表示幅
fn display_width(text: &str, cursor: usize) -> u16 {
    text.chars()
        .take(cursor)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum::<usize>() as u16
}

/// フレーム全体を描画するレンダラー
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            theme: Theme::dark(),
        }
    }

    /// メイン描画処理
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        view: &ViewSnapshot<'_>,
    ) -> io::Result<()> {
        terminal.draw(|frame| self.render_frame(frame, view))?;
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame<'_>, view: &ViewSnapshot<'_>) {
        let show_filter = view.controls_visible();

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(3)];
        if show_filter {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));

        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        let title_area = areas[0];
        let input_area = areas[1];
        let (filter_area, list_area, notice_area, hint_area) = if show_filter {
            (Some(areas[2]), areas[3], areas[4], areas[5])
        } else {
            (None, areas[2], areas[3], areas[4])
        };

        self.render_title(frame, title_area);
        self.render_input(frame, input_area, view);
        if let Some(area) = filter_area {
            self.render_filter(frame, area, view);
        }
        self.render_list(frame, list_area, view);
        self.render_notice(frame, notice_area, view);
        self.render_hints(frame, hint_area, view);

        // フォーカス中のテキスト行にカーソルを置く
        match view.focus {
            FocusTarget::Input => {
                let x = input_area.x + 1 + display_width(view.input, view.input_cursor);
                frame.set_cursor_position((x, input_area.y + 1));
            }
            FocusTarget::Filter => {
                if let Some(area) = filter_area {
                    let x = area.x + 1 + display_width(view.query, view.filter_cursor);
                    frame.set_cursor_position((x, area.y + 1));
                }
            }
            FocusTarget::List => {}
        }
    }

    fn render_title(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = Paragraph::new(format!(" lista v{}", env!("CARGO_PKG_VERSION")))
            .style(self.theme.style(&ComponentType::Title));
        frame.render_widget(title, area);
    }

    fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.theme.style(&ComponentType::BorderFocused)
        } else {
            self.theme.style(&ComponentType::Border)
        }
    }

    fn render_input(&self, frame: &mut Frame<'_>, area: Rect, view: &ViewSnapshot<'_>) {
        // 編集モードでは表示を「更新」に切り替える
        let (label, text_style, border_style) = if view.editing {
            (
                "アイテム更新",
                self.theme.style(&ComponentType::InputLineEditing),
                self.theme.style(&ComponentType::InputLineEditing),
            )
        } else {
            (
                "アイテム追加",
                self.theme.style(&ComponentType::InputLine),
                self.border_style(view.focus == FocusTarget::Input),
            )
        };

        let input = Paragraph::new(view.input).style(text_style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(label),
        );
        frame.render_widget(input, area);
    }

    fn render_filter(&self, frame: &mut Frame<'_>, area: Rect, view: &ViewSnapshot<'_>) {
        let filter = Paragraph::new(view.query)
            .style(self.theme.style(&ComponentType::FilterLine))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style(view.focus == FocusTarget::Filter))
                    .title("絞り込み"),
            );
        frame.render_widget(filter, area);
    }

    fn render_list(&self, frame: &mut Frame<'_>, area: Rect, view: &ViewSnapshot<'_>) {
        let visible = view.visible_indices();

        let lines: Vec<Line<'_>> = if view.items.is_empty() {
            vec![Line::from(Span::styled(
                "アイテムはありません",
                self.theme.style(&ComponentType::Hint),
            ))]
        } else if visible.is_empty() {
            vec![Line::from(Span::styled(
                "一致するアイテムはありません",
                self.theme.style(&ComponentType::Hint),
            ))]
        } else {
            visible
                .iter()
                .enumerate()
                .map(|(position, &index)| {
                    let item = view.items[index].as_str();
                    let selected = view.selected == Some(item);

                    let mut style = if selected {
                        self.theme.style(&ComponentType::ItemSelected)
                    } else {
                        self.theme.style(&ComponentType::Item)
                    };
                    if position == view.highlight && view.focus == FocusTarget::List {
                        style = style.patch(self.theme.style(&ComponentType::ItemHighlight));
                    }

                    let marker = if selected { "▶ " } else { "  " };
                    Line::from(Span::styled(format!("{}{}", marker, item), style))
                })
                .collect()
        };

        let list = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.border_style(view.focus == FocusTarget::List))
                .title(format!("アイテム ({}件)", view.items.len())),
        );
        frame.render_widget(list, area);
    }

    fn render_notice(&self, frame: &mut Frame<'_>, area: Rect, view: &ViewSnapshot<'_>) {
        let Some((message, level)) = view.notice else {
            return;
        };

        let component = match level {
            NoticeLevel::Info => ComponentType::NoticeInfo,
            NoticeLevel::Warning => ComponentType::NoticeWarning,
            NoticeLevel::Error => ComponentType::NoticeError,
        };
        let notice =
            Paragraph::new(format!(" {}", message)).style(self.theme.style(&component));
        frame.render_widget(notice, area);
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect, view: &ViewSnapshot<'_>) {
        let mut hints = vec!["Enter: 確定", "Tab: フォーカス切替", "↑/↓: 移動", "C-d: 削除"];
        if view.controls_visible() {
            hints.push("C-l: 全削除");
        }
        if view.editing {
            hints.push("C-g: 編集キャンセル");
        }
        hints.push("Esc: 終了");

        let footer = Paragraph::new(format!(" {}", hints.join("  ")))
            .style(self.theme.style(&ComponentType::Hint));
        frame.render_widget(footer, area);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_counts_wide_characters() {
        assert_eq!(display_width("abc", 2), 2);
        assert_eq!(display_width("ミルク", 2), 4);
        assert_eq!(display_width("abc", 10), 3);
    }
}
