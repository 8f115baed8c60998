//! レンダラーの描画テスト
//!
//! TestBackend のバッファを走査して表示可否のルールを確認する

use lista::error::NoticeLevel;
use lista::ui::{FocusTarget, Renderer, ViewSnapshot};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn snapshot<'a>(items: &'a [String], query: &'a str) -> ViewSnapshot<'a> {
    ViewSnapshot {
        items,
        query,
        input: "",
        input_cursor: 0,
        filter_cursor: 0,
        editing: false,
        selected: None,
        highlight: 0,
        focus: FocusTarget::Input,
        notice: None,
    }
}

#[test]
fn items_are_rendered_and_filtered_items_are_hidden() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    let renderer = Renderer::new();

    let items = vec![
        "Apple".to_string(),
        "Banana".to_string(),
        "Apricot".to_string(),
    ];

    let view = snapshot(&items, "");
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains("Apple"), "missing item: {}", text);
    assert!(text.contains("Banana"));
    assert!(text.contains("Apricot"));

    // "ap" で絞り込むと Banana は描画されない
    let view = snapshot(&items, "ap");
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains("Apple"));
    assert!(text.contains("Apricot"));
    assert!(!text.contains("Banana"), "filtered item rendered: {}", text);
}

#[test]
fn filter_control_is_hidden_while_list_is_empty() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    let renderer = Renderer::new();

    let empty: Vec<String> = Vec::new();
    let view = snapshot(&empty, "");
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(!text.contains("絞"), "filter control rendered on empty list");

    let items = vec!["Milk".to_string()];
    let view = snapshot(&items, "");
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains("絞"), "filter control missing: {}", text);
}

#[test]
fn edit_mode_switches_the_affordance_label() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    let renderer = Renderer::new();

    let items = vec!["Bread".to_string()];

    let view = snapshot(&items, "");
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains("追"), "add label missing: {}", text);

    let view = ViewSnapshot {
        editing: true,
        selected: Some("Bread"),
        input: "Bread",
        input_cursor: 5,
        ..snapshot(&items, "")
    };
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains("更"), "update label missing: {}", text);
}

#[test]
fn notice_is_rendered_in_the_message_area() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    let renderer = Renderer::new();

    let items = vec!["Milk".to_string()];
    let view = ViewSnapshot {
        notice: Some(("duplicate entry", NoticeLevel::Warning)),
        ..snapshot(&items, "")
    };
    renderer.render(&mut terminal, &view).unwrap();
    let text = buffer_text(&terminal);
    assert!(text.contains("duplicate entry"), "notice missing: {}", text);
}
