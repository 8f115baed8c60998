//! UIモジュール
//!
//! ストア状態を毎イベント後に全面再描画する表示層。
//! 絞り込みは表示可否の判定のみで、ストアには一切影響しない

pub mod renderer;
pub mod theme;
pub mod view;

// 基本公開API
pub use renderer::Renderer;
pub use theme::{ComponentType, Theme};
pub use view::{visible_indices, FocusTarget, ViewSnapshot};
