//! コマンド定義
//!
//! キー入力から解決される操作の一覧。フォーカス依存の解釈
//! （入力行への挿入か、リスト操作か）はコントローラ側で行う

/// 実行可能なコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// フォーカス中のテキスト行へ文字を挿入
    InsertChar(char),
    /// フォーカス中のテキスト行で後方削除
    DeleteBackwardChar,
    /// 確定（入力行: 送信 / リスト: 編集対象の選択）
    Submit,
    /// フォーカスを次の対象へ
    FocusNext,
    /// リストのハイライトを上へ
    MoveUp,
    /// リストのハイライトを下へ
    MoveDown,
    /// ハイライト中のアイテムを削除
    DeleteItem,
    /// リスト全体をクリア
    ClearList,
    /// 編集状態のキャンセル（C-g）
    KeyboardQuit,
    /// アプリケーション終了
    Quit,
}
