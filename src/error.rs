//! underbarエラー処理
//!
//! 構造化されたエラー情報を提供し、以下をサポート：
//! - エラーコードによる分類
//! - ヒントとサジェスト
//! - 複数の出力形式（人間向け/JSON）

use crate::i18n::{fmt_msg, msg, MsgKey};
use std::fmt;

/// エラーコード
///
/// Rustコンパイラ風の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 0xxx: 関数名関連
    E0002, // 未定義の関数

    // 1xxx: 型エラー
    E0101, // 型の不一致（コレクション以外を渡した等）
    E0102, // 値の範囲外（負の待ち時間等）

    // 2xxx: 引数エラー
    E0201, // 引数の数が一致しない
    E0203, // 引数が少なすぎる

    // 3xxx: 実行時エラー
    E0301, // イベントループが停止済み

    // 9xxx: 汎用エラー
    E9999, // 分類されていないエラー
}

impl ErrorCode {
    /// 呼び出し側の引数ミス（InvalidArgument）に分類されるか
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0101 | ErrorCode::E0102 | ErrorCode::E0201 | ErrorCode::E0203
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 構造化されたエラー情報
#[derive(Debug, Clone)]
pub struct UnderbarError {
    /// エラーコード
    code: ErrorCode,
    /// メインメッセージ（1行）
    message: String,
    /// 詳細な説明（note）
    notes: Vec<String>,
    /// 解決のヒント（help）
    help: Vec<String>,
    /// サジェスト（もしかして〜？）
    suggestions: Vec<String>,
}

/// underbar全体で使うResult型
pub type Result<T> = std::result::Result<T, UnderbarError>;

impl UnderbarError {
    /// 新しいエラーを作成
    pub fn new<S: Into<String>>(code: ErrorCode, message: S) -> Self {
        Self {
            code,
            message: message.into(),
            notes: Vec::new(),
            help: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// noteを追加
    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.notes.push(note.into());
        self
    }

    /// helpを追加
    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help.push(help.into());
        self
    }

    /// suggestionを追加
    pub fn with_suggestion<S: Into<String>>(mut self, suggestion: S) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// シンプルなメッセージのみ取得
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code.is_invalid_argument()
    }

    /// エラーコード + メッセージ（ログ用）
    pub fn short(&self) -> String {
        format!("error[{}]: {}", self.code, self.message)
    }

    /// 完全な詳細情報
    pub fn full(&self) -> String {
        let mut output = format!("error[{}]: {}\n", self.code, self.message);

        for note in &self.notes {
            output.push_str(&format!("  = note: {}\n", note));
        }
        for help_text in &self.help {
            output.push_str(&format!("  = help: {}\n", help_text));
        }
        for suggestion in &self.suggestions {
            output.push_str(&format!("  = suggestion: {}\n", suggestion));
        }

        output
    }

    /// JSON形式で出力（ツール連携用）
    #[cfg(feature = "format-json")]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        json!({
            "code": self.code.to_string(),
            "message": self.message,
            "notes": self.notes,
            "help": self.help,
            "suggestions": self.suggestions,
        })
    }
}

impl fmt::Display for UnderbarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

impl From<UnderbarError> for String {
    fn from(err: UnderbarError) -> String {
        err.full()
    }
}

// Stringエラーをラップ（利用側コールバックの簡易エラー用）
impl From<String> for UnderbarError {
    fn from(msg: String) -> UnderbarError {
        UnderbarError::new(ErrorCode::E9999, msg)
    }
}

impl From<&str> for UnderbarError {
    fn from(msg: &str) -> UnderbarError {
        UnderbarError::new(ErrorCode::E9999, msg.to_string())
    }
}

impl std::error::Error for UnderbarError {}

// ========================================
// エラー構築ヘルパー関数
// ========================================

impl UnderbarError {
    /// 引数の型が不正（InvalidArgument）
    pub fn invalid_argument(func: &str, expected: &str, actual: &str) -> Self {
        UnderbarError::new(
            ErrorCode::E0101,
            fmt_msg(MsgKey::TypeMismatch, &[func, expected, actual]),
        )
    }

    /// 値の範囲外
    pub fn out_of_range(func: &str, what: &str) -> Self {
        UnderbarError::new(
            ErrorCode::E0102,
            fmt_msg(MsgKey::MustBeNonNegative, &[func, what]),
        )
    }

    /// 引数の数エラー（exactlyは期待値の説明: "1", "1 or 2" 等）
    pub fn arg_count(func: &str, expected: &str, actual: usize) -> Self {
        UnderbarError::new(
            ErrorCode::E0201,
            fmt_msg(
                MsgKey::ArgCountMismatch,
                &[func, expected, &actual.to_string()],
            ),
        )
    }

    /// 引数が少なすぎる
    pub fn too_few_args(func: &str, min: usize, actual: usize) -> Self {
        UnderbarError::new(
            ErrorCode::E0203,
            fmt_msg(
                MsgKey::NeedAtLeastNArgs,
                &[func, &min.to_string(), &actual.to_string()],
            ),
        )
    }

    /// invokeでメソッドが見つからない
    pub fn method_not_found(func: &str, method: &str) -> Self {
        UnderbarError::new(
            ErrorCode::E0101,
            fmt_msg(MsgKey::MethodNotFound, &[func, method]),
        )
        .with_help(msg(MsgKey::InvokeHelp))
    }

    /// イベントループが既に破棄されている
    pub fn scheduler_closed(func: &str) -> Self {
        UnderbarError::new(ErrorCode::E0301, fmt_msg(MsgKey::SchedulerClosed, &[func]))
            .with_note(msg(MsgKey::SchedulerClosedNote))
    }

    /// 未定義の関数
    pub fn unknown_function(name: &str) -> Self {
        UnderbarError::new(ErrorCode::E0002, fmt_msg(MsgKey::UnknownFunction, &[name]))
    }
}
