use super::msg_key::MsgKey;
use super::msg_key::MsgKey::*;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 日本語エラーメッセージ（無いキーは英語にフォールバック）
pub static JA_MSGS: LazyLock<HashMap<MsgKey, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // 型エラー
        (TypeMismatch, "{0}: {1}が必要ですが、{2}が渡されました"),
        (MustBeNonNegative, "{0}: {1}は0以上である必要があります"),
        // 引数エラー
        (ArgCountMismatch, "{0}には{1}個の引数が必要です（実際: {2}個）"),
        (NeedAtLeastNArgs, "{0}には少なくとも{1}個の引数が必要です（実際: {2}個）"),
        // 関数呼び出し
        (UnknownFunction, "未定義の関数: {0}"),
        (DidYouMean, "もしかして: {0}"),
        (MethodNotFound, "{0}: 要素にメソッド'{1}'がありません"),
        (
            InvokeHelp,
            "関数を渡すか、すべての要素で関数が入っているプロパティ名を指定してください",
        ),
        // タイマー
        (SchedulerClosed, "{0}: イベントループは既に破棄されています"),
        (
            SchedulerClosedNote,
            "タイマーはEventLoopが存在する間だけ登録できます",
        ),
    ])
});
