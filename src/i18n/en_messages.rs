use super::msg_key::MsgKey;
use super::msg_key::MsgKey::*;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 英語エラーメッセージ
pub static EN_MSGS: LazyLock<HashMap<MsgKey, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // 型エラー
        (TypeMismatch, "{0}: expected {1}, got {2}"),
        (MustBeNonNegative, "{0}: {1} must be non-negative"),
        // 引数エラー
        (ArgCountMismatch, "{0} requires {1} argument(s), got {2}"),
        (NeedAtLeastNArgs, "{0} requires at least {1} argument(s), got {2}"),
        // 関数呼び出し
        (UnknownFunction, "unknown function: {0}"),
        (DidYouMean, "did you mean: {0}?"),
        (MethodNotFound, "{0}: element has no method '{1}'"),
        (
            InvokeHelp,
            "pass a function, or a name whose property on every element holds a function",
        ),
        // タイマー
        (SchedulerClosed, "{0}: the event loop has been dropped"),
        (CallbackFailed, "delayed call to {0} failed: {1}"),
        (
            SchedulerClosedNote,
            "timers can only be registered while their EventLoop is alive",
        ),
    ])
});
