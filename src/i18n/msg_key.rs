/// エラーメッセージキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgKey {
    // 型エラー
    TypeMismatch,      // {0}: expected {1}, got {2}
    MustBeNonNegative, // {0}: {1} must be non-negative

    // 引数エラー
    ArgCountMismatch, // {0} requires {1} argument(s), got {2}
    NeedAtLeastNArgs, // {0} requires at least {1} argument(s), got {2}

    // 関数呼び出し
    UnknownFunction, // unknown function: {0}
    DidYouMean,      // did you mean: {0}?
    MethodNotFound,  // {0}: element has no method '{1}'
    InvokeHelp,      // help text for invoke

    // タイマー
    SchedulerClosed,     // {0}: event loop has been dropped
    SchedulerClosedNote, // note for SchedulerClosed
    CallbackFailed,      // delayed call to {0} failed: {1}
}
