//! ビルトイン関数用のユーティリティマクロ
//!
//! 引数チェックなど、ネイティブ関数で繰り返し使用されるパターンを統一します。

/// 引数の個数をチェックするマクロ
///
/// # 使用例
///
/// ```ignore
/// // 引数が正確に2個必要な場合
/// check_args!(args, 2, "filter");
///
/// // 引数が1個または2個の場合
/// check_args!(args, 1..=2, "first");
///
/// // 引数が最低2個必要な場合
/// check_args!(args, 2.., "invoke");
/// ```
#[macro_export]
macro_rules! check_args {
    // 範囲指定（min..=max）
    ($args:expr, $min:literal ..= $max:literal, $name:expr) => {
        if $args.len() < $min || $args.len() > $max {
            return Err($crate::error::UnderbarError::arg_count(
                $name,
                &format!("{} to {}", $min, $max),
                $args.len(),
            ));
        }
    };

    // 下限のみ（min..）
    ($args:expr, $min:literal .., $name:expr) => {
        if $args.len() < $min {
            return Err($crate::error::UnderbarError::too_few_args(
                $name,
                $min,
                $args.len(),
            ));
        }
    };

    // 引数が正確にN個
    ($args:expr, $n:literal, $name:expr) => {
        if $args.len() != $n {
            return Err($crate::error::UnderbarError::arg_count(
                $name,
                &$n.to_string(),
                $args.len(),
            ));
        }
    };
}
