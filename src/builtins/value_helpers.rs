//! Value型の抽出・変換ヘルパー関数
//!
//! ネイティブ関数での引数チェックと、関数値をRustのクロージャへ
//! 変換する処理を統一するヘルパー関数群。

use crate::error::{Result, UnderbarError};
use crate::value::{NativeFn, Value};

/// 引数を取得（個数チェック済みであることが前提だが、念のためエラーを返す）
pub fn get_arg<'a>(args: &'a [Value], idx: usize, func: &str) -> Result<&'a Value> {
    args.get(idx)
        .ok_or_else(|| UnderbarError::arg_count(func, &(idx + 1).to_string(), args.len()))
}

/// 引数からInteger型を抽出
pub fn get_int_arg(args: &[Value], idx: usize, func: &str) -> Result<i64> {
    match get_arg(args, idx, func)? {
        Value::Integer(n) => Ok(*n),
        other => Err(UnderbarError::invalid_argument(
            func,
            "an integer",
            other.type_name(),
        )),
    }
}

/// 省略可能な整数引数（存在しないかnilならNone）
pub fn get_optional_int_arg(args: &[Value], idx: usize, func: &str) -> Result<Option<i64>> {
    match args.get(idx) {
        None | Some(Value::Nil) => Ok(None),
        Some(_) => get_int_arg(args, idx, func).map(Some),
    }
}

/// 引数から関数を抽出
pub fn get_function_arg<'a>(args: &'a [Value], idx: usize, func: &str) -> Result<&'a NativeFn> {
    get_arg(args, idx, func)?
        .as_function(func)
        .map(|f| f.as_ref())
}

/// 関数値を述語クロージャに変換（戻り値はtruthinessで判定）
pub fn predicate(func: &NativeFn) -> impl FnMut(&Value) -> Result<bool> + '_ {
    move |v| Ok(func.call(std::slice::from_ref(v))?.is_truthy())
}

/// 関数値を1引数の変換クロージャに変換
pub fn mapper(func: &NativeFn) -> impl FnMut(&Value) -> Result<Value> + '_ {
    move |v| func.call(std::slice::from_ref(v))
}

/// レコード（マップ）のプロパティを取得。キーが無ければnil
pub fn get_property(record: &Value, name: &str, func: &str) -> Result<Value> {
    let map = record.as_map(func)?;
    Ok(map.get(name).cloned().unwrap_or(Value::Nil))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_int_arg() {
        let args = vec![Value::Integer(3), Value::from("x")];
        assert_eq!(get_int_arg(&args, 0, "t").unwrap(), 3);
        assert!(get_int_arg(&args, 1, "t").unwrap_err().is_invalid_argument());
        assert!(get_int_arg(&args, 2, "t").is_err());
    }

    #[test]
    fn test_optional_int_arg() {
        let args = vec![Value::Nil, Value::Nil];
        assert_eq!(get_optional_int_arg(&args, 1, "t").unwrap(), None);
        assert_eq!(get_optional_int_arg(&args, 5, "t").unwrap(), None);
    }

    #[test]
    fn test_predicate_uses_truthiness() {
        let f = NativeFn::new("echo", |args| Ok(args[0].clone()));
        let mut pred = predicate(&f);
        assert!(pred(&Value::Integer(1)).unwrap());
        assert!(!pred(&Value::Integer(0)).unwrap());
        assert!(!pred(&Value::Nil).unwrap());
    }

    #[test]
    fn test_get_property() {
        let rec = Value::map_of([("n", Value::from("a"))]);
        assert_eq!(get_property(&rec, "n", "t").unwrap(), Value::from("a"));
        assert_eq!(get_property(&rec, "missing", "t").unwrap(), Value::Nil);
        assert!(get_property(&Value::Integer(1), "n", "t").is_err());
    }
}
