//! リスト変換関数
//!
//! uniq, pluck, zip, flatten

use super::value_helpers::{get_arg, get_property};
use crate::check_args;
use crate::error::{Result, UnderbarError};
use crate::value::Value;
use im::Vector;

/// uniq - 重複を除いたリスト（最初の出現を残す、厳密等価で比較）
pub fn uniq(seq: &Value) -> Result<Value> {
    let items = seq.as_list("uniq")?;
    Ok(Value::List(dedup_strict(items.iter())))
}

/// 厳密等価での重複除去（順序保持）
///
/// Floatや関数も扱えるよう、ハッシュではなく線形探索で比較する。
pub(crate) fn dedup_strict<'a>(items: impl Iterator<Item = &'a Value>) -> Vector<Value> {
    let mut result: Vector<Value> = Vector::new();
    for item in items {
        if !result.iter().any(|seen| seen.strict_equals(item)) {
            result.push_back(item.clone());
        }
    }
    result
}

/// pluck - 各レコードから指定プロパティの値を取り出す（無ければnil）
pub fn pluck(seq: &Value, property: &str) -> Result<Value> {
    let items = seq.as_list("pluck")?;
    items
        .iter()
        .map(|record| get_property(record, property, "pluck"))
        .collect::<Result<Vector<Value>>>()
        .map(Value::List)
}

/// zip - 同じ位置の要素をまとめる
///
/// 結果の長さは最長の入力に合わせ、短い入力の欠けた位置はnilで埋める。
pub fn zip(seqs: &[Value]) -> Result<Value> {
    let lists = seqs
        .iter()
        .map(|seq| seq.as_list("zip"))
        .collect::<Result<Vec<_>>>()?;
    let longest = lists.iter().map(|items| items.len()).max().unwrap_or(0);

    let rows = (0..longest)
        .map(|i| {
            lists
                .iter()
                .map(|items| items.get(i).cloned().unwrap_or(Value::Nil))
                .collect::<Value>()
        })
        .collect();
    Ok(Value::List(rows))
}

/// flatten - ネストしたリストを平坦化（深さ優先・左から右）
///
/// shallowがtrueなら1段だけ展開する。ネストの深さに関係なく
/// 再帰せず、明示的なスタックで走査する。
pub fn flatten(nested: &Value, shallow: bool) -> Result<Value> {
    let items = nested.as_list("flatten")?;
    let mut result = Vector::new();
    // (その段の残り要素, 段の深さ)
    let mut stack = vec![(items.iter(), 0usize)];

    loop {
        let Some((iter, depth)) = stack.last_mut() else {
            break;
        };
        let depth = *depth;
        match iter.next() {
            Some(Value::List(inner)) if !shallow || depth == 0 => {
                stack.push((inner.iter(), depth + 1));
            }
            Some(item) => result.push_back(item.clone()),
            None => {
                stack.pop();
            }
        }
    }
    Ok(Value::List(result))
}

// ========================================
// ネイティブ関数
// ========================================

pub fn native_uniq(args: &[Value]) -> Result<Value> {
    check_args!(args, 1, "uniq");
    uniq(&args[0])
}

/// pluck - (pluck records "name")
pub fn native_pluck(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "pluck");
    match get_arg(args, 1, "pluck")? {
        Value::String(property) => pluck(&args[0], property),
        other => Err(UnderbarError::invalid_argument(
            "pluck",
            "a property name",
            other.type_name(),
        )),
    }
}

/// zip - 可変長のリストを受け取る
pub fn native_zip(args: &[Value]) -> Result<Value> {
    zip(args)
}

/// flatten - 第2引数がtruthyなら1段だけ展開
pub fn native_flatten(args: &[Value]) -> Result<Value> {
    check_args!(args, 1..=2, "flatten");
    let shallow = args.get(1).is_some_and(Value::is_truthy);
    flatten(&args[0], shallow)
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("uniq", native_uniq),
    ("pluck", native_pluck),
    ("zip", native_zip),
    ("flatten", native_flatten),
];
