//! 選択・検索関数
//!
//! first, last, indexOf, contains, every, some

use super::value_helpers::{get_arg, get_function_arg, get_optional_int_arg, predicate};
use crate::check_args;
use crate::error::Result;
use crate::value::Value;

// ========================================
// 型付きAPI
// ========================================

/// first - リストの最初の要素（空ならnil）
pub fn first(seq: &Value) -> Result<Value> {
    let items = seq.as_list("first")?;
    Ok(items.front().cloned().unwrap_or(Value::Nil))
}

/// first - 最初のn要素をリストで返す（n <= 0なら空リスト）
pub fn first_n(seq: &Value, n: i64) -> Result<Value> {
    let items = seq.as_list("first")?;
    let count = n.clamp(0, items.len() as i64) as usize;
    Ok(Value::List(items.clone().slice(..count)))
}

/// last - リストの最後の要素（空ならnil）
pub fn last(seq: &Value) -> Result<Value> {
    let items = seq.as_list("last")?;
    Ok(items.back().cloned().unwrap_or(Value::Nil))
}

/// last - 最後のn要素を元の順序のままリストで返す
pub fn last_n(seq: &Value, n: i64) -> Result<Value> {
    let items = seq.as_list("last")?;
    let count = n.clamp(0, items.len() as i64) as usize;
    Ok(Value::List(items.clone().slice(items.len() - count..)))
}

/// indexOf - targetと厳密等価な最初の要素の位置
pub fn index_of(seq: &Value, target: &Value) -> Result<Option<usize>> {
    let items = seq.as_list("indexOf")?;
    Ok(items.iter().position(|item| item.strict_equals(target)))
}

/// contains - リストの要素またはマップの値にtargetが含まれるか
pub fn contains(collection: &Value, target: &Value) -> Result<bool> {
    let coll = collection.as_collection("contains")?;
    let found = coll.values().any(|item| item.strict_equals(target));
    Ok(found)
}

/// every - すべての要素が述語を満たすか（空ならtrue）
pub fn every<F>(collection: &Value, mut predicate: F) -> Result<bool>
where
    F: FnMut(&Value) -> Result<bool>,
{
    let coll = collection.as_collection("every")?;
    for item in coll.values() {
        if !predicate(item)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// every - 述語省略時の形（要素自体のtruthinessで判定）
pub fn every_truthy(collection: &Value) -> Result<bool> {
    every(collection, |item| Ok(item.is_truthy()))
}

/// some - いずれかの要素が述語を満たすか（空ならfalse）
pub fn some<F>(collection: &Value, mut predicate: F) -> Result<bool>
where
    F: FnMut(&Value) -> Result<bool>,
{
    let coll = collection.as_collection("some")?;
    for item in coll.values() {
        if predicate(item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// some - 述語省略時の形
pub fn some_truthy(collection: &Value) -> Result<bool> {
    some(collection, |item| Ok(item.is_truthy()))
}

// ========================================
// ネイティブ関数
// ========================================

/// first - (first list) / (first list n)
pub fn native_first(args: &[Value]) -> Result<Value> {
    check_args!(args, 1..=2, "first");
    match get_optional_int_arg(args, 1, "first")? {
        None => first(&args[0]),
        Some(n) => first_n(&args[0], n),
    }
}

/// last - (last list) / (last list n)
pub fn native_last(args: &[Value]) -> Result<Value> {
    check_args!(args, 1..=2, "last");
    match get_optional_int_arg(args, 1, "last")? {
        None => last(&args[0]),
        Some(n) => last_n(&args[0], n),
    }
}

/// indexOf - 見つからなければ-1
pub fn native_index_of(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "indexOf");
    let index = index_of(&args[0], &args[1])?;
    Ok(Value::Integer(index.map(|i| i as i64).unwrap_or(-1)))
}

pub fn native_contains(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "contains");
    contains(&args[0], &args[1]).map(Value::Bool)
}

/// every - 述語はnilまたは省略可
pub fn native_every(args: &[Value]) -> Result<Value> {
    check_args!(args, 1..=2, "every");
    let collection = get_arg(args, 0, "every")?;
    match args.get(1) {
        None | Some(Value::Nil) => every_truthy(collection).map(Value::Bool),
        Some(_) => {
            let func = get_function_arg(args, 1, "every")?;
            every(collection, predicate(func)).map(Value::Bool)
        }
    }
}

/// some - 述語はnilまたは省略可
pub fn native_some(args: &[Value]) -> Result<Value> {
    check_args!(args, 1..=2, "some");
    let collection = get_arg(args, 0, "some")?;
    match args.get(1) {
        None | Some(Value::Nil) => some_truthy(collection).map(Value::Bool),
        Some(_) => {
            let func = get_function_arg(args, 1, "some")?;
            some(collection, predicate(func)).map(Value::Bool)
        }
    }
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("first", native_first),
    ("last", native_last),
    ("indexOf", native_index_of),
    ("contains", native_contains),
    ("every", native_every),
    ("some", native_some),
];
