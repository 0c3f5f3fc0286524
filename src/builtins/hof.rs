//! 高階関数
//!
//! each, filter, reject, map, reduce, invoke, sortBy
//!
//! どの関数も入力コレクションを変更せず、結果は新しいリストとして返す。

use super::value_helpers::{get_arg, get_function_arg, get_property, mapper, predicate};
use crate::check_args;
use crate::error::{Result, UnderbarError};
use crate::value::Value;
use im::Vector;
use std::cmp::Ordering;

// ========================================
// 型付きAPI
// ========================================

/// each - 各要素に iterator(value, key, collection) を呼ぶ
///
/// キーはリストならインデックス、マップなら文字列キー。
/// iteratorがエラーを返した時点で走査を中断する。
pub fn each<F>(collection: &Value, mut iterator: F) -> Result<()>
where
    F: FnMut(&Value, &Value, &Value) -> Result<()>,
{
    let coll = collection.as_collection("each")?;
    for (key, value) in coll.entries() {
        iterator(value, &key, collection)?;
    }
    Ok(())
}

/// filter - 述語を満たす要素だけのリスト
pub fn filter<F>(collection: &Value, mut predicate: F) -> Result<Value>
where
    F: FnMut(&Value) -> Result<bool>,
{
    let coll = collection.as_collection("filter")?;
    let mut results = Vector::new();
    for item in coll.values() {
        if predicate(item)? {
            results.push_back(item.clone());
        }
    }
    Ok(Value::List(results))
}

/// reject - 述語を満たさない要素だけのリスト（filterの補集合）
pub fn reject<F>(collection: &Value, mut predicate: F) -> Result<Value>
where
    F: FnMut(&Value) -> Result<bool>,
{
    let coll = collection.as_collection("reject")?;
    let mut results = Vector::new();
    for item in coll.values() {
        if !predicate(item)? {
            results.push_back(item.clone());
        }
    }
    Ok(Value::List(results))
}

/// map - 各要素に関数を適用したリスト
pub fn map<F>(collection: &Value, mut f: F) -> Result<Value>
where
    F: FnMut(&Value) -> Result<Value>,
{
    let coll = collection.as_collection("map")?;
    let mut results = Vector::new();
    for item in coll.values() {
        results.push_back(f(item)?);
    }
    Ok(Value::List(results))
}

/// reduce - 左からの畳み込み
///
/// 初期値の扱い：
/// - initialがあればそこから畳み込む
/// - 省略時は最初の要素を初期値にして2番目から畳み込む
/// - 空コレクションで省略時はnil、初期値ありならその初期値をそのまま返す
pub fn reduce<F>(collection: &Value, mut iterator: F, initial: Option<Value>) -> Result<Value>
where
    F: FnMut(Value, &Value) -> Result<Value>,
{
    let coll = collection.as_collection("reduce")?;
    let mut items = coll.values();

    let mut acc = match initial {
        Some(init) => init,
        None => match items.next() {
            Some(seed) => seed.clone(),
            None => return Ok(Value::Nil),
        },
    };

    for item in items {
        acc = iterator(acc, item)?;
    }
    Ok(acc)
}

/// invoke - 各要素でメソッドを呼び、戻り値のリストを返す
///
/// methodが文字列なら要素（マップ）の同名プロパティに入った関数を、
/// 関数ならその関数を呼ぶ。どちらも要素自身を第1引数（レシーバ）として渡し、
/// argsをその後ろに続ける。
pub fn invoke(seq: &Value, method: &Value, args: &[Value]) -> Result<Value> {
    let items = seq.as_list("invoke")?;
    let mut results = Vector::new();
    for item in items {
        let mut call_args = Vec::with_capacity(args.len() + 1);
        call_args.push(item.clone());
        call_args.extend_from_slice(args);

        let result = match method {
            Value::String(name) => {
                let record = item.as_map("invoke")?;
                match record.get(name.as_str()) {
                    Some(Value::Function(func)) => func.call(&call_args)?,
                    _ => return Err(UnderbarError::method_not_found("invoke", name)),
                }
            }
            Value::Function(func) => func.call(&call_args)?,
            other => {
                return Err(UnderbarError::invalid_argument(
                    "invoke",
                    "a method name or function",
                    other.type_name(),
                ))
            }
        };
        results.push_back(result);
    }
    Ok(Value::List(results))
}

/// sortBy - キー関数の値で昇順に安定ソート
pub fn sort_by<F>(collection: &Value, mut key_fn: F) -> Result<Value>
where
    F: FnMut(&Value) -> Result<Value>,
{
    let coll = collection.as_collection("sortBy")?;
    // 各要素のキーを計算（容量事前確保）
    let mut keyed: Vec<(Value, Value)> = Vec::with_capacity(coll.len());
    for item in coll.values() {
        let key = key_fn(item)?;
        keyed.push((key, item.clone()));
    }

    // Vec::sort_byは安定ソート
    keyed.sort_by(|a, b| compare_keys(&a.0, &b.0));

    Ok(keyed.into_iter().map(|(_, v)| v).collect())
}

/// sortBy - 各要素（マップ）の指定プロパティでソート
pub fn sort_by_property(collection: &Value, property: &str) -> Result<Value> {
    sort_by(collection, |item| get_property(item, property, "sortBy"))
}

/// ソートキーの種類ごとの順位（nilは最後）
fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Bool(_) => 0,
        Value::Integer(_) | Value::Float(_) => 1,
        Value::String(_) => 2,
        Value::List(_) | Value::Map(_) | Value::Function(_) => 3,
        Value::Nil => 4,
    }
}

/// 数値キーの比較（NaNはすべての数値より後ろ、NaN同士は等価）
fn compare_numbers(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// ソートキーの比較
///
/// 数値同士はf64として比較、文字列は辞書順、
/// 種類が違う場合は種類の順位で比較する。
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Integer(x), Value::Float(y)) => compare_numbers(*x as f64, *y),
        (Value::Float(x), Value::Integer(y)) => compare_numbers(*x, *y as f64),
        (Value::Float(x), Value::Float(y)) => compare_numbers(*x, *y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

// ========================================
// ネイティブ関数
// ========================================

/// each - 関数を (value, key, collection) で呼ぶ。戻り値はnil
pub fn native_each(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "each");
    let func = get_function_arg(args, 1, "each")?;
    each(&args[0], |value, key, collection| {
        func.call(&[value.clone(), key.clone(), collection.clone()])
            .map(|_| ())
    })?;
    Ok(Value::Nil)
}

pub fn native_filter(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "filter");
    let func = get_function_arg(args, 1, "filter")?;
    filter(&args[0], predicate(func))
}

pub fn native_reject(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "reject");
    let func = get_function_arg(args, 1, "reject")?;
    reject(&args[0], predicate(func))
}

pub fn native_map(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "map");
    let func = get_function_arg(args, 1, "map")?;
    map(&args[0], mapper(func))
}

/// reduce - (reduce coll f) / (reduce coll f init)
///
/// 他の省略可能な引数と同じく、末尾のnilは省略とみなす。
pub fn native_reduce(args: &[Value]) -> Result<Value> {
    check_args!(args, 2..=3, "reduce");
    let func = get_function_arg(args, 1, "reduce")?;
    let initial = args.get(2).filter(|init| !init.is_nil()).cloned();
    reduce(
        &args[0],
        |acc, item| func.call(&[acc, item.clone()]),
        initial,
    )
}

/// invoke - (invoke list method arg...)
pub fn native_invoke(args: &[Value]) -> Result<Value> {
    check_args!(args, 2.., "invoke");
    invoke(&args[0], &args[1], &args[2..])
}

/// sortBy - 基準はプロパティ名または関数
pub fn native_sort_by(args: &[Value]) -> Result<Value> {
    check_args!(args, 2, "sortBy");
    match get_arg(args, 1, "sortBy")? {
        Value::String(property) => sort_by_property(&args[0], property),
        Value::Function(func) => sort_by(&args[0], mapper(func)),
        other => Err(UnderbarError::invalid_argument(
            "sortBy",
            "a property name or function",
            other.type_name(),
        )),
    }
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("each", native_each),
    ("filter", native_filter),
    ("reject", native_reject),
    ("map", native_map),
    ("reduce", native_reduce),
    ("invoke", native_invoke),
    ("sortBy", native_sort_by),
];
