//! マップのマージ関数
//!
//! extend, defaults

use crate::check_args;
use crate::error::{Result, UnderbarError};
use crate::value::Value;
use crate::HashMap;

/// ソースをマップとして取り出す（nilは読み飛ばし、マップ以外はエラー）
///
/// targetへ書き込む前にすべてのソースを検査する。
fn source_maps<'a>(
    sources: &'a [Value],
    func: &str,
) -> Result<Vec<&'a HashMap<String, Value>>> {
    sources
        .iter()
        .filter(|source| !source.is_nil())
        .map(|source| source.as_map(func))
        .collect()
}

fn target_map<'a>(target: &'a mut Value, func: &str) -> Result<&'a mut HashMap<String, Value>> {
    match target {
        Value::Map(map) => Ok(map),
        other => Err(UnderbarError::invalid_argument(
            func,
            "a map",
            other.type_name(),
        )),
    }
}

/// extend - ソースのキーをすべてtargetへコピー（後のソースが優先）
///
/// targetをその場で書き換え、書き換えたtargetを返す。
pub fn extend<'t>(target: &'t mut Value, sources: &[Value]) -> Result<&'t mut Value> {
    let sources = source_maps(sources, "extend")?;
    let map = target_map(target, "extend")?;
    for source in sources {
        for (key, value) in source {
            map.insert(key.clone(), value.clone());
        }
    }
    Ok(target)
}

/// defaults - targetに無いキーだけを埋める（先のソースが優先）
pub fn defaults<'t>(target: &'t mut Value, sources: &[Value]) -> Result<&'t mut Value> {
    let sources = source_maps(sources, "defaults")?;
    let map = target_map(target, "defaults")?;
    for source in sources {
        for (key, value) in source {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(target)
}

// ========================================
// ネイティブ関数
// ========================================
//
// 引数スライスは借用なので、第1引数を複製して書き換えた結果を返す。
// im::HashMapの複製は構造共有なので安価。

pub fn native_extend(args: &[Value]) -> Result<Value> {
    check_args!(args, 1.., "extend");
    let mut target = args[0].clone();
    extend(&mut target, &args[1..])?;
    Ok(target)
}

pub fn native_defaults(args: &[Value]) -> Result<Value> {
    check_args!(args, 1.., "defaults");
    let mut target = args[0].clone();
    defaults(&mut target, &args[1..])?;
    Ok(target)
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("extend", native_extend),
    ("defaults", native_defaults),
];
