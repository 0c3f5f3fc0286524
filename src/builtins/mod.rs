//! 組み込み関数モジュール
//!
//! このモジュールは組み込み関数を機能別に整理しています:
//! - collection: 選択・検索（first, last, indexOf, contains, every, some）
//! - hof: 高階関数（each, filter, reject, map, reduce, invoke, sortBy）
//! - list: リスト変換（uniq, pluck, zip, flatten）
//! - set: 集合演算（intersection, difference）
//! - object: マップのマージ（extend, defaults）
//! - func: 関数ラッパー（once, memoize）
//! - timer: 遅延実行（delay, EventLoop）
//! - math: 乱数（shuffle）
//!
//! 各モジュールは型付き関数と、`&[Value]` を受け取る `native_*` 関数を持ち、
//! `native_*` は名前付きテーブル `FUNCTIONS` で公開されます。

pub mod collection;
pub mod func;
pub mod hof;
pub mod list;
pub mod macros;
#[cfg(feature = "std-math")]
pub mod math;
pub mod object;
pub mod set;
pub mod timer;
pub mod value_helpers;

use crate::error::{Result, UnderbarError};
use crate::i18n::{fmt_msg, MsgKey};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// ネイティブ関数の型
pub type NativeFnPtr = fn(&[Value]) -> Result<Value>;

/// 名前とネイティブ関数の対応表
pub type NativeFunctions = &'static [(&'static str, NativeFnPtr)];

/// 登録テーブルの一覧
fn tables() -> Vec<NativeFunctions> {
    #[allow(unused_mut)]
    let mut tables = vec![
        collection::FUNCTIONS,
        hof::FUNCTIONS,
        list::FUNCTIONS,
        set::FUNCTIONS,
        object::FUNCTIONS,
        func::FUNCTIONS,
    ];
    #[cfg(feature = "std-math")]
    tables.push(math::FUNCTIONS);
    tables
}

static REGISTRY: LazyLock<HashMap<&'static str, NativeFnPtr>> = LazyLock::new(|| {
    tables()
        .into_iter()
        .flat_map(|table| table.iter().copied())
        .collect()
});

/// 登録されている関数名（ソート済み）
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

/// 名前から関数値を取得
pub fn lookup(name: &str) -> Option<Value> {
    REGISTRY
        .get_key_value(name)
        .map(|(name, func)| {
            let func = *func;
            Value::function(*name, move |args| func(args))
        })
}

/// 名前で関数を呼び出す
///
/// 未定義の名前には、編集距離の近い候補をサジェストとして付ける。
pub fn call(name: &str, args: &[Value]) -> Result<Value> {
    match REGISTRY.get(name) {
        Some(func) => func(args),
        None => {
            let mut err = UnderbarError::unknown_function(name);
            if let Some(similar) = find_similar_name(name, 2) {
                err = err.with_suggestion(fmt_msg(MsgKey::DidYouMean, &[similar]));
            }
            Err(err)
        }
    }
}

/// 編集距離がmax_distance以内で最も近い関数名
fn find_similar_name(target: &str, max_distance: usize) -> Option<&'static str> {
    names()
        .into_iter()
        .map(|name| (strsim::levenshtein(target, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}
