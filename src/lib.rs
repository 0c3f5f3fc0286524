//! underbar - コレクション操作と関数コンビネータ
//!
//! 動的な値モデル（[`Value`]）の上に、以下の操作を提供します：
//! - 選択・検索: first, last, index_of, contains, every, some
//! - 変換・集約: each, filter, reject, uniq, map, pluck, invoke, reduce,
//!   sort_by, zip, flatten, intersection, difference
//! - オブジェクト・関数: extend, defaults, once, memoize, delay, shuffle
//!
//! 各操作はRustから直接呼べる型付きの関数と、名前で引ける
//! `&[Value]` 形式のネイティブ関数（[`builtins::call`]）の2層になっています。

pub mod builtins;
pub mod error;
pub mod i18n;
pub mod value;

pub use builtins::collection::{
    contains, every, every_truthy, first, first_n, index_of, last, last_n, some, some_truthy,
};
pub use builtins::func::{memoize, once};
#[cfg(feature = "std-math")]
pub use builtins::math::{shuffle, shuffle_with};
pub use builtins::hof::{each, filter, invoke, map, reduce, reject, sort_by, sort_by_property};
pub use builtins::list::{flatten, pluck, uniq, zip};
pub use builtins::object::{defaults, extend};
pub use builtins::set::{difference, intersection};
pub use builtins::timer::{delay, EventLoop, Scheduler, TimerId};
pub use error::{ErrorCode, Result, UnderbarError};
pub use value::{Collection, NativeFn, Value};

// ========================================
// システム共通型定義
// ========================================

use ahash::RandomState;

/// underbar専用のHashMap型（im::HashMapにahashを適用）
///
/// ahashは高速な非暗号学的ハッシュ。
/// 将来的にハッシュアルゴリズムを変更する場合もここだけ修正すればOK。
pub type HashMap<K, V> = im::HashMap<K, V, RandomState>;

/// underbar専用HashMapを作成するヘルパー関数
#[inline]
pub fn new_hashmap<K, V>() -> HashMap<K, V> {
    im::HashMap::with_hasher(RandomState::new())
}
