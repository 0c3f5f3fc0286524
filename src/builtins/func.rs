//! 関数ラッパー
//!
//! once, memoize
//!
//! どちらも内部状態を返り値の関数だけが所有する。状態はparking_lot::Mutexで
//! 保護するが、ラップした関数の呼び出し中はロックを保持しない。

use super::value_helpers::get_arg;
use crate::check_args;
use crate::error::Result;
use crate::value::{NativeFn, Value};
use ahash::RandomState;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

// ========================================
// once
// ========================================

/// onceの呼び出し状態
struct OnceState {
    /// まだ呼ばれていない関数（最初の呼び出しで取り出す）
    func: Option<Arc<NativeFn>>,
    /// 最初の呼び出しが成功した場合の結果
    result: Option<Value>,
}

impl OnceState {
    fn call(state: &Mutex<OnceState>, args: &[Value]) -> Result<Value> {
        let func = {
            let mut guard = state.lock();
            if let Some(result) = &guard.result {
                return Ok(result.clone());
            }
            match guard.func.take() {
                Some(func) => func,
                // 実行中の再入、または最初の呼び出しが失敗した後
                None => return Ok(Value::Nil),
            }
        };

        debug!(function = func.name(), "once: first invocation");
        let result = func.call(args)?;
        state.lock().result = Some(result.clone());
        Ok(result)
    }
}

/// once - 最初の呼び出しだけ実行し、以降はその結果を返す関数を作る
pub fn once(func: &Value) -> Result<Value> {
    let func = func.as_function("once")?.clone();
    let name = format!("once({})", func.name());
    let state = Mutex::new(OnceState {
        func: Some(func),
        result: None,
    });
    Ok(Value::function(name, move |args| OnceState::call(&state, args)))
}

// ========================================
// memoize
// ========================================

/// memoize - 第1引数をキーに結果をキャッシュする関数を作る
///
/// キーは [`Value::memo_key`]。引数なしの呼び出しはnilのキーを使う。
/// エラーはキャッシュしない。
pub fn memoize(func: &Value) -> Result<Value> {
    let func = func.as_function("memoize")?.clone();
    let name = format!("memoize({})", func.name());
    let cache: Mutex<HashMap<String, Value, RandomState>> =
        Mutex::new(HashMap::with_hasher(RandomState::new()));

    Ok(Value::function(name, move |args| {
        let key = args.first().unwrap_or(&Value::Nil).memo_key();

        if let Some(cached) = cache.lock().get(&key) {
            trace!(function = func.name(), key = %key, "memoize: cache hit");
            return Ok(cached.clone());
        }

        trace!(function = func.name(), key = %key, "memoize: cache miss");
        let result = func.call(args)?;
        cache.lock().insert(key, result.clone());
        Ok(result)
    }))
}

// ========================================
// ネイティブ関数
// ========================================

pub fn native_once(args: &[Value]) -> Result<Value> {
    check_args!(args, 1, "once");
    once(get_arg(args, 0, "once")?)
}

pub fn native_memoize(args: &[Value]) -> Result<Value> {
    check_args!(args, 1, "memoize");
    memoize(get_arg(args, 0, "memoize")?)
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("once", native_once),
    ("memoize", native_memoize),
];
