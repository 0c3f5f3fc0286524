use crate::error::{Result, UnderbarError};
use crate::HashMap;
use im::Vector;
use std::fmt;
use std::sync::Arc;

/// underbarが扱う値
///
/// 順序付きシーケンスは `List`、文字列キーのマッピングは `Map`。
/// `Nil` は「値なし」を表す（空リストへの `first`、`zip` の欠損位置など）。
#[derive(Clone)]
pub enum Value {
    /// nil値（値なし）
    Nil,
    /// bool値
    Bool(bool),
    /// 整数
    Integer(i64),
    /// 浮動小数点数
    Float(f64),
    /// 文字列
    String(String),
    /// 順序付きシーケンス
    List(Vector<Value>),
    /// マッピング（キーは文字列）
    Map(HashMap<String, Value>),
    /// 関数
    Function(Arc<NativeFn>),
}

/// 関数本体の型
pub type FnBody = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// 関数値（名前付きクロージャ）
///
/// 利用側が渡すイテレータ・述語も、once/memoizeが返す関数も同じ型。
pub struct NativeFn {
    name: String,
    body: Box<FnBody>,
}

impl NativeFn {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        NativeFn {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({})", self.name)
    }
}

/// シーケンスとマッピングを統一的に走査するためのビュー
#[derive(Debug, Clone, Copy)]
pub enum Collection<'a> {
    Seq(&'a Vector<Value>),
    Map(&'a HashMap<String, Value>),
}

impl<'a> Collection<'a> {
    pub fn len(&self) -> usize {
        match self {
            Collection::Seq(items) => items.len(),
            Collection::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 要素の値を走査順に返す
    pub fn values(&self) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
        match *self {
            Collection::Seq(items) => Box::new(items.iter()),
            Collection::Map(map) => Box::new(map.values()),
        }
    }

    /// (キー, 値) を返す。キーはシーケンスなら `Integer(index)`、マッピングなら `String(key)`
    pub fn entries(&self) -> Box<dyn Iterator<Item = (Value, &'a Value)> + 'a> {
        match *self {
            Collection::Seq(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Value::Integer(i as i64), v)),
            ),
            Collection::Map(map) => {
                Box::new(map.iter().map(|(k, v)| (Value::String(k.clone()), v)))
            }
        }
    }
}

impl Value {
    /// 関数値を作成
    pub fn function<F>(name: impl Into<String>, body: F) -> Value
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Value::Function(Arc::new(NativeFn::new(name, body)))
    }

    /// (キー, 値) の組からマップを作成
    pub fn map_of<K, I>(pairs: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map = crate::new_hashmap();
        for (k, v) in pairs {
            map.insert(k.into(), v);
        }
        Value::Map(map)
    }

    /// 真偽値判定
    ///
    /// nil, false, 0, 0.0, NaN, 空文字列がfalsy。それ以外はすべてtruthy。
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Function(_) => true,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// 型名を取得（エラーメッセージ用）
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
        }
    }

    /// 厳密等価（型変換なし）
    ///
    /// 同じ型かつ同じ中身の場合のみ等しい。`Integer(1)` と `Float(1.0)` は別物、
    /// NaNは自分自身とも等しくない。関数は同一インスタンスの場合のみ等しい。
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.strict_equals(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|other| v.strict_equals(other)))
            }
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// memoize用のキャッシュキー
    ///
    /// 異なる型のキーが衝突しないよう、型ごとに表記を変える：
    /// - Integer: "123"
    /// - Float: "1.0"（常に小数点または指数を含む）
    /// - String: "\"text\""
    /// - Nil: "nil"
    /// - Bool: "true" or "false"
    /// - それ以外: "#" + 表示形式
    pub fn memo_key(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => format!("{:?}", f),
            Value::String(s) => format!("{:?}", s),
            Value::Function(f) => format!("#fn:{:p}", Arc::as_ptr(f)),
            Value::List(_) | Value::Map(_) => format!("#{}", self),
        }
    }

    /// List/Mapを走査用ビューとして取得
    pub fn as_collection(&self, func: &str) -> Result<Collection<'_>> {
        match self {
            Value::List(items) => Ok(Collection::Seq(items)),
            Value::Map(map) => Ok(Collection::Map(map)),
            _ => Err(UnderbarError::invalid_argument(
                func,
                "a list or map",
                self.type_name(),
            )),
        }
    }

    /// Listの中身を取得
    pub fn as_list(&self, func: &str) -> Result<&Vector<Value>> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(UnderbarError::invalid_argument(
                func,
                "a list",
                self.type_name(),
            )),
        }
    }

    /// Mapの中身を取得
    pub fn as_map(&self, func: &str) -> Result<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Ok(map),
            _ => Err(UnderbarError::invalid_argument(
                func,
                "a map",
                self.type_name(),
            )),
        }
    }

    /// 関数を取得
    pub fn as_function(&self, func: &str) -> Result<&Arc<NativeFn>> {
        match self {
            Value::Function(f) => Ok(f),
            _ => Err(UnderbarError::invalid_argument(
                func,
                "a function",
                self.type_name(),
            )),
        }
    }
}

/// ValueのPartialEqは厳密等価
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Function(func) => write!(f, "Function({})", func.name()),
            _ => write!(f, "{}", self),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                // 表示を安定させるためキー順に並べる
                let mut keys: Vec<&String> = m.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, k) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(v) = m.get(k) {
                        write!(f, "{}: {}", k, v)?;
                    }
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "#<function:{}>", func.name()),
        }
    }
}

// ========================================
// 変換
// ========================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }
}

impl From<Vector<Value>> for Value {
    fn from(items: Vector<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}
