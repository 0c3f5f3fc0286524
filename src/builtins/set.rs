//! 集合演算関数
//!
//! 要素の比較は厳密等価。Floatや関数値も要素になり得るため、
//! HashSetではなく線形探索で判定する。

use super::list::dedup_strict;
use crate::check_args;
use crate::error::Result;
use crate::value::Value;
use im::Vector;

fn contains_strict(items: &Vector<Value>, target: &Value) -> bool {
    items.iter().any(|item| item.strict_equals(target))
}

/// intersection - すべてのシーケンスに含まれる要素（重複なし、最初のシーケンスの順序）
pub fn intersection(seqs: &[Value]) -> Result<Value> {
    let lists = seqs
        .iter()
        .map(|seq| seq.as_list("intersection"))
        .collect::<Result<Vec<_>>>()?;

    let Some((head, rest)) = lists.split_first() else {
        return Ok(Value::List(Vector::new()));
    };

    let shared = head
        .iter()
        .filter(|item| rest.iter().all(|other| contains_strict(other, item)));
    Ok(Value::List(dedup_strict(shared)))
}

/// difference - 他のどのシーケンスにも含まれない要素（重複はそのまま残す）
pub fn difference(seq: &Value, others: &[Value]) -> Result<Value> {
    let items = seq.as_list("difference")?;
    let exclude = others
        .iter()
        .map(|other| other.as_list("difference"))
        .collect::<Result<Vec<_>>>()?;

    let values = items
        .iter()
        .filter(|item| !exclude.iter().any(|other| contains_strict(other, item)))
        .cloned()
        .collect();
    Ok(Value::List(values))
}

// ========================================
// ネイティブ関数
// ========================================

/// intersection - 可変長のリストを受け取る
pub fn native_intersection(args: &[Value]) -> Result<Value> {
    intersection(args)
}

/// difference - 第1引数から第2引数以降を除く
pub fn native_difference(args: &[Value]) -> Result<Value> {
    check_args!(args, 1.., "difference");
    difference(&args[0], &args[1..])
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[
    ("intersection", native_intersection),
    ("difference", native_difference),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Value {
        ns.iter().map(|n| Value::Integer(*n)).collect()
    }

    #[test]
    fn test_intersection() {
        let result = intersection(&[
            ints(&[1, 2, 3, 2]),
            ints(&[101, 2, 1, 10]),
            ints(&[2, 1]),
        ])
        .unwrap();
        assert_eq!(result, ints(&[1, 2]));
        assert_eq!(intersection(&[]).unwrap(), ints(&[]));
        assert_eq!(intersection(&[ints(&[3, 3, 4])]).unwrap(), ints(&[3, 4]));
    }

    #[test]
    fn test_intersection_is_strict() {
        let mixed: Value = vec![Value::Integer(1), Value::from("2")].into();
        let result = intersection(&[mixed, ints(&[1, 2])]).unwrap();
        assert_eq!(result, ints(&[1]));
    }

    #[test]
    fn test_difference_keeps_duplicates() {
        let result = difference(&ints(&[1, 2, 3, 4, 5, 1]), &[ints(&[5, 2, 10])]).unwrap();
        assert_eq!(result, ints(&[1, 3, 4, 1]));
        assert_eq!(
            difference(&ints(&[1, 2]), &[]).unwrap(),
            ints(&[1, 2])
        );
    }

    #[test]
    fn test_native_difference_errors() {
        assert!(native_difference(&[]).unwrap_err().is_invalid_argument());
        assert!(native_difference(&[ints(&[1]), Value::Integer(1)])
            .unwrap_err()
            .is_invalid_argument());
    }
}
