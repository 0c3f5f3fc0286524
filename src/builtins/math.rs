//! 乱数関数
//!
//! このモジュールは `std-math` feature でコンパイルされます。

use super::value_helpers::get_arg;
use crate::check_args;
use crate::error::Result;
use crate::value::Value;
use rand::seq::SliceRandom;
use rand::Rng;

/// shuffle - 要素をランダムに並べ替えた新しいリスト（入力は変更しない）
pub fn shuffle(seq: &Value) -> Result<Value> {
    shuffle_with(seq, &mut rand::rng())
}

/// shuffle - 乱数生成器を指定する版（シード固定で再現可能）
pub fn shuffle_with<R: Rng + ?Sized>(seq: &Value, rng: &mut R) -> Result<Value> {
    let items = seq.as_list("shuffle")?;
    let mut shuffled: Vec<Value> = items.iter().cloned().collect();
    shuffled.shuffle(rng);
    Ok(Value::from(shuffled))
}

/// shuffle
///
/// # 必須feature
/// `std-math`
pub fn native_shuffle(args: &[Value]) -> Result<Value> {
    check_args!(args, 1, "shuffle");
    shuffle(get_arg(args, 0, "shuffle")?)
}

/// 登録すべき関数のリスト
pub const FUNCTIONS: super::NativeFunctions = &[("shuffle", native_shuffle)];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ints(ns: &[i64]) -> Value {
        ns.iter().map(|n| Value::Integer(*n)).collect()
    }

    fn sorted(v: &Value) -> Vec<i64> {
        let mut ns: Vec<i64> = v
            .as_list("test")
            .unwrap()
            .iter()
            .map(|x| match x {
                Value::Integer(n) => *n,
                _ => panic!("not an integer"),
            })
            .collect();
        ns.sort();
        ns
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let input = ints(&[1, 2, 3, 4, 5]);
        let shuffled = shuffle(&input).unwrap();
        assert_eq!(sorted(&shuffled), vec![1, 2, 3, 4, 5]);
        // 入力はそのまま
        assert_eq!(input, ints(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_shuffle_with_seed_is_reproducible() {
        let input: Value = (0..20).map(Value::Integer).collect();
        let a = shuffle_with(&input, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = shuffle_with(&input, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_eventually_reorders() {
        let input = ints(&[1, 2, 3, 4, 5]);
        let mut rng = StdRng::seed_from_u64(42);
        let reordered = (0..50).any(|_| shuffle_with(&input, &mut rng).unwrap() != input);
        assert!(reordered);
    }

    #[test]
    fn test_shuffle_rejects_non_list() {
        assert!(native_shuffle(&[Value::Integer(3)])
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(shuffle(&ints(&[])).unwrap(), ints(&[]));
    }
}
