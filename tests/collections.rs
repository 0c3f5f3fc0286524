//! コレクション操作の統合テスト
//!
//! 公開APIだけを使い、入力を変更しないこと・要素の対応関係などの性質を確認する。

use underbar::{
    contains, difference, every_truthy, filter, first, flatten, index_of, intersection, last_n,
    map, pluck, reduce, reject, sort_by_property, uniq, zip, Result, Value,
};

fn ints(ns: &[i64]) -> Value {
    ns.iter().map(|n| Value::Integer(*n)).collect()
}

fn len(v: &Value) -> usize {
    v.as_list("test").map(|items| items.len()).unwrap_or(0)
}

fn sample() -> Value {
    Value::from(vec![
        Value::Integer(3),
        Value::from("three"),
        Value::Integer(1),
        Value::Nil,
        Value::Integer(3),
        Value::Float(2.5),
        Value::Bool(false),
    ])
}

#[test]
fn test_map_identity_preserves_input() {
    let s = sample();
    let before = s.clone();
    let mapped = map(&s, |v| Ok(v.clone())).unwrap();
    assert_eq!(mapped, s);
    assert_eq!(s, before);
}

#[test]
fn test_filter_reject_partition() {
    let s = sample();
    let p = |v: &Value| -> Result<bool> { Ok(matches!(v, Value::Integer(_))) };
    let kept = filter(&s, p).unwrap();
    let dropped = reject(&s, p).unwrap();
    assert_eq!(len(&kept) + len(&dropped), len(&s));

    for item in s.as_list("test").unwrap() {
        let in_kept = contains(&kept, item).unwrap();
        let in_dropped = contains(&dropped, item).unwrap();
        assert!(in_kept != in_dropped, "{} must be in exactly one side", item);
    }
}

#[test]
fn test_intersection_with_itself_is_uniq() {
    let s = sample();
    let both = intersection(&[s.clone(), s.clone()]).unwrap();
    for item in s.as_list("test").unwrap() {
        assert!(contains(&both, item).unwrap());
    }
    assert_eq!(both, uniq(&s).unwrap());
}

#[test]
fn test_zip_flatten_examples() {
    let abc = Value::from(vec![Value::from("a"), Value::from("b"), Value::from("c")]);
    assert_eq!(
        zip(&[abc, ints(&[1, 2])]).unwrap(),
        Value::from(vec![
            Value::from(vec![Value::from("a"), Value::Integer(1)]),
            Value::from(vec![Value::from("b"), Value::Integer(2)]),
            Value::from(vec![Value::from("c"), Value::Nil]),
        ])
    );

    let deep = Value::from(vec![
        Value::Integer(1),
        Value::from(vec![
            Value::Integer(2),
            Value::from(vec![Value::Integer(3), ints(&[4])]),
            Value::Integer(5),
        ]),
    ]);
    assert_eq!(flatten(&deep, false).unwrap(), ints(&[1, 2, 3, 4, 5]));
}

#[test]
fn test_sort_by_property_example() {
    let b = Value::map_of([("n", Value::from("b"))]);
    let a = Value::map_of([("n", Value::from("a"))]);
    let sorted = sort_by_property(&Value::from(vec![b.clone(), a.clone()]), "n").unwrap();
    assert_eq!(sorted, Value::from(vec![a, b]));
}

#[test]
fn test_reduce_examples() {
    let add = |acc: Value, item: &Value| match (&acc, item) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
        _ => Err("integers only".into()),
    };
    assert_eq!(reduce(&ints(&[1, 2, 3]), add, None).unwrap(), Value::Integer(6));
    assert_eq!(
        reduce(&ints(&[]), add, Some(Value::Integer(10))).unwrap(),
        Value::Integer(10)
    );
}

#[test]
fn test_selection_edges() {
    assert_eq!(first(&ints(&[])).unwrap(), Value::Nil);
    assert_eq!(last_n(&ints(&[1, 2, 3]), 2).unwrap(), ints(&[2, 3]));
    assert_eq!(index_of(&ints(&[5, 6]), &Value::Integer(6)).unwrap(), Some(1));
    assert!(every_truthy(&ints(&[])).unwrap());
}

#[test]
fn test_pluck_and_difference() {
    let stooges = Value::from(vec![
        Value::map_of([("name", Value::from("moe")), ("age", Value::Integer(40))]),
        Value::map_of([("name", Value::from("larry")), ("age", Value::Integer(50))]),
    ]);
    assert_eq!(
        pluck(&stooges, "name").unwrap(),
        Value::from(vec![Value::from("moe"), Value::from("larry")])
    );
    assert_eq!(
        difference(&ints(&[1, 2, 3, 4, 5]), &[ints(&[5, 2, 10])]).unwrap(),
        ints(&[1, 3, 4])
    );
}

#[test]
fn test_invalid_shapes_fail_before_processing() {
    let mut calls = 0;
    let err = filter(&Value::Integer(1), |_| {
        calls += 1;
        Ok(true)
    })
    .unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(calls, 0);
}

#[cfg(feature = "std-math")]
#[test]
fn test_shuffle_is_permutation_of_input() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let input = ints(&[1, 2, 3, 4, 5]);
    let mut rng = StdRng::seed_from_u64(2024);
    let shuffled = underbar::shuffle_with(&input, &mut rng).unwrap();
    assert_eq!(len(&shuffled), 5);
    for item in input.as_list("test").unwrap() {
        assert!(contains(&shuffled, item).unwrap());
    }
    assert_eq!(input, ints(&[1, 2, 3, 4, 5]));
}
