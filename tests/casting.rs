use itertools::Itertools;
use ndarray_base::{
    is_allowed_cast, is_safe_cast, is_same_kind_cast, promote, safe_cast_rank, CastingMode, DType, Kind,
};

#[test]
fn safe_casts_are_reflexive() {
    for &dt in DType::all() {
        assert!(is_safe_cast(dt, dt), "{}", dt);
        assert!(is_same_kind_cast(dt, dt), "{}", dt);
        assert!(is_allowed_cast(dt, dt, CastingMode::No));
    }
}

#[test]
fn widening_is_safe() {
    assert!(is_safe_cast(DType::Int8, DType::Int16));
    assert!(is_safe_cast(DType::Uint8, DType::Int16));
    assert!(is_safe_cast(DType::Int32, DType::Float64));
    assert!(is_safe_cast(DType::Float32, DType::Complex64));
    assert!(is_safe_cast(DType::Float64, DType::Complex128));
    assert!(!is_safe_cast(DType::Int16, DType::Uint16));
    assert!(!is_safe_cast(DType::Int64, DType::Float64));
    assert!(!is_safe_cast(DType::Float64, DType::Float32));
    assert!(!is_safe_cast(DType::Complex64, DType::Float64));
    assert_eq!(safe_cast_rank(DType::Float64, DType::Int8), 0);
}

#[test]
fn same_kind_allows_narrowing_within_kind() {
    assert!(is_same_kind_cast(DType::Int64, DType::Int8));
    assert!(is_same_kind_cast(DType::Int16, DType::Uint8));
    assert!(is_same_kind_cast(DType::Float64, DType::Float32));
    assert!(!is_same_kind_cast(DType::Float32, DType::Int32));
    assert!(!is_same_kind_cast(DType::Complex64, DType::Float64));
}

#[test]
fn every_cast_allowed_when_unsafe() {
    for (&a, &b) in DType::all().iter().cartesian_product(DType::all()) {
        assert!(is_allowed_cast(a, b, CastingMode::Unsafe));
        assert_eq!(is_allowed_cast(a, b, CastingMode::Safe), is_safe_cast(a, b));
        assert_eq!(is_allowed_cast(a, b, CastingMode::Equiv), a == b);
    }
}

#[test]
fn promotion() {
    assert_eq!(promote(DType::Int8, DType::Uint8), Some(DType::Int16));
    assert_eq!(promote(DType::Int32, DType::Float32), Some(DType::Float64));
    assert_eq!(promote(DType::Float32, DType::Complex64), Some(DType::Complex64));
    assert_eq!(promote(DType::Int64, DType::Float64), Some(DType::Generic));
    assert_eq!(promote(DType::Binary, DType::Float64), None);
    for (&a, &b) in DType::all().iter().tuple_combinations() {
        assert_eq!(promote(a, b), promote(b, a), "{} {}", a, b);
    }
}

#[test]
fn kinds_partition_the_table() {
    let by_kind = DType::all().iter().map(|dt| (dt.kind(), *dt)).into_group_map();
    assert_eq!(by_kind[&Kind::Int].len(), 4);
    assert_eq!(by_kind[&Kind::Uint].len(), 5);
    assert_eq!(by_kind[&Kind::Float].len(), 2);
    assert_eq!(by_kind[&Kind::Complex].len(), 2);
    for &dt in DType::all() {
        assert_eq!(dt.is_numeric(), !matches!(dt.kind(), Kind::Binary | Kind::Generic));
        assert_eq!(DType::from_code(dt.code()), Some(dt));
        assert_eq!(dt.to_string().parse::<DType>().unwrap(), dt);
    }
}
