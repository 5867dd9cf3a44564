use chart_engine::data_types::Range;
use chart_engine::PlotError;

#[test]
fn test_range_rejects_reversed_bounds() {
    assert!(matches!(Range::new(2.0, 1.0), Err(PlotError::InvalidArgument(_))));
    assert!(Range::new(f64::NAN, 1.0).is_err());
    let zero = Range::new(3.0, 3.0).unwrap();
    assert_eq!(zero.length(), 0.0);
    assert!(Range::new_positive_length(3.0, 3.0).is_err());
}

#[test]
fn test_range_basic_queries() {
    let r = Range::new(-2.0, 6.0).unwrap();
    assert_eq!(r.length(), 8.0);
    assert_eq!(r.central_value(), 2.0);
    assert!(r.contains(-2.0));
    assert!(r.contains(6.0));
    assert!(!r.contains(6.5));
    assert_eq!(r.constrain(10.0), 6.0);
    assert!(r.intersects(&Range::new(5.0, 9.0).unwrap()));
    assert!(!r.intersects(&Range::new(7.0, 9.0).unwrap()));
}

#[test]
fn test_combine_with_none() {
    let a = Range::new(0.0, 1.0).unwrap();
    let b = Range::new(5.0, 6.0).unwrap();
    assert_eq!(Range::combine(None, Some(b)), Some(b));
    assert_eq!(Range::combine(Some(a), None), Some(a));
    assert_eq!(Range::combine(None, None), None);
    assert_eq!(Range::combine(Some(a), Some(b)), Some(Range::new(0.0, 6.0).unwrap()));
}

#[test]
fn test_expand_to_include_ignores_non_finite() {
    let r = Range::expand_to_include(None, 4.0).unwrap();
    assert_eq!((r.lower(), r.upper()), (4.0, 4.0));
    let r = Range::expand_to_include(Some(r), -1.0).unwrap();
    assert_eq!((r.lower(), r.upper()), (-1.0, 4.0));
    assert_eq!(Range::expand_to_include(Some(r), f64::NAN), Some(r));
}

#[test]
fn test_expand_by_margins() {
    let r = Range::new(0.0, 10.0).unwrap().expand(0.1, 0.2).unwrap();
    assert!((r.lower() + 1.0).abs() < 1e-12);
    assert!((r.upper() - 12.0).abs() < 1e-12);
}

#[test]
fn test_from_values_skips_nan() {
    let r = Range::from_values([3.0, f64::NAN, -1.0, 7.5]).unwrap();
    assert_eq!((r.lower(), r.upper()), (-1.0, 7.5));
    assert!(Range::from_values(std::iter::empty()).is_none());
    assert!(Range::from_values([f64::NAN]).is_none());
}

#[test]
fn test_shift_and_centered() {
    let r = Range::new(0.0, 4.0).unwrap().shift(1.5);
    assert_eq!((r.lower(), r.upper()), (1.5, 5.5));
    let c = Range::centered(10.0, 4.0).unwrap();
    assert_eq!((c.lower(), c.upper()), (8.0, 12.0));
}

#[test]
fn test_range_json_rejects_invalid_pair() {
    let r: Range = serde_json::from_str("[1.0, 2.0]").unwrap();
    assert_eq!(r, Range::new(1.0, 2.0).unwrap());
    assert!(serde_json::from_str::<Range>("[2.0, 1.0]").is_err());
}
