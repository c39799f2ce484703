use crate::error::ScoreError;
use crate::score::Score;

#[cfg(feature = "decimal")]
use rust_decimal::Decimal;

#[test]
fn add_then_subtract_is_identity() {
    let a = Score::bendable(vec![-3i64, 7], vec![120]);
    let b = Score::bendable(vec![-20i64, 1], vec![-999]);

    let round_trip = a.add(&b).unwrap().subtract(&b).unwrap();
    assert_eq!(round_trip, a);
}

#[test]
fn add_includes_init_level() {
    let a = Score::hard_soft(-1i64, -10).with_init_score(-3);
    let b = Score::hard_soft(0i64, -5).with_init_score(-4);

    let sum = a.add(&b).unwrap();
    assert_eq!(sum.init_score(), -7);
    assert_eq!(sum.hard_levels(), &[-1]);
    assert_eq!(sum.soft_levels(), &[-15]);
}

#[test]
fn mismatched_layouts_fail() {
    let two_hard = Score::bendable(vec![0i64, 0], vec![0]);
    let one_hard = Score::hard_soft(0i64, 0);

    let err = two_hard.add(&one_hard).unwrap_err();
    assert!(matches!(err, ScoreError::IncompatibleLayout { .. }));
    assert!(matches!(
        two_hard.subtract(&one_hard),
        Err(ScoreError::IncompatibleLayout { .. })
    ));
}

#[test]
fn integer_overflow_is_detected() {
    let a = Score::hard_soft(i64::MAX, 0);
    let b = Score::hard_soft(1i64, 0);

    let err = a.add(&b).unwrap_err();
    assert!(matches!(err, ScoreError::ArithmeticOverflow { .. }));

    let min = Score::hard_soft(i64::MIN, 0);
    assert!(matches!(
        min.negate(),
        Err(ScoreError::ArithmeticOverflow { .. })
    ));
}

#[test]
fn negate_flips_all_levels() {
    let score = Score::bendable(vec![-1i64], vec![-10, 20]).with_init_score(-2);
    let negated = score.negate().unwrap();

    assert_eq!(negated.hard_levels(), &[1]);
    assert_eq!(negated.soft_levels(), &[10, -20]);
    assert_eq!(negated.init_score(), 2);
}

#[test]
fn multiply_rounds_integer_levels() {
    let score = Score::hard_soft(5i64, -3);
    let scaled = score.multiply(0.5).unwrap();

    // 2.5 rounds to 3, -1.5 rounds away from zero to -2
    assert_eq!(scaled.hard_levels(), &[3]);
    assert_eq!(scaled.soft_levels(), &[-2]);
}

#[test]
fn divide_rounds_integer_levels() {
    let score = Score::hard_soft(7i64, -7);
    let scaled = score.divide(2.0).unwrap();

    assert_eq!(scaled.hard_levels(), &[4]);
    assert_eq!(scaled.soft_levels(), &[-4]);
}

#[test]
fn multiply_floors_init_level() {
    let score = Score::hard_soft(0i64, 0).with_init_score(-7);
    let scaled = score.multiply(0.5).unwrap();
    assert_eq!(scaled.init_score(), -4);
}

#[cfg(feature = "decimal")]
#[test]
fn decimal_add_subtract_is_exact() {
    // 0.1 + 0.2 - 0.2 must give exactly 0.1, no float drift
    let a = Score::hard_soft(Decimal::new(1, 1), Decimal::ZERO);
    let b = Score::hard_soft(Decimal::new(2, 1), Decimal::ZERO);

    let round_trip = a.add(&b).unwrap().subtract(&b).unwrap();
    assert_eq!(round_trip, a);
    assert_eq!(round_trip.hard_levels()[0], Decimal::new(1, 1));
}

#[cfg(feature = "decimal")]
#[test]
fn decimal_accumulation_has_no_drift() {
    let tenth = Score::simple(Decimal::new(1, 1));
    let mut total = Score::simple(Decimal::ZERO);
    for _ in 0..1000 {
        total = total.add(&tenth).unwrap();
    }
    assert_eq!(total.soft_levels()[0], Decimal::new(100, 0));
}
