use matches::assert_matches;

use super::*;

#[test]
fn truncates_toward_zero() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@quotient")),
            inst!(IDIV, var("GF@quotient"), int(7), int(3)),
            inst!(DEFVAR, var("GF@negative")),
            inst!(IDIV, var("GF@negative"), int(-7), int(3)),
        ],
        "",
    );
    assert_eq!(global(&run, "quotient"), Value::Int(2));
    assert_eq!(global(&run, "negative"), Value::Int(-2));
}

#[test]
fn by_zero() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@quotient")),
            inst!(IDIV, var("GF@quotient"), int(1), int(0)),
        ],
        "",
    );
    assert_matches!(err, Error::OperandValue(_));
}

#[test]
fn type_error_takes_precedence_over_zero_divisor() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@quotient")),
            inst!(IDIV, var("GF@quotient"), string("1"), int(0)),
        ],
        "",
    );
    assert_matches!(err, Error::OperandType(_));
}

#[test]
fn min_by_minus_one_wraps() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@quotient")),
            inst!(IDIV, var("GF@quotient"), int(std::i64::MIN), int(-1)),
        ],
        "",
    );
    assert_eq!(global(&run, "quotient"), Value::Int(std::i64::MIN));
}
