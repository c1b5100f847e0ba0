use matches::assert_matches;

use super::*;

#[test]
fn same_type() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@ints")),
            inst!(EQ, var("GF@ints"), int(3), int(3)),
            inst!(DEFVAR, var("GF@strings")),
            inst!(EQ, var("GF@strings"), string("a"), string("b")),
            inst!(DEFVAR, var("GF@bools")),
            inst!(EQ, var("GF@bools"), boolean(true), boolean(true)),
        ],
        "",
    );
    assert_eq!(global(&run, "ints"), Value::Bool(true));
    assert_eq!(global(&run, "strings"), Value::Bool(false));
    assert_eq!(global(&run, "bools"), Value::Bool(true));
}

#[test]
fn nil_meets_anything() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@both")),
            inst!(EQ, var("GF@both"), nil(), nil()),
            inst!(DEFVAR, var("GF@one")),
            inst!(EQ, var("GF@one"), nil(), int(0)),
        ],
        "",
    );
    assert_eq!(global(&run, "both"), Value::Bool(true));
    assert_eq!(global(&run, "one"), Value::Bool(false));
}

#[test]
fn mixed_non_nil_types_are_a_type_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@equal")),
            inst!(EQ, var("GF@equal"), int(1), boolean(true)),
        ],
        "",
    );
    assert_matches!(err, Error::OperandType(_));
}
