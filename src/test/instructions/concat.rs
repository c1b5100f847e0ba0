use matches::assert_matches;

use super::*;

#[test]
fn joins_strings() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@joined")),
            inst!(CONCAT, var("GF@joined"), string("foo"), string("bar")),
        ],
        "",
    );
    assert_eq!(global(&run, "joined"), Value::Str("foobar".to_string()));
}

#[test]
fn empty_sides() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@joined")),
            inst!(CONCAT, var("GF@joined"), string(""), string("")),
        ],
        "",
    );
    assert_eq!(global(&run, "joined"), Value::Str(String::new()));
}

#[test]
fn int_operand_is_a_type_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@joined")),
            inst!(CONCAT, var("GF@joined"), string("n="), int(4)),
        ],
        "",
    );
    assert_matches!(err, Error::OperandType(_));
}
