use matches::assert_matches;

use super::*;

fn branch_program(left: Argument, right: Argument) -> Vec<Instruction> {
    vec![
        inst!(DEFVAR, var("GF@taken")),
        inst!(MOVE, var("GF@taken"), boolean(false)),
        inst!(JUMPIFEQ, label("hit"), left, right),
        inst!(JUMP, label("end")),
        inst!(LABEL, label("hit")),
        inst!(MOVE, var("GF@taken"), boolean(true)),
        inst!(LABEL, label("end")),
    ]
}

#[test]
fn jumps_on_equal() {
    let run = run_ok(branch_program(int(3), int(3)), "");
    assert_eq!(global(&run, "taken"), Value::Bool(true));
}

#[test]
fn falls_through_on_unequal() {
    let run = run_ok(branch_program(int(3), int(4)), "");
    assert_eq!(global(&run, "taken"), Value::Bool(false));
}

#[test]
fn nil_against_value_falls_through() {
    let run = run_ok(branch_program(nil(), int(3)), "");
    assert_eq!(global(&run, "taken"), Value::Bool(false));
}

#[test]
fn nil_against_nil_jumps() {
    let run = run_ok(branch_program(nil(), nil()), "");
    assert_eq!(global(&run, "taken"), Value::Bool(true));
}

#[test]
fn mixed_types_are_a_type_error() {
    let err = run_err(branch_program(int(1), string("1")), "");
    assert_matches!(err, Error::OperandType(_));
}
