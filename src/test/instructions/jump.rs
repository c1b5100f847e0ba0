use matches::assert_matches;

use super::*;

#[test]
fn skips_to_the_label() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@a")),
            inst!(MOVE, var("GF@a"), int(1)),
            inst!(JUMP, label("end")),
            inst!(MOVE, var("GF@a"), int(2)),
            inst!(LABEL, label("end")),
        ],
        "",
    );
    assert_eq!(global(&run, "a"), Value::Int(1));
}

#[test]
fn backward_jump() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@n")),
            inst!(MOVE, var("GF@n"), int(0)),
            inst!(DEFVAR, var("GF@more")),
            inst!(LABEL, label("loop")),
            inst!(ADD, var("GF@n"), var("GF@n"), int(1)),
            inst!(LT, var("GF@more"), var("GF@n"), int(3)),
            inst!(JUMPIFEQ, label("loop"), var("GF@more"), boolean(true)),
        ],
        "",
    );
    assert_eq!(global(&run, "n"), Value::Int(3));
}

#[test]
fn undefined_label_fails_at_assembly() {
    let err = build_err(vec![inst!(JUMP, label("nowhere"))]);
    assert_matches!(err, Error::Semantic(_));
}

#[test]
fn duplicate_label_fails_at_assembly() {
    let err = build_err(vec![
        inst!(LABEL, label("twice")),
        inst!(LABEL, label("twice")),
    ]);
    assert_matches!(err, Error::Semantic(_));
}
