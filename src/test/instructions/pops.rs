use super::*;

#[test]
fn pops_the_most_recent_value() {
    let run = run_ok(
        vec![
            inst!(PUSHS, int(1)),
            inst!(PUSHS, int(2)),
            inst!(DEFVAR, var("GF@top")),
            inst!(POPS, var("GF@top")),
        ],
        "",
    );
    assert_eq!(global(&run, "top"), Value::Int(2));
    assert_eq!(run.processor.data_stack(), &[Value::Int(1)]);
}

#[test]
fn push_pop_roundtrip_restores_depth() {
    let run = run_ok(
        vec![
            inst!(PUSHS, int(9)),
            inst!(DEFVAR, var("GF@a")),
            inst!(PUSHS, string("x")),
            inst!(POPS, var("GF@a")),
        ],
        "",
    );
    assert_eq!(global(&run, "a"), Value::Str("x".to_string()));
    assert_eq!(run.processor.data_stack().len(), 1);
}

#[test]
fn empty_stack_is_a_missing_value() {
    let err = run_err(
        vec![inst!(DEFVAR, var("GF@a")), inst!(POPS, var("GF@a"))],
        "",
    );
    assert_eq!(err, Error::MissingValue("data stack"));
}
