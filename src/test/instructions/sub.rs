use super::*;

#[test]
fn literals() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@diff")),
            inst!(SUB, var("GF@diff"), int(3), int(10)),
        ],
        "",
    );
    assert_eq!(global(&run, "diff"), Value::Int(-7));
}

#[test]
fn wrapping_underflow() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@diff")),
            inst!(SUB, var("GF@diff"), int(std::i64::MIN), int(1)),
        ],
        "",
    );
    assert_eq!(global(&run, "diff"), Value::Int(std::i64::MAX));
}
