use matches::assert_matches;

use super::*;

#[test]
fn code_point_at_index() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@code")),
            inst!(STRI2INT, var("GF@code"), string("abc"), int(1)),
        ],
        "",
    );
    assert_eq!(global(&run, "code"), Value::Int(98));
}

#[test]
fn index_at_length_is_a_string_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@code")),
            inst!(STRI2INT, var("GF@code"), string("abc"), int(3)),
        ],
        "",
    );
    assert_matches!(err, Error::StringOperation(_));
}

#[test]
fn negative_index_is_a_string_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@code")),
            inst!(STRI2INT, var("GF@code"), string("abc"), int(-1)),
        ],
        "",
    );
    assert_matches!(err, Error::StringOperation(_));
}
