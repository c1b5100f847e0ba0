use matches::assert_matches;

use super::*;

#[test]
fn replaces_one_character() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@word")),
            inst!(MOVE, var("GF@word"), string("hollo")),
            inst!(SETCHAR, var("GF@word"), int(1), string("e")),
        ],
        "",
    );
    assert_eq!(global(&run, "word"), Value::Str("hello".to_string()));
}

#[test]
fn only_first_replacement_character_counts() {
    let run = run_ok(
        vec![
            inst!(DEFVAR, var("GF@word")),
            inst!(MOVE, var("GF@word"), string("cat")),
            inst!(SETCHAR, var("GF@word"), int(0), string("bar")),
        ],
        "",
    );
    assert_eq!(global(&run, "word"), Value::Str("bat".to_string()));
}

#[test]
fn empty_replacement_is_a_string_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@word")),
            inst!(MOVE, var("GF@word"), string("cat")),
            inst!(SETCHAR, var("GF@word"), int(0), string("")),
        ],
        "",
    );
    assert_matches!(err, Error::StringOperation(_));
}

#[test]
fn index_out_of_range_is_a_string_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@word")),
            inst!(MOVE, var("GF@word"), string("cat")),
            inst!(SETCHAR, var("GF@word"), int(3), string("x")),
        ],
        "",
    );
    assert_matches!(err, Error::StringOperation(_));
}

#[test]
fn non_string_destination_is_a_type_error() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@word")),
            inst!(MOVE, var("GF@word"), int(5)),
            inst!(SETCHAR, var("GF@word"), int(0), string("x")),
        ],
        "",
    );
    assert_matches!(err, Error::OperandType(_));
}

#[test]
fn unset_destination_is_a_missing_value() {
    let err = run_err(
        vec![
            inst!(DEFVAR, var("GF@word")),
            inst!(SETCHAR, var("GF@word"), int(0), string("x")),
        ],
        "",
    );
    assert_matches!(err, Error::MissingValue(_));
}
